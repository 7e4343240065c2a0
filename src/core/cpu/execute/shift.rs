// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shift instructions
//!
//! The 32-bit forms shift the low word and sign-extend the 32-bit result —
//! including SRL, whose result is sign-extended *as a 32-bit value* even
//! though the shift itself is logical. The doubleword forms shift the full
//! register; the `32`-suffixed encodings were folded into the shift amount
//! at decode time.

use super::super::instruction::ShiftKind;
use super::super::registers::Registers;
use super::super::StepOutcome;
use super::sign_extend32;

fn apply(kind: ShiftKind, value: u64, amount: u8) -> u64 {
    match kind {
        ShiftKind::Sll => sign_extend32((value as u32) << amount),
        ShiftKind::Srl => sign_extend32((value as u32) >> amount),
        ShiftKind::Sra => sign_extend32(((value as u32 as i32) >> amount) as u32),
        ShiftKind::Dsll => value << amount,
        ShiftKind::Dsrl => value >> amount,
        ShiftKind::Dsra => ((value as i64) >> amount) as u64,
    }
}

/// Constant-amount shift (SLL family, DSLL family including the 32-suffixed
/// encodings). `sll r0, r0, 0` is the canonical NOP and falls out of the
/// hardwired-zero write rule for free.
pub(super) fn constant(
    kind: ShiftKind,
    rt: u8,
    rd: u8,
    amount: u8,
    regs: &mut Registers,
) -> StepOutcome {
    let value = apply(kind, regs.read(rt), amount);
    regs.write(rd, value);
    StepOutcome::Continue
}

/// Variable-amount shift (SLLV family, DSLLV family). The amount comes from
/// rs, masked to 5 bits for the word forms and 6 bits for the doubleword
/// forms.
pub(super) fn variable(
    kind: ShiftKind,
    rs: u8,
    rt: u8,
    rd: u8,
    regs: &mut Registers,
) -> StepOutcome {
    let mask = match kind {
        ShiftKind::Sll | ShiftKind::Srl | ShiftKind::Sra => 0x1F,
        ShiftKind::Dsll | ShiftKind::Dsrl | ShiftKind::Dsra => 0x3F,
    };
    let amount = (regs.read(rs) & mask) as u8;
    let value = apply(kind, regs.read(rt), amount);
    regs.write(rd, value);
    StepOutcome::Continue
}
