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

//! Bitwise instructions
//!
//! These operate on the full 64-bit register width and never fault. The
//! immediate forms use the zero-extended immediate prepared at decode time.

use super::super::instruction::{AluImmKind, AluKind};
use super::super::registers::Registers;
use super::super::StepOutcome;

/// AND / OR / XOR / NOR.
pub(super) fn bitwise(kind: AluKind, rs: u8, rt: u8, rd: u8, regs: &mut Registers) -> StepOutcome {
    let a = regs.read(rs);
    let b = regs.read(rt);

    let value = match kind {
        AluKind::And => a & b,
        AluKind::Or => a | b,
        AluKind::Xor => a ^ b,
        AluKind::Nor => !(a | b),
        _ => unreachable!("non-bitwise kinds are dispatched to the arithmetic module"),
    };

    regs.write(rd, value);
    StepOutcome::Continue
}

/// ANDI / ORI / XORI.
pub(super) fn bitwise_imm(
    kind: AluImmKind,
    rs: u8,
    rt: u8,
    imm: u64,
    regs: &mut Registers,
) -> StepOutcome {
    let a = regs.read(rs);

    let value = match kind {
        AluImmKind::Andi => a & imm,
        AluImmKind::Ori => a | imm,
        AluImmKind::Xori => a ^ imm,
        _ => unreachable!("non-bitwise kinds are dispatched to the arithmetic module"),
    };

    regs.write(rt, value);
    StepOutcome::Continue
}

/// LUI. The decoder already shifted the immediate into the upper half and
/// sign-extended it.
pub(super) fn lui(rt: u8, imm: u64, regs: &mut Registers) -> StepOutcome {
    regs.write(rt, imm);
    StepOutcome::Continue
}
