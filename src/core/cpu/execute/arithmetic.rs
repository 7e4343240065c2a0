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

//! Arithmetic and compare instructions
//!
//! The overflow policy is per-opcode, not uniform: ADD/ADDI/SUB and their
//! doubleword forms fault with `ArithmeticOverflow` on signed overflow, the
//! U-suffixed forms wrap. All 32-bit results are sign-extended to the 64-bit
//! register width.

use super::super::instruction::{AluImmKind, AluKind};
use super::super::registers::Registers;
use super::super::{Exception, StepOutcome};
use super::sign_extend32;

/// Three-register arithmetic/compare. The bitwise kinds are routed to the
/// logical module by the dispatcher.
pub(super) fn alu(kind: AluKind, rs: u8, rt: u8, rd: u8, regs: &mut Registers) -> StepOutcome {
    let a = regs.read(rs);
    let b = regs.read(rt);

    let value = match kind {
        AluKind::Add => match (a as i32).checked_add(b as i32) {
            Some(result) => sign_extend32(result as u32),
            None => return StepOutcome::Exception(Exception::ArithmeticOverflow),
        },
        AluKind::Addu => sign_extend32((a as u32).wrapping_add(b as u32)),
        AluKind::Sub => match (a as i32).checked_sub(b as i32) {
            Some(result) => sign_extend32(result as u32),
            None => return StepOutcome::Exception(Exception::ArithmeticOverflow),
        },
        AluKind::Subu => sign_extend32((a as u32).wrapping_sub(b as u32)),
        AluKind::Dadd => match (a as i64).checked_add(b as i64) {
            Some(result) => result as u64,
            None => return StepOutcome::Exception(Exception::ArithmeticOverflow),
        },
        AluKind::Daddu => a.wrapping_add(b),
        AluKind::Dsub => match (a as i64).checked_sub(b as i64) {
            Some(result) => result as u64,
            None => return StepOutcome::Exception(Exception::ArithmeticOverflow),
        },
        AluKind::Dsubu => a.wrapping_sub(b),
        AluKind::Slt => u64::from((a as i64) < (b as i64)),
        AluKind::Sltu => u64::from(a < b),
        AluKind::And | AluKind::Or | AluKind::Xor | AluKind::Nor => {
            unreachable!("bitwise kinds are dispatched to the logical module")
        }
    };

    regs.write(rd, value);
    StepOutcome::Continue
}

/// Register-immediate arithmetic/compare. `imm` was sign-extended at decode
/// time; the bitwise immediates are routed to the logical module.
pub(super) fn alu_imm(
    kind: AluImmKind,
    rs: u8,
    rt: u8,
    imm: u64,
    regs: &mut Registers,
) -> StepOutcome {
    let a = regs.read(rs);

    let value = match kind {
        AluImmKind::Addi => match (a as i32).checked_add(imm as i32) {
            Some(result) => sign_extend32(result as u32),
            None => return StepOutcome::Exception(Exception::ArithmeticOverflow),
        },
        AluImmKind::Addiu => sign_extend32((a as u32).wrapping_add(imm as u32)),
        AluImmKind::Daddi => match (a as i64).checked_add(imm as i64) {
            Some(result) => result as u64,
            None => return StepOutcome::Exception(Exception::ArithmeticOverflow),
        },
        AluImmKind::Daddiu => a.wrapping_add(imm),
        AluImmKind::Slti => u64::from((a as i64) < (imm as i64)),
        AluImmKind::Sltiu => u64::from(a < imm),
        AluImmKind::Andi | AluImmKind::Ori | AluImmKind::Xori => {
            unreachable!("bitwise kinds are dispatched to the logical module")
        }
    };

    regs.write(rt, value);
    StepOutcome::Continue
}
