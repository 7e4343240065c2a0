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

//! Execution unit
//!
//! Applies the semantic effect of one decoded instruction to the register
//! file and the bus, organized by instruction family. Every fault check
//! precedes every mutation: a faulted instruction leaves registers, PC and
//! memory exactly as they were.

mod arithmetic;
mod branch;
mod jump;
mod load;
mod logical;
mod multiply;
mod shift;
mod store;

use super::instruction::{AluImmKind, AluKind, Instruction, Op};
use super::registers::Registers;
use super::{Exception, StepOutcome};
use crate::core::memory::Bus;

/// Sign-extend a 32-bit value to the 64-bit register width.
///
/// Every 32-bit operation on this architecture produces its result in this
/// form, including the logical right shifts.
#[inline(always)]
pub(super) fn sign_extend32(value: u32) -> u64 {
    value as i32 as i64 as u64
}

/// Execute one decoded instruction against the register file and the bus.
pub(super) fn execute(instr: &Instruction, regs: &mut Registers, bus: &mut Bus) -> StepOutcome {
    match instr.op {
        Op::Alu { kind, rs, rt, rd } => match kind {
            AluKind::And | AluKind::Or | AluKind::Xor | AluKind::Nor => {
                logical::bitwise(kind, rs, rt, rd, regs)
            }
            _ => arithmetic::alu(kind, rs, rt, rd, regs),
        },
        Op::AluImm { kind, rs, rt, imm } => match kind {
            AluImmKind::Andi | AluImmKind::Ori | AluImmKind::Xori => {
                logical::bitwise_imm(kind, rs, rt, imm, regs)
            }
            _ => arithmetic::alu_imm(kind, rs, rt, imm, regs),
        },
        Op::Shift {
            kind,
            rt,
            rd,
            amount,
        } => shift::constant(kind, rt, rd, amount, regs),
        Op::ShiftReg { kind, rs, rt, rd } => shift::variable(kind, rs, rt, rd, regs),
        Op::Lui { rt, imm } => logical::lui(rt, imm, regs),
        Op::Load {
            kind,
            base,
            rt,
            offset,
        } => load::load(kind, base, rt, offset, regs, bus),
        Op::Store {
            kind,
            base,
            rt,
            offset,
        } => store::store(kind, base, rt, offset, regs, bus),
        Op::Branch {
            cond,
            rs,
            rt,
            offset,
            link,
        } => branch::branch(cond, rs, rt, offset, link, regs),
        Op::Jump { target, link } => jump::jump(target, link, regs),
        Op::JumpReg { rs, rd, link } => jump::jump_register(rs, rd, link, regs),
        Op::MulDiv { kind, rs, rt } => multiply::mul_div(kind, rs, rt, regs),
        Op::HiLo { kind, reg } => multiply::hi_lo(kind, reg, regs),
        Op::Break => StepOutcome::Halted,
        Op::Reserved => {
            log::warn!(
                "Reserved instruction 0x{:08X} at PC=0x{:016X}",
                instr.raw,
                regs.pc()
            );
            StepOutcome::Exception(Exception::ReservedInstruction { word: instr.raw })
        }
    }
}
