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

//! Multiply/divide instructions and HI/LO transfers
//!
//! The 32-bit multiply produces a 64-bit product split across HI/LO, each
//! half sign-extended to the register width. Division never faults:
//! division by zero produces the conventional hardware result (quotient
//! ±1 by dividend sign, remainder = dividend) and the i32::MIN / -1
//! overflow case produces quotient i32::MIN, remainder 0.

use super::super::instruction::{HiLoKind, MulDivKind};
use super::super::registers::Registers;
use super::super::StepOutcome;
use super::sign_extend32;

pub(super) fn mul_div(kind: MulDivKind, rs: u8, rt: u8, regs: &mut Registers) -> StepOutcome {
    let (hi, lo) = match kind {
        MulDivKind::Mult => {
            let a = regs.read(rs) as u32 as i32 as i64;
            let b = regs.read(rt) as u32 as i32 as i64;
            let product = a * b;
            (
                sign_extend32((product >> 32) as u32),
                sign_extend32(product as u32),
            )
        }
        MulDivKind::Multu => {
            let a = u64::from(regs.read(rs) as u32);
            let b = u64::from(regs.read(rt) as u32);
            let product = a * b;
            (
                sign_extend32((product >> 32) as u32),
                sign_extend32(product as u32),
            )
        }
        MulDivKind::Div => {
            let a = regs.read(rs) as u32 as i32;
            let b = regs.read(rt) as u32 as i32;
            if b == 0 {
                let quotient = if a >= 0 { -1i32 } else { 1 };
                (sign_extend32(a as u32), sign_extend32(quotient as u32))
            } else if a == i32::MIN && b == -1 {
                (0, sign_extend32(i32::MIN as u32))
            } else {
                (sign_extend32((a % b) as u32), sign_extend32((a / b) as u32))
            }
        }
        MulDivKind::Divu => {
            let a = regs.read(rs) as u32;
            let b = regs.read(rt) as u32;
            if b == 0 {
                (sign_extend32(a), sign_extend32(u32::MAX))
            } else {
                (sign_extend32(a % b), sign_extend32(a / b))
            }
        }
    };

    regs.set_hi(hi);
    regs.set_lo(lo);
    StepOutcome::Continue
}

pub(super) fn hi_lo(kind: HiLoKind, reg: u8, regs: &mut Registers) -> StepOutcome {
    match kind {
        HiLoKind::MoveFromHi => {
            let value = regs.hi();
            regs.write(reg, value);
        }
        HiLoKind::MoveToHi => regs.set_hi(regs.read(reg)),
        HiLoKind::MoveFromLo => {
            let value = regs.lo();
            regs.write(reg, value);
        }
        HiLoKind::MoveToLo => regs.set_lo(regs.read(reg)),
    }
    StepOutcome::Continue
}
