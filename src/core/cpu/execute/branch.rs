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

//! Conditional branch instructions
//!
//! A taken branch only queues the delayed target; the PC still advances
//! sequentially this cycle and the core applies the target after the delay
//! slot executes. The target is (branch address + 4) + offset, with the
//! offset pre-shifted at decode time.
//!
//! The and-link forms write r31 = branch address + 8 (the instruction after
//! the delay slot) whether or not the branch is taken, matching hardware.

use super::super::instruction::BranchCond;
use super::super::registers::Registers;
use super::super::StepOutcome;

pub(super) fn branch(
    cond: BranchCond,
    rs: u8,
    rt: u8,
    offset: i64,
    link: bool,
    regs: &mut Registers,
) -> StepOutcome {
    let a = regs.read(rs);
    let taken = match cond {
        BranchCond::Eq => a == regs.read(rt),
        BranchCond::Ne => a != regs.read(rt),
        BranchCond::LessEqualZero => (a as i64) <= 0,
        BranchCond::GreaterZero => (a as i64) > 0,
        BranchCond::LessZero => (a as i64) < 0,
        BranchCond::GreaterEqualZero => (a as i64) >= 0,
    };

    if link {
        let return_addr = regs.pc().wrapping_add(8);
        regs.write(31, return_addr);
    }

    if taken {
        let target = regs.pc().wrapping_add(4).wrapping_add(offset as u64);
        regs.queue_delayed_branch(target);
    }

    StepOutcome::Continue
}
