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

//! Jump instructions
//!
//! Jumps queue the delayed target exactly like branches. Register jumps are
//! the one way a misaligned address could reach the PC, so the target is
//! checked here and rejected with an address error *before* the link write —
//! no partial state escapes a faulted instruction.

use super::super::registers::Registers;
use super::super::{Exception, StepOutcome};

/// J / JAL. The 26-bit index (pre-shifted at decode) replaces the low 28
/// bits of the delay-slot address.
pub(super) fn jump(target: u32, link: bool, regs: &mut Registers) -> StepOutcome {
    let base = regs.pc().wrapping_add(4);
    let dest = (base & !0x0FFF_FFFF) | u64::from(target);

    if link {
        let return_addr = regs.pc().wrapping_add(8);
        regs.write(31, return_addr);
    }

    regs.queue_delayed_branch(dest);
    StepOutcome::Continue
}

/// JR / JALR.
pub(super) fn jump_register(rs: u8, rd: u8, link: bool, regs: &mut Registers) -> StepOutcome {
    let target = regs.read(rs);

    if target & 0x03 != 0 {
        return StepOutcome::Exception(Exception::AddressError { address: target });
    }

    if link {
        let return_addr = regs.pc().wrapping_add(8);
        regs.write(rd, return_addr);
    }

    regs.queue_delayed_branch(target);
    StepOutcome::Continue
}
