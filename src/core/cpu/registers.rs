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

//! CPU register file
//!
//! 32 general-purpose 64-bit registers (r0 hardwired to zero), the program
//! counter, the HI/LO multiply-divide pair, and the one-slot pending
//! delayed-branch bookkeeping. Owned exclusively by the CPU core and mutated
//! only during an execute call.

/// Reset vector: sign-extended KSEG1 boot ROM base. The ROM loader
/// overwrites the PC with the cartridge entry point before execution starts.
pub const RESET_VECTOR: u64 = 0xFFFF_FFFF_BFC0_0000;

/// CPU register file.
///
/// # Example
/// ```
/// use n64rx::core::cpu::Registers;
///
/// let mut regs = Registers::new();
/// regs.write(1, 0x1234);
/// assert_eq!(regs.read(1), 0x1234);
/// assert_eq!(regs.read(0), 0); // r0 is always 0
/// ```
pub struct Registers {
    /// General purpose registers (r0-r31). r0 always reads 0.
    gpr: [u64; 32],

    /// Program counter. Word-aligned by construction: the execute stage
    /// rejects misaligned branch targets before they reach the PC.
    pc: u64,

    /// Multiply/divide result registers.
    hi: u64,
    lo: u64,

    /// Pending delayed-branch target, applied by the core after exactly one
    /// delay-slot instruction has executed.
    pending_branch: Option<u64>,
}

impl Registers {
    pub fn new() -> Self {
        Self {
            gpr: [0u64; 32],
            pc: RESET_VECTOR,
            hi: 0,
            lo: 0,
            pending_branch: None,
        }
    }

    /// Reset to power-on state.
    pub fn reset(&mut self) {
        self.gpr = [0u64; 32];
        self.pc = RESET_VECTOR;
        self.hi = 0;
        self.lo = 0;
        self.pending_branch = None;
    }

    /// Read a general purpose register. r0 always yields 0.
    #[inline(always)]
    pub fn read(&self, index: u8) -> u64 {
        if index == 0 {
            0
        } else {
            self.gpr[index as usize]
        }
    }

    /// Write a general purpose register. Writes to r0 are discarded.
    #[inline(always)]
    pub fn write(&mut self, index: u8, value: u64) {
        if index != 0 {
            self.gpr[index as usize] = value;
        }
    }

    /// Current program counter.
    #[inline(always)]
    pub fn pc(&self) -> u64 {
        self.pc
    }

    /// Set the program counter. Callers guarantee word alignment.
    #[inline(always)]
    pub fn set_pc(&mut self, pc: u64) {
        self.pc = pc;
    }

    pub fn hi(&self) -> u64 {
        self.hi
    }

    pub fn set_hi(&mut self, value: u64) {
        self.hi = value;
    }

    pub fn lo(&self) -> u64 {
        self.lo
    }

    pub fn set_lo(&mut self, value: u64) {
        self.lo = value;
    }

    /// Queue a delayed branch to `target`.
    ///
    /// A second branch issued from within a delay slot is undefined on the
    /// real pipeline; here the new target silently overwrites the pending
    /// one, which is why this is an unconditional store.
    #[inline(always)]
    pub fn queue_delayed_branch(&mut self, target: u64) {
        self.pending_branch = Some(target);
    }

    /// Take the pending delayed-branch target, clearing the slot.
    #[inline(always)]
    pub fn take_delayed_branch(&mut self) -> Option<u64> {
        self.pending_branch.take()
    }

    /// Whether a delayed branch is queued (i.e. the next instruction to
    /// execute sits in a delay slot).
    #[inline(always)]
    pub fn branch_pending(&self) -> bool {
        self.pending_branch.is_some()
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
