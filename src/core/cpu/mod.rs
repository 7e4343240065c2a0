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

//! CPU core (64-bit MIPS family, VR4300 subset)
//!
//! Drives the fetch→decode→execute cycle over the register file and the
//! memory bus, manages the one-instruction branch delay, and reports every
//! per-instruction fault as a recoverable [`StepOutcome`] — never a panic,
//! never an `Err`.
//!
//! # Example
//! ```
//! use n64rx::core::cpu::{Cpu, StepOutcome};
//! use n64rx::core::memory::BusBuilder;
//!
//! let mut bus = BusBuilder::new().ram(0, 0x1000).build().unwrap();
//! let mut cpu = Cpu::new();
//! cpu.regs_mut().set_pc(0);
//!
//! // RAM is zeroed; instruction word 0 is a NOP (sll r0, r0, 0).
//! assert_eq!(cpu.step(&mut bus), StepOutcome::Continue);
//! assert_eq!(cpu.regs().pc(), 4);
//! ```

mod decode;
mod execute;
mod instruction;
mod registers;
#[cfg(test)]
mod tests;

pub use decode::decode;
pub use instruction::{
    AluImmKind, AluKind, BranchCond, HiLoKind, Instruction, LoadKind, MulDivKind, Op, ShiftKind,
    StoreKind,
};
pub use registers::{Registers, RESET_VECTOR};

use crate::core::memory::Bus;

/// Per-instruction fault, carried inside a [`StepOutcome`].
///
/// Leaves CPU state consistent: a faulted instruction performs no register
/// or memory writes and does not advance the PC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exception {
    /// Misaligned or range-crossing access; carries the faulting effective
    /// address an emulated handler would need.
    AddressError { address: u64 },
    /// Signed overflow in one of the overflow-checked arithmetic ops.
    ArithmeticOverflow,
    /// Reserved, unimplemented or coprocessor opcode; carries the raw word.
    ReservedInstruction { word: u32 },
}

/// Result of one CPU cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Instruction retired normally.
    Continue,
    /// Instruction faulted; the core is now [`CpuState::Faulted`].
    Exception(Exception),
    /// The core halted (BREAK, or stepping an already-terminal core).
    Halted,
}

/// Execution state machine. `Faulted` and `Halted` are terminal: no
/// in-process exception vectoring is modeled, the host decides whether to
/// reset or abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuState {
    Running,
    Faulted,
    Halted,
}

/// CPU core: register file plus the execution state machine.
pub struct Cpu {
    regs: Registers,
    state: CpuState,
    /// Instructions retired since reset, for fault diagnostics.
    retired: u64,
}

impl Cpu {
    /// Create a CPU at the reset vector, in the `Running` state.
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            state: CpuState::Running,
            retired: 0,
        }
    }

    /// Reset to power-on state.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.state = CpuState::Running;
        self.retired = 0;
    }

    pub fn regs(&self) -> &Registers {
        &self.regs
    }

    pub fn regs_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }

    pub fn state(&self) -> CpuState {
        self.state
    }

    /// Instructions retired since reset.
    pub fn retired(&self) -> u64 {
        self.retired
    }

    /// Whether the next instruction to execute sits in a branch delay slot.
    pub fn in_delay_slot(&self) -> bool {
        self.regs.branch_pending()
    }

    /// Execute one instruction.
    ///
    /// Fetches at the current PC, decodes, executes, then advances the PC:
    /// sequentially, unless a branch was already pending when this
    /// instruction started — in that case this instruction was the delay
    /// slot and the (possibly overwritten) target is applied now. The
    /// target of a branch issued *by* this instruction is therefore never
    /// visible until exactly one further instruction has executed.
    ///
    /// Faults transition the core to `Faulted` without touching PC or
    /// registers; stepping a terminal core reports `Halted`.
    pub fn step(&mut self, bus: &mut Bus) -> StepOutcome {
        match self.state {
            CpuState::Running => {}
            CpuState::Faulted | CpuState::Halted => return StepOutcome::Halted,
        }

        let pc = self.regs.pc();
        let in_delay_slot = self.regs.branch_pending();

        let word = match bus.read32(pc) {
            Ok(word) => word,
            Err(fault) => {
                log::warn!("Fetch fault at PC=0x{:016X}: {}", pc, fault);
                self.state = CpuState::Faulted;
                return StepOutcome::Exception(Exception::AddressError {
                    address: fault.address(),
                });
            }
        };

        let instr = decode(word);

        match execute::execute(&instr, &mut self.regs, bus) {
            StepOutcome::Continue => {
                self.retired += 1;
                if in_delay_slot {
                    let target = self
                        .regs
                        .take_delayed_branch()
                        .unwrap_or_else(|| pc.wrapping_add(4));
                    self.regs.set_pc(target);
                } else {
                    self.regs.set_pc(pc.wrapping_add(4));
                }
                StepOutcome::Continue
            }
            StepOutcome::Exception(cause) => {
                log::warn!(
                    "EXCEPTION: {:?} at PC=0x{:016X}, instruction=0x{:08X}, in_delay={}",
                    cause,
                    pc,
                    word,
                    in_delay_slot
                );
                self.state = CpuState::Faulted;
                StepOutcome::Exception(cause)
            }
            StepOutcome::Halted => {
                self.retired += 1;
                self.state = CpuState::Halted;
                StepOutcome::Halted
            }
        }
    }

    /// Dump all CPU registers for debugging.
    pub fn dump_registers(&self) {
        println!("CPU Registers:");
        println!("PC: 0x{:016X}  State: {:?}", self.regs.pc(), self.state);
        println!("HI: 0x{:016X}  LO: 0x{:016X}", self.regs.hi(), self.regs.lo());
        println!();

        for i in 0..32u8 {
            if i % 4 == 0 && i > 0 {
                println!();
            }
            print!("r{:2}: 0x{:016X}  ", i, self.regs.read(i));
        }
        println!("\n");
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
