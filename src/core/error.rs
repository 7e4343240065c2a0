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

/// Emulator error types
use thiserror::Error;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Host-level error type for the emulator.
///
/// These are the fatal, construction-and-loading-time failures: a ROM that
/// cannot be read, a malformed bus range table, a broken config file.
/// Per-instruction CPU faults are *not* errors — they are reported as
/// [`StepOutcome::Exception`](crate::core::cpu::StepOutcome::Exception)
/// values and the host decides fatality.
#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error("ROM file not found: {0}")]
    RomNotFound(String),

    #[error("Invalid ROM image: {0}")]
    InvalidRomImage(String),

    #[error("Truncated ROM image: {got} bytes (need at least {expected})")]
    TruncatedRom { expected: usize, got: usize },

    #[error(
        "Bus range 0x{start:08X}..=0x{end:08X} overlaps 0x{other_start:08X}..=0x{other_end:08X}"
    )]
    RegionOverlap {
        start: u32,
        end: u32,
        other_start: u32,
        other_end: u32,
    },

    #[error("Zero-length bus range at 0x{start:08X}")]
    ZeroSizedRegion { start: u32 },

    #[error("Program image at 0x{address:016X} ({len} bytes) does not fit a RAM range")]
    ImageOutsideRam { address: u64, len: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fault raised by the memory bus for an access it refuses to perform.
///
/// These are recoverable: the execution unit translates them into an
/// `AddressError` exception outcome carrying the faulting effective address,
/// which is what an emulated exception handler needs to diagnose the fault.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessFault {
    #[error("Unaligned memory access: {size}-byte access at 0x{address:016X}")]
    Unaligned { address: u64, size: u8 },

    #[error("Memory access crosses a range boundary: {size}-byte access at 0x{address:016X}")]
    CrossesRegion { address: u64, size: u8 },
}

impl AccessFault {
    /// The effective address that caused the fault.
    pub fn address(&self) -> u64 {
        match *self {
            AccessFault::Unaligned { address, .. } => address,
            AccessFault::CrossesRegion { address, .. } => address,
        }
    }
}
