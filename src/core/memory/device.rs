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

//! Memory-mapped device trait
//!
//! Peripherals register an address range with the [`Bus`](super::Bus) at
//! construction time and implement this trait for their register file. The
//! Bus routes every access that falls inside the range to the device, with
//! the offset already made relative to the range base.
//!
//! # Byte order
//!
//! Device callbacks receive and return values in the machine's native order:
//! a `read_word` result is the 32-bit value the emulated program observes,
//! never a host-order reinterpretation of raw bytes.
//!
//! # Side effects
//!
//! Unlike RAM, device reads may have side effects (draining a FIFO,
//! advancing a scanline counter). The Bus guarantees each callback is
//! invoked exactly once per emulated access, synchronously. Callbacks must
//! not block or reenter the Bus.

/// Trait for memory-mapped peripherals.
///
/// Devices implement 32-bit register access; 8-bit and 16-bit accesses
/// default to read-modify-write over the containing aligned word, which is
/// correct for plain register files. Devices with byte-granular storage
/// (e.g. the PIF RAM block) override the byte methods and opt out of the
/// alignment requirement.
pub trait BusDevice {
    /// Length of the device's address range in bytes.
    fn size(&self) -> u32;

    /// Read a 32-bit register. `offset` is relative to the range base and
    /// word-aligned unless the device opts out of alignment.
    fn read_word(&mut self, offset: u32) -> u32;

    /// Write a 32-bit register.
    fn write_word(&mut self, offset: u32, value: u32);

    /// Whether multi-byte accesses to this range must be naturally aligned.
    ///
    /// Plain RAM always requires alignment; devices may opt out, in which
    /// case the Bus routes misaligned words through the byte methods.
    fn requires_alignment(&self) -> bool {
        true
    }

    /// Read a single byte. Default: extract from the containing word.
    fn read_byte(&mut self, offset: u32) -> u8 {
        let word = self.read_word(offset & !0x03);
        let shift = (3 - (offset & 0x03)) * 8;
        ((word >> shift) & 0xFF) as u8
    }

    /// Write a single byte. Default: read-modify-write the containing word.
    fn write_byte(&mut self, offset: u32, value: u8) {
        let aligned = offset & !0x03;
        let shift = (3 - (offset & 0x03)) * 8;
        let mask = !(0xFFu32 << shift);
        let current = self.read_word(aligned);
        self.write_word(aligned, (current & mask) | ((value as u32) << shift));
    }

    /// Device name for logging.
    fn name(&self) -> &str {
        "device"
    }
}
