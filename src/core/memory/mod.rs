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

//! Memory bus implementation
//!
//! The Bus is the central component for all memory operations in the
//! emulator. It owns a table of static, non-overlapping address ranges, each
//! backed by plain storage (RAM or ROM) or by a memory-mapped device, and
//! routes every access to the owning range.
//!
//! # Address translation
//!
//! The CPU issues 64-bit virtual addresses. Like the other members of this
//! console family, the kernel segments mirror one physical window, so
//! translation masks the low 32 bits down to the 512MB physical space:
//!
//! - 0xFFFFFFFF_80001234 (KSEG0) → 0x00001234
//! - 0xFFFFFFFF_A0001234 (KSEG1) → 0x00001234
//! - 0x00001234 (KUSEG)          → 0x00001234
//!
//! # Standard map
//!
//! | Physical Address Range | Region        | Backing |
//! |------------------------|---------------|---------|
//! | 0x00000000-0x003FFFFF  | RDRAM (4MB)   | RAM     |
//! | 0x04000000-0x04001FFF  | RSP DMEM/IMEM | RAM     |
//! | 0x04400000-0x04400037  | VI registers  | Device  |
//! | 0x04500000-0x04500017  | AI registers  | Device  |
//! | 0x10000000-...         | Cartridge     | ROM     |
//! | 0x1FC007C0-0x1FC007FF  | PIF RAM       | Device  |
//!
//! # Open bus
//!
//! An address that falls in no registered range is open bus: reads return a
//! fixed fill value and writes are silently dropped. Emulated programs probe
//! address ranges speculatively, so this must never be an error.
//!
//! # Byte order
//!
//! The whole address space is big-endian, assembled byte-wise — multi-byte
//! values are never produced by reinterpreting the backing buffer. Device
//! callbacks see values already in native order.

mod device;

pub use device::BusDevice;

use crate::core::error::{AccessFault, EmulatorError, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// Fill byte returned by open-bus reads.
pub const OPEN_BUS_BYTE: u8 = 0xFF;

/// Physical window the kernel segments mirror (512MB).
const PHYS_MASK: u32 = 0x1FFF_FFFF;

/// What a registered range is backed by.
enum Backing {
    /// Plain read/write storage.
    Ram(Vec<u8>),
    /// Read-only storage; writes are dropped.
    Rom(Vec<u8>),
    /// Memory-mapped peripheral, shared with the component that ticks it.
    Device(Rc<RefCell<dyn BusDevice>>),
}

/// One registered address range. `start..=end` in physical space.
struct Region {
    start: u32,
    end: u32,
    backing: Backing,
}

impl Region {
    fn contains(&self, paddr: u32) -> bool {
        paddr >= self.start && paddr <= self.end
    }

    fn requires_alignment(&self) -> bool {
        match &self.backing {
            Backing::Ram(_) | Backing::Rom(_) => true,
            Backing::Device(dev) => dev.borrow().requires_alignment(),
        }
    }
}

/// Construction-time bus assembly.
///
/// Ranges are registered here and validated once by [`build`](Self::build);
/// the resulting [`Bus`] routing table is immutable, so no locking is needed
/// afterwards.
pub struct BusBuilder {
    regions: Vec<Region>,
}

impl BusBuilder {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Register a zero-initialized RAM range of `size` bytes.
    pub fn ram(mut self, start: u32, size: u32) -> Self {
        self.regions.push(Region {
            start,
            end: start.wrapping_add(size).wrapping_sub(1),
            backing: Backing::Ram(vec![0u8; size as usize]),
        });
        self
    }

    /// Register a read-only range backed by `data`. Writes will be dropped.
    pub fn rom(mut self, start: u32, data: Vec<u8>) -> Self {
        let len = data.len() as u32;
        self.regions.push(Region {
            start,
            end: start.wrapping_add(len).wrapping_sub(1),
            backing: Backing::Rom(data),
        });
        self
    }

    /// Register a device range. The range length is the device's declared
    /// size; the device is shared so its owner can keep ticking it.
    pub fn device(mut self, start: u32, device: Rc<RefCell<dyn BusDevice>>) -> Self {
        let size = device.borrow().size();
        self.regions.push(Region {
            start,
            end: start.wrapping_add(size).wrapping_sub(1),
            backing: Backing::Device(device),
        });
        self
    }

    /// Validate the range table and produce the bus.
    ///
    /// # Errors
    ///
    /// - [`EmulatorError::ZeroSizedRegion`] for an empty range
    /// - [`EmulatorError::RegionOverlap`] if any two ranges intersect
    pub fn build(mut self) -> Result<Bus> {
        for region in &self.regions {
            // end wrapped below start means the registered size was zero
            if region.end < region.start {
                return Err(EmulatorError::ZeroSizedRegion {
                    start: region.start,
                });
            }
        }

        self.regions.sort_by_key(|r| r.start);

        for pair in self.regions.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(EmulatorError::RegionOverlap {
                    start: pair[1].start,
                    end: pair[1].end,
                    other_start: pair[0].start,
                    other_end: pair[0].end,
                });
            }
        }

        Ok(Bus {
            regions: self.regions,
        })
    }
}

impl Default for BusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Memory bus managing all memory accesses.
///
/// Built once at emulator start from a [`BusBuilder`]; lives for the process
/// duration. All access methods take 64-bit virtual addresses and return
/// recoverable [`AccessFault`]s for alignment and range-crossing violations.
pub struct Bus {
    /// Sorted, disjoint ranges. Immutable after construction.
    regions: Vec<Region>,
}

impl Bus {
    /// Translate a 64-bit virtual address to a physical address.
    #[inline(always)]
    fn translate(vaddr: u64) -> u32 {
        (vaddr as u32) & PHYS_MASK
    }

    /// Locate the range owning `paddr`, if any.
    fn region_index(&self, paddr: u32) -> Option<usize> {
        let idx = match self.regions.binary_search_by_key(&paddr, |r| r.start) {
            Ok(idx) => idx,
            Err(0) => return None,
            Err(idx) => idx - 1,
        };
        if self.regions[idx].contains(paddr) {
            Some(idx)
        } else {
            None
        }
    }

    /// Common entry for a `size`-byte access: translation, alignment and
    /// range-crossing checks. Returns `Ok(None)` for open bus.
    fn route(&self, vaddr: u64, size: u8) -> std::result::Result<Option<usize>, AccessFault> {
        let paddr = Self::translate(vaddr);

        let Some(idx) = self.region_index(paddr) else {
            // Open bus: no owning range, so no alignment constraint either.
            return Ok(None);
        };

        let region = &self.regions[idx];
        if size > 1 {
            if vaddr & (size as u64 - 1) != 0 && region.requires_alignment() {
                return Err(AccessFault::Unaligned {
                    address: vaddr,
                    size,
                });
            }
            // A multi-byte access never spans two ranges.
            if u64::from(paddr) + u64::from(size) - 1 > u64::from(region.end) {
                return Err(AccessFault::CrossesRegion {
                    address: vaddr,
                    size,
                });
            }
        }

        Ok(Some(idx))
    }

    fn storage_read(bytes: &[u8], offset: usize, size: usize) -> u64 {
        let mut value = 0u64;
        for i in 0..size {
            value = (value << 8) | u64::from(bytes[offset + i]);
        }
        value
    }

    fn storage_write(bytes: &mut [u8], offset: usize, size: usize, value: u64) {
        for i in 0..size {
            bytes[offset + i] = (value >> ((size - 1 - i) * 8)) as u8;
        }
    }

    /// Read from a device range. Word-sized reads hit `read_word` exactly
    /// once; halfword reads extract from the containing word; byte reads and
    /// misaligned reads on alignment-exempt devices go byte-wise.
    fn device_read(dev: &Rc<RefCell<dyn BusDevice>>, offset: u32, size: u8, aligned: bool) -> u64 {
        let mut dev = dev.borrow_mut();
        match (size, aligned) {
            (1, _) => u64::from(dev.read_byte(offset)),
            (2, true) => {
                let word = dev.read_word(offset & !0x03);
                let shift = (2 - (offset & 0x02)) * 8;
                u64::from((word >> shift) & 0xFFFF)
            }
            (4, true) => u64::from(dev.read_word(offset)),
            (8, true) => {
                let hi = dev.read_word(offset);
                let lo = dev.read_word(offset + 4);
                (u64::from(hi) << 32) | u64::from(lo)
            }
            (size, _) => {
                let mut value = 0u64;
                for i in 0..u32::from(size) {
                    value = (value << 8) | u64::from(dev.read_byte(offset + i));
                }
                value
            }
        }
    }

    fn device_write(
        dev: &Rc<RefCell<dyn BusDevice>>,
        offset: u32,
        size: u8,
        aligned: bool,
        value: u64,
    ) {
        let mut dev = dev.borrow_mut();
        match (size, aligned) {
            (1, _) => dev.write_byte(offset, value as u8),
            (2, true) => {
                let aligned_off = offset & !0x03;
                let shift = (2 - (offset & 0x02)) * 8;
                let mask = !(0xFFFFu32 << shift);
                let current = dev.read_word(aligned_off);
                dev.write_word(
                    aligned_off,
                    (current & mask) | (((value as u32) & 0xFFFF) << shift),
                );
            }
            (4, true) => dev.write_word(offset, value as u32),
            (8, true) => {
                dev.write_word(offset, (value >> 32) as u32);
                dev.write_word(offset + 4, value as u32);
            }
            (size, _) => {
                for i in 0..u32::from(size) {
                    let byte = (value >> ((u32::from(size) - 1 - i) * 8)) as u8;
                    dev.write_byte(offset + i, byte);
                }
            }
        }
    }

    fn read(&self, vaddr: u64, size: u8) -> std::result::Result<u64, AccessFault> {
        let Some(idx) = self.route(vaddr, size)? else {
            log::trace!("Open-bus read{} at 0x{:016X}", u32::from(size) * 8, vaddr);
            let mut value = 0u64;
            for _ in 0..size {
                value = (value << 8) | u64::from(OPEN_BUS_BYTE);
            }
            return Ok(value);
        };

        let region = &self.regions[idx];
        let offset = Self::translate(vaddr) - region.start;
        let aligned = vaddr & (size as u64 - 1) == 0;
        match &region.backing {
            Backing::Ram(bytes) | Backing::Rom(bytes) => {
                Ok(Self::storage_read(bytes, offset as usize, size as usize))
            }
            Backing::Device(dev) => Ok(Self::device_read(dev, offset, size, aligned)),
        }
    }

    fn write(&mut self, vaddr: u64, size: u8, value: u64) -> std::result::Result<(), AccessFault> {
        let Some(idx) = self.route(vaddr, size)? else {
            log::trace!(
                "Open-bus write{} at 0x{:016X} = 0x{:X} (dropped)",
                u32::from(size) * 8,
                vaddr,
                value
            );
            return Ok(());
        };

        let region = &mut self.regions[idx];
        let offset = Self::translate(vaddr) - region.start;
        let aligned = vaddr & (size as u64 - 1) == 0;
        match &mut region.backing {
            Backing::Ram(bytes) => {
                Self::storage_write(bytes, offset as usize, size as usize, value);
                Ok(())
            }
            Backing::Rom(_) => {
                log::trace!("Write to ROM at 0x{:016X} (ignored)", vaddr);
                Ok(())
            }
            Backing::Device(dev) => {
                Self::device_write(dev, offset, size, aligned, value);
                Ok(())
            }
        }
    }

    /// Read an 8-bit value. Never alignment-constrained.
    pub fn read8(&self, vaddr: u64) -> std::result::Result<u8, AccessFault> {
        self.read(vaddr, 1).map(|v| v as u8)
    }

    /// Read a 16-bit value (big-endian). Must be 2-byte aligned unless the
    /// owning device opts out.
    pub fn read16(&self, vaddr: u64) -> std::result::Result<u16, AccessFault> {
        self.read(vaddr, 2).map(|v| v as u16)
    }

    /// Read a 32-bit value (big-endian). Must be 4-byte aligned unless the
    /// owning device opts out.
    pub fn read32(&self, vaddr: u64) -> std::result::Result<u32, AccessFault> {
        self.read(vaddr, 4).map(|v| v as u32)
    }

    /// Read a 64-bit value (big-endian). Must be 8-byte aligned unless the
    /// owning device opts out.
    pub fn read64(&self, vaddr: u64) -> std::result::Result<u64, AccessFault> {
        self.read(vaddr, 8)
    }

    /// Write an 8-bit value.
    pub fn write8(&mut self, vaddr: u64, value: u8) -> std::result::Result<(), AccessFault> {
        self.write(vaddr, 1, u64::from(value))
    }

    /// Write a 16-bit value (big-endian).
    pub fn write16(&mut self, vaddr: u64, value: u16) -> std::result::Result<(), AccessFault> {
        self.write(vaddr, 2, u64::from(value))
    }

    /// Write a 32-bit value (big-endian).
    pub fn write32(&mut self, vaddr: u64, value: u32) -> std::result::Result<(), AccessFault> {
        self.write(vaddr, 4, u64::from(value))
    }

    /// Write a 64-bit value (big-endian).
    pub fn write64(&mut self, vaddr: u64, value: u64) -> std::result::Result<(), AccessFault> {
        self.write(vaddr, 8, value)
    }

    /// Copy a program image into a RAM range.
    ///
    /// This is the loader path, not an emulated store: the whole block must
    /// land inside a single RAM range, and anything else is a fatal
    /// [`EmulatorError::ImageOutsideRam`].
    pub fn write_block(&mut self, vaddr: u64, data: &[u8]) -> Result<()> {
        let paddr = Self::translate(vaddr);
        let outside = EmulatorError::ImageOutsideRam {
            address: vaddr,
            len: data.len(),
        };

        let Some(idx) = self.region_index(paddr) else {
            return Err(outside);
        };
        let region = &mut self.regions[idx];
        let end = u64::from(paddr) + data.len() as u64;
        if end > u64::from(region.end) + 1 {
            return Err(outside);
        }
        match &mut region.backing {
            Backing::Ram(bytes) => {
                let offset = (paddr - region.start) as usize;
                bytes[offset..offset + data.len()].copy_from_slice(data);
                Ok(())
            }
            _ => Err(outside),
        }
    }
}
