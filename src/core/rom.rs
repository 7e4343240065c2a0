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

//! Cartridge ROM loading
//!
//! Handles the three interchange byte orders an N64 ROM image ships in,
//! identified by the first word of the 4 KiB header:
//!
//! ```text
//! .z64  80 37 12 40   native big-endian
//! .v64  37 80 40 12   16-bit byteswapped
//! .n64  40 12 37 80   32-bit little-endian
//! ```
//!
//! Images are normalized to big-endian on load, so the rest of the emulator
//! only ever sees native byte order.
//!
//! # Header layout
//!
//! ```text
//! 0x00-0x03: magic (PI access timings, constant in practice)
//! 0x08-0x0B: entry point (big-endian virtual address)
//! 0x20-0x33: internal name, space-padded ASCII
//! 0x1000+:   boot payload, copied to RAM by the boot stub
//! ```

use std::path::Path;

use super::error::{EmulatorError, Result};

/// Native big-endian magic word.
const MAGIC_Z64: [u8; 4] = [0x80, 0x37, 0x12, 0x40];
/// The same word seen through a 16-bit byteswap.
const MAGIC_V64: [u8; 4] = [0x37, 0x80, 0x40, 0x12];
/// The same word seen through a 32-bit word swap.
const MAGIC_N64: [u8; 4] = [0x40, 0x12, 0x37, 0x80];

/// Header size; also the offset of the boot payload.
pub const HEADER_SIZE: usize = 0x1000;

const ENTRY_POINT_OFFSET: usize = 0x08;
const NAME_OFFSET: usize = 0x20;
const NAME_LEN: usize = 20;

/// Source byte order of a ROM image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// .z64, already big-endian.
    BigEndian,
    /// .v64, every 16-bit pair swapped.
    ByteSwapped,
    /// .n64, every 32-bit word reversed.
    LittleEndian,
}

/// A loaded cartridge ROM, normalized to big-endian.
#[derive(Debug, Clone)]
pub struct Rom {
    data: Vec<u8>,
    entry_point: u32,
    name: String,
    byte_order: ByteOrder,
}

impl Rom {
    /// Load and normalize a ROM image from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Rom> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EmulatorError::RomNotFound(path.display().to_string()));
        }
        let data = std::fs::read(path)?;
        Self::parse(data)
    }

    /// Parse a ROM image already in memory.
    ///
    /// # Example
    /// ```
    /// use n64rx::core::rom::{Rom, HEADER_SIZE};
    ///
    /// let mut image = vec![0u8; HEADER_SIZE];
    /// image[..4].copy_from_slice(&[0x80, 0x37, 0x12, 0x40]);
    /// image[0x08..0x0C].copy_from_slice(&0x8000_0400u32.to_be_bytes());
    /// image[0x20..0x25].copy_from_slice(b"HELLO");
    ///
    /// let rom = Rom::parse(image).unwrap();
    /// assert_eq!(rom.entry_point(), 0x8000_0400);
    /// assert_eq!(rom.name(), "HELLO");
    /// ```
    pub fn parse(mut data: Vec<u8>) -> Result<Rom> {
        if data.len() < HEADER_SIZE {
            return Err(EmulatorError::TruncatedRom {
                expected: HEADER_SIZE,
                got: data.len(),
            });
        }

        let byte_order = match [data[0], data[1], data[2], data[3]] {
            MAGIC_Z64 => ByteOrder::BigEndian,
            MAGIC_V64 => ByteOrder::ByteSwapped,
            MAGIC_N64 => ByteOrder::LittleEndian,
            other => {
                return Err(EmulatorError::InvalidRomImage(format!(
                    "unrecognized magic {:02X} {:02X} {:02X} {:02X}",
                    other[0], other[1], other[2], other[3]
                )))
            }
        };

        normalize(&mut data, byte_order);

        let entry_point = u32::from_be_bytes([
            data[ENTRY_POINT_OFFSET],
            data[ENTRY_POINT_OFFSET + 1],
            data[ENTRY_POINT_OFFSET + 2],
            data[ENTRY_POINT_OFFSET + 3],
        ]);

        let name_bytes = &data[NAME_OFFSET..NAME_OFFSET + NAME_LEN];
        let name = String::from_utf8_lossy(name_bytes)
            .trim_end_matches([' ', '\0'])
            .to_string();

        log::info!(
            "Loaded ROM \"{}\" ({} bytes, {:?}), entry point 0x{:08X}",
            name,
            data.len(),
            byte_order,
            entry_point
        );

        Ok(Rom {
            data,
            entry_point,
            name,
            byte_order,
        })
    }

    /// Full normalized image, header included.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Boot payload: everything after the 4 KiB header.
    pub fn boot_payload(&self) -> &[u8] {
        &self.data[HEADER_SIZE..]
    }

    /// Entry point virtual address from the header.
    pub fn entry_point(&self) -> u32 {
        self.entry_point
    }

    /// Internal cartridge name, trailing padding stripped.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte order the image arrived in.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }
}

/// Rewrite `data` into big-endian order in place.
fn normalize(data: &mut [u8], order: ByteOrder) {
    match order {
        ByteOrder::BigEndian => {}
        ByteOrder::ByteSwapped => {
            for pair in data.chunks_exact_mut(2) {
                pair.swap(0, 1);
            }
        }
        ByteOrder::LittleEndian => {
            for word in data.chunks_exact_mut(4) {
                word.reverse();
            }
        }
    }
}
