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

//! System test modules
//!
//! - `basic`: memory map wiring and ROM boot
//! - `execution`: the frame loop and peripheral servicing


use super::*;
use crate::core::rom::HEADER_SIZE;

/// Big-endian .z64 image whose boot payload is the given program.
fn test_rom(entry: u32, program: &[u32]) -> Rom {
    let mut data = vec![0u8; HEADER_SIZE + program.len() * 4];
    data[..4].copy_from_slice(&[0x80, 0x37, 0x12, 0x40]);
    data[0x08..0x0C].copy_from_slice(&entry.to_be_bytes());
    data[0x20..0x27].copy_from_slice(b"TESTROM");
    for b in &mut data[0x27..0x34] {
        *b = b' ';
    }
    for (i, word) in program.iter().enumerate() {
        let at = HEADER_SIZE + i * 4;
        data[at..at + 4].copy_from_slice(&word.to_be_bytes());
    }
    Rom::parse(data).unwrap()
}

/// Console with the given program booted at 0x80000400.
fn booted(program: &[u32]) -> System {
    let mut system = System::new(EmulatorConfig::default()).unwrap();
    system.load_rom(test_rom(0x8000_0400, program)).unwrap();
    system
}
