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

//! Load instructions
//!
//! Bus faults surface as address-error exceptions; the destination register
//! is only written once the bus access has succeeded. LWL/LWR read the
//! aligned word containing the address and merge bytes into the current
//! register value, so they never alignment-fault by construction.

use super::super::registers::Registers;
use super::super::{Exception, StepOutcome};
use super::sign_extend32;
use crate::core::cpu::instruction::LoadKind;
use crate::core::memory::Bus;

pub(super) fn load(
    kind: LoadKind,
    base: u8,
    rt: u8,
    offset: i64,
    regs: &mut Registers,
    bus: &mut Bus,
) -> StepOutcome {
    let addr = regs.read(base).wrapping_add(offset as u64);

    let value = match kind {
        LoadKind::Byte => match bus.read8(addr) {
            Ok(b) => b as i8 as i64 as u64,
            Err(_) => return StepOutcome::Exception(Exception::AddressError { address: addr }),
        },
        LoadKind::ByteUnsigned => match bus.read8(addr) {
            Ok(b) => u64::from(b),
            Err(_) => return StepOutcome::Exception(Exception::AddressError { address: addr }),
        },
        LoadKind::Half => match bus.read16(addr) {
            Ok(h) => h as i16 as i64 as u64,
            Err(_) => return StepOutcome::Exception(Exception::AddressError { address: addr }),
        },
        LoadKind::HalfUnsigned => match bus.read16(addr) {
            Ok(h) => u64::from(h),
            Err(_) => return StepOutcome::Exception(Exception::AddressError { address: addr }),
        },
        LoadKind::Word => match bus.read32(addr) {
            Ok(w) => sign_extend32(w),
            Err(_) => return StepOutcome::Exception(Exception::AddressError { address: addr }),
        },
        LoadKind::WordUnsigned => match bus.read32(addr) {
            Ok(w) => u64::from(w),
            Err(_) => return StepOutcome::Exception(Exception::AddressError { address: addr }),
        },
        LoadKind::Double => match bus.read64(addr) {
            Ok(d) => d,
            Err(_) => return StepOutcome::Exception(Exception::AddressError { address: addr }),
        },
        LoadKind::WordLeft => {
            let word = match bus.read32(addr & !0x03) {
                Ok(w) => w,
                Err(_) => {
                    return StepOutcome::Exception(Exception::AddressError { address: addr })
                }
            };
            let current = regs.read(rt) as u32;
            let shift = ((addr & 0x03) * 8) as u32;
            // Big-endian: the addressed byte and everything to its right fill
            // the register from the top, low bytes keep their old value.
            let mask: u32 = if shift == 0 { 0 } else { (1u32 << shift) - 1 };
            sign_extend32((word << shift) | (current & mask))
        }
        LoadKind::WordRight => {
            let word = match bus.read32(addr & !0x03) {
                Ok(w) => w,
                Err(_) => {
                    return StepOutcome::Exception(Exception::AddressError { address: addr })
                }
            };
            let current = regs.read(rt) as u32;
            let shift = ((3 - (addr & 0x03)) * 8) as u32;
            let mask = 0xFFFF_FFFFu32 >> shift;
            sign_extend32((current & !mask) | (word >> shift))
        }
    };

    regs.write(rt, value);
    StepOutcome::Continue
}
