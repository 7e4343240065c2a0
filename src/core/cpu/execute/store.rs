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

//! Store instructions
//!
//! A faulting address raises the exception before any memory is modified.
//! SWL/SWR read-modify-write the aligned word containing the address.

use super::super::registers::Registers;
use super::super::{Exception, StepOutcome};
use crate::core::cpu::instruction::StoreKind;
use crate::core::memory::Bus;

pub(super) fn store(
    kind: StoreKind,
    base: u8,
    rt: u8,
    offset: i64,
    regs: &mut Registers,
    bus: &mut Bus,
) -> StepOutcome {
    let addr = regs.read(base).wrapping_add(offset as u64);
    let value = regs.read(rt);

    let result = match kind {
        StoreKind::Byte => bus.write8(addr, value as u8),
        StoreKind::Half => bus.write16(addr, value as u16),
        StoreKind::Word => bus.write32(addr, value as u32),
        StoreKind::Double => bus.write64(addr, value),
        StoreKind::WordLeft => {
            let aligned = addr & !0x03;
            let mem = match bus.read32(aligned) {
                Ok(w) => w,
                Err(_) => {
                    return StepOutcome::Exception(Exception::AddressError { address: addr })
                }
            };
            let shift = ((addr & 0x03) * 8) as u32;
            let merged = (mem & !(0xFFFF_FFFFu32 >> shift)) | ((value as u32) >> shift);
            bus.write32(aligned, merged)
        }
        StoreKind::WordRight => {
            let aligned = addr & !0x03;
            let mem = match bus.read32(aligned) {
                Ok(w) => w,
                Err(_) => {
                    return StepOutcome::Exception(Exception::AddressError { address: addr })
                }
            };
            let shift = ((3 - (addr & 0x03)) * 8) as u32;
            let merged = (mem & !(0xFFFF_FFFFu32 << shift)) | ((value as u32) << shift);
            bus.write32(aligned, merged)
        }
    };

    match result {
        Ok(()) => StepOutcome::Continue,
        Err(_) => StepOutcome::Exception(Exception::AddressError { address: addr }),
    }
}
