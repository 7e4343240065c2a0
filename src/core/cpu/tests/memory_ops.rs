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

use super::*;

const DATA: u64 = 0x1000;

/// CPU with r8 pointing at a scratch data area away from the program.
fn setup_with_data(words: &[u32]) -> (Cpu, Bus) {
    let (mut cpu, bus) = setup(words);
    cpu.regs_mut().write(8, DATA);
    (cpu, bus)
}

#[test]
fn test_lb_sign_extends() {
    let (mut cpu, mut bus) = setup_with_data(&[lb(1, 8, 0)]);
    bus.write8(DATA, 0x80).unwrap();
    run(&mut cpu, &mut bus, 1);
    assert_eq!(cpu.regs().read(1), 0xFFFF_FFFF_FFFF_FF80);
}

#[test]
fn test_lbu_zero_extends() {
    let (mut cpu, mut bus) = setup_with_data(&[lbu(1, 8, 0)]);
    bus.write8(DATA, 0x80).unwrap();
    run(&mut cpu, &mut bus, 1);
    assert_eq!(cpu.regs().read(1), 0x80);
}

#[test]
fn test_lh_lhu() {
    let (mut cpu, mut bus) = setup_with_data(&[lh(1, 8, 0), lhu(2, 8, 0)]);
    bus.write16(DATA, 0x8001).unwrap();
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.regs().read(1), 0xFFFF_FFFF_FFFF_8001);
    assert_eq!(cpu.regs().read(2), 0x8001);
}

#[test]
fn test_lw_sign_extends_lwu_does_not() {
    let (mut cpu, mut bus) = setup_with_data(&[lw(1, 8, 0), lwu(2, 8, 0)]);
    bus.write32(DATA, 0x8000_0000).unwrap();
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.regs().read(1), 0xFFFF_FFFF_8000_0000);
    assert_eq!(cpu.regs().read(2), 0x8000_0000);
}

#[test]
fn test_ld_sd_roundtrip() {
    let (mut cpu, mut bus) = setup_with_data(&[sd(9, 8, 0), ld(1, 8, 0)]);
    cpu.regs_mut().write(9, 0x0123_4567_89AB_CDEF);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.regs().read(1), 0x0123_4567_89AB_CDEF);
}

#[test]
fn test_negative_offset_addressing() {
    let (mut cpu, mut bus) = setup_with_data(&[lw(1, 8, 0xFFFC)]); // -4
    bus.write32(DATA - 4, 0xCAFE_F00D).unwrap();
    run(&mut cpu, &mut bus, 1);
    assert_eq!(cpu.regs().read(1), 0xFFFF_FFFF_CAFE_F00D);
}

#[test]
fn test_sb_writes_single_byte() {
    let (mut cpu, mut bus) = setup_with_data(&[sb(9, 8, 1)]);
    bus.write32(DATA, 0x1111_1111).unwrap();
    cpu.regs_mut().write(9, 0xAB);
    run(&mut cpu, &mut bus, 1);
    assert_eq!(bus.read32(DATA).unwrap(), 0x11AB_1111);
}

#[test]
fn test_sh_sw_write_low_bits() {
    let (mut cpu, mut bus) = setup_with_data(&[sh(9, 8, 0), sw(9, 8, 4)]);
    cpu.regs_mut().write(9, 0xFFFF_FFFF_1234_5678);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(bus.read16(DATA).unwrap(), 0x5678);
    assert_eq!(bus.read32(DATA + 4).unwrap(), 0x1234_5678);
}

#[test]
fn test_lwl_lwr_assemble_unaligned_word() {
    // Memory: 00 11 22 33 44 55 66 77. Unaligned word at offset 1 is
    // 0x11223344, assembled with the canonical LWL/LWR pair.
    let (mut cpu, mut bus) = setup_with_data(&[lwl(1, 8, 1), lwr(1, 8, 4)]);
    bus.write64(DATA, 0x0011_2233_4455_6677).unwrap();
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.regs().read(1), 0x1122_3344);
}

#[test]
fn test_lwl_keeps_low_bytes() {
    let (mut cpu, mut bus) = setup_with_data(&[lwl(1, 8, 2)]);
    bus.write32(DATA, 0xAABB_CCDD).unwrap();
    cpu.regs_mut().write(1, 0x1122_3344);
    run(&mut cpu, &mut bus, 1);
    // Bytes CC DD land in the top half, low half keeps 0x3344.
    assert_eq!(cpu.regs().read(1) as u32, 0xCCDD_3344);
}

#[test]
fn test_lwr_keeps_high_bytes() {
    let (mut cpu, mut bus) = setup_with_data(&[lwr(1, 8, 1)]);
    bus.write32(DATA, 0xAABB_CCDD).unwrap();
    cpu.regs_mut().write(1, 0x1122_3344);
    run(&mut cpu, &mut bus, 1);
    // Bytes AA BB land in the low half, high half keeps 0x1122.
    assert_eq!(cpu.regs().read(1) as u32, 0x1122_AABB);
}

#[test]
fn test_swl_swr_store_unaligned_word() {
    let (mut cpu, mut bus) = setup_with_data(&[swl(9, 8, 1), swr(9, 8, 4)]);
    bus.write64(DATA, 0xFFFF_FFFF_FFFF_FFFF).unwrap();
    cpu.regs_mut().write(9, 0x1122_3344);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(bus.read64(DATA).unwrap(), 0xFF11_2233_44FF_FFFF);
}

#[test]
fn test_lwl_never_alignment_faults() {
    for byte in 0..4u16 {
        let (mut cpu, mut bus) = setup_with_data(&[lwl(1, 8, byte)]);
        assert_eq!(cpu.step(&mut bus), StepOutcome::Continue);
    }
}
