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

//! CPU test modules
//!
//! Tests are organized into the following categories:
//! - `basic`: CPU initialization, reset, register access, PC handling
//! - `decode`: Instruction word decoding
//! - `alu`: Arithmetic, logical, shift and multiply/divide execution
//! - `memory_ops`: Loads, stores and the unaligned merge instructions
//! - `delay_slot`: Branch delay slot behavior
//! - `exceptions`: Overflow, address error, reserved opcodes, BREAK

mod basic;
mod decode;
mod memory_ops;

use super::*;
use crate::core::memory::{Bus, BusBuilder};

/// RAM-only bus starting at address 0, zero-filled.
fn test_bus(size: u32) -> Bus {
    BusBuilder::new().ram(0, size).build().unwrap()
}

/// Write a program as big-endian instruction words starting at `base`.
fn load_program(bus: &mut Bus, base: u64, words: &[u32]) {
    for (i, word) in words.iter().enumerate() {
        bus.write32(base + (i as u64) * 4, *word).unwrap();
    }
}

/// CPU at PC 0 over a fresh 64 KiB RAM bus running the given program.
fn setup(words: &[u32]) -> (Cpu, Bus) {
    let mut bus = test_bus(0x10000);
    load_program(&mut bus, 0, words);
    let mut cpu = Cpu::new();
    cpu.regs_mut().set_pc(0);
    (cpu, bus)
}

/// Step `n` instructions, asserting each one retires normally.
fn run(cpu: &mut Cpu, bus: &mut Bus, n: usize) {
    for i in 0..n {
        assert_eq!(
            cpu.step(bus),
            StepOutcome::Continue,
            "instruction {} did not retire",
            i
        );
    }
}

// Instruction word encoders. Field layout:
//   R: opcode | rs | rt | rd | shamt | funct
//   I: opcode | rs | rt | imm16
//   J: opcode | instr_index26

fn r_type(funct: u32, rs: u8, rt: u8, rd: u8, shamt: u8) -> u32 {
    (u32::from(rs) << 21)
        | (u32::from(rt) << 16)
        | (u32::from(rd) << 11)
        | (u32::from(shamt) << 6)
        | funct
}

fn i_type(opcode: u32, rs: u8, rt: u8, imm: u16) -> u32 {
    (opcode << 26) | (u32::from(rs) << 21) | (u32::from(rt) << 16) | u32::from(imm)
}

fn regimm(rt_field: u32, rs: u8, imm: u16) -> u32 {
    (0x01 << 26) | (u32::from(rs) << 21) | (rt_field << 16) | u32::from(imm)
}

const NOP: u32 = 0;

fn add(rd: u8, rs: u8, rt: u8) -> u32 {
    r_type(0x20, rs, rt, rd, 0)
}

fn addu(rd: u8, rs: u8, rt: u8) -> u32 {
    r_type(0x21, rs, rt, rd, 0)
}

fn sub(rd: u8, rs: u8, rt: u8) -> u32 {
    r_type(0x22, rs, rt, rd, 0)
}

fn dadd(rd: u8, rs: u8, rt: u8) -> u32 {
    r_type(0x2C, rs, rt, rd, 0)
}

fn and(rd: u8, rs: u8, rt: u8) -> u32 {
    r_type(0x24, rs, rt, rd, 0)
}

fn or(rd: u8, rs: u8, rt: u8) -> u32 {
    r_type(0x25, rs, rt, rd, 0)
}

fn nor(rd: u8, rs: u8, rt: u8) -> u32 {
    r_type(0x27, rs, rt, rd, 0)
}

fn slt(rd: u8, rs: u8, rt: u8) -> u32 {
    r_type(0x2A, rs, rt, rd, 0)
}

fn sltu(rd: u8, rs: u8, rt: u8) -> u32 {
    r_type(0x2B, rs, rt, rd, 0)
}

fn sll(rd: u8, rt: u8, shamt: u8) -> u32 {
    r_type(0x00, 0, rt, rd, shamt)
}

fn srl(rd: u8, rt: u8, shamt: u8) -> u32 {
    r_type(0x02, 0, rt, rd, shamt)
}

fn sra(rd: u8, rt: u8, shamt: u8) -> u32 {
    r_type(0x03, 0, rt, rd, shamt)
}

fn dsll32(rd: u8, rt: u8, shamt: u8) -> u32 {
    r_type(0x3C, 0, rt, rd, shamt)
}

fn sllv(rd: u8, rt: u8, rs: u8) -> u32 {
    r_type(0x04, rs, rt, rd, 0)
}

fn mult(rs: u8, rt: u8) -> u32 {
    r_type(0x18, rs, rt, 0, 0)
}

fn div(rs: u8, rt: u8) -> u32 {
    r_type(0x1A, rs, rt, 0, 0)
}

fn divu(rs: u8, rt: u8) -> u32 {
    r_type(0x1B, rs, rt, 0, 0)
}

fn mfhi(rd: u8) -> u32 {
    r_type(0x10, 0, 0, rd, 0)
}

fn mflo(rd: u8) -> u32 {
    r_type(0x12, 0, 0, rd, 0)
}

fn jr(rs: u8) -> u32 {
    r_type(0x08, rs, 0, 0, 0)
}

fn jalr(rd: u8, rs: u8) -> u32 {
    r_type(0x09, rs, 0, rd, 0)
}

fn brk() -> u32 {
    r_type(0x0D, 0, 0, 0, 0)
}

fn addi(rt: u8, rs: u8, imm: u16) -> u32 {
    i_type(0x08, rs, rt, imm)
}

fn addiu(rt: u8, rs: u8, imm: u16) -> u32 {
    i_type(0x09, rs, rt, imm)
}

fn daddiu(rt: u8, rs: u8, imm: u16) -> u32 {
    i_type(0x19, rs, rt, imm)
}

fn slti(rt: u8, rs: u8, imm: u16) -> u32 {
    i_type(0x0A, rs, rt, imm)
}

fn andi(rt: u8, rs: u8, imm: u16) -> u32 {
    i_type(0x0C, rs, rt, imm)
}

fn ori(rt: u8, rs: u8, imm: u16) -> u32 {
    i_type(0x0D, rs, rt, imm)
}

fn lui(rt: u8, imm: u16) -> u32 {
    i_type(0x0F, 0, rt, imm)
}

fn lb(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x20, base, rt, off)
}

fn lh(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x21, base, rt, off)
}

fn lwl(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x22, base, rt, off)
}

fn lw(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x23, base, rt, off)
}

fn lbu(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x24, base, rt, off)
}

fn lhu(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x25, base, rt, off)
}

fn lwr(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x26, base, rt, off)
}

fn lwu(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x27, base, rt, off)
}

fn ld(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x37, base, rt, off)
}

fn sb(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x28, base, rt, off)
}

fn sh(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x29, base, rt, off)
}

fn swl(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x2A, base, rt, off)
}

fn sw(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x2B, base, rt, off)
}

fn swr(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x2E, base, rt, off)
}

fn sd(rt: u8, base: u8, off: u16) -> u32 {
    i_type(0x3F, base, rt, off)
}

fn beq(rs: u8, rt: u8, off: u16) -> u32 {
    i_type(0x04, rs, rt, off)
}

fn bne(rs: u8, rt: u8, off: u16) -> u32 {
    i_type(0x05, rs, rt, off)
}

fn bgtz(rs: u8, off: u16) -> u32 {
    i_type(0x07, rs, 0, off)
}

fn bltz(rs: u8, off: u16) -> u32 {
    regimm(0x00, rs, off)
}

fn bgezal(rs: u8, off: u16) -> u32 {
    regimm(0x11, rs, off)
}

fn j(addr: u32) -> u32 {
    (0x02 << 26) | ((addr >> 2) & 0x03FF_FFFF)
}

fn jal(addr: u32) -> u32 {
    (0x03 << 26) | ((addr >> 2) & 0x03FF_FFFF)
}
