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

//! Instruction decoder
//!
//! `decode` is a pure, total function: it never fails and has no side
//! effects. Unrecognized opcode patterns decode to [`Op::Reserved`] so that
//! trap generation lives in one place, the execution unit.
//!
//! Bit-field layout (MIPS fixed encoding):
//!
//! - R-type: | op (6) | rs (5) | rt (5) | rd (5) | shamt (5) | funct (6) |
//! - I-type: | op (6) | rs (5) | rt (5) | immediate (16) |
//! - J-type: | op (6) | target (26) |

use super::instruction::{
    AluImmKind, AluKind, BranchCond, HiLoKind, Instruction, LoadKind, MulDivKind, Op, ShiftKind,
    StoreKind,
};

#[inline(always)]
fn rs(word: u32) -> u8 {
    ((word >> 21) & 0x1F) as u8
}

#[inline(always)]
fn rt(word: u32) -> u8 {
    ((word >> 16) & 0x1F) as u8
}

#[inline(always)]
fn rd(word: u32) -> u8 {
    ((word >> 11) & 0x1F) as u8
}

#[inline(always)]
fn shamt(word: u32) -> u8 {
    ((word >> 6) & 0x1F) as u8
}

#[inline(always)]
fn imm(word: u32) -> u16 {
    (word & 0xFFFF) as u16
}

/// Immediate sign-extended to 64 bits (arithmetic/compare/load families).
#[inline(always)]
fn imm_signed(word: u32) -> u64 {
    imm(word) as i16 as i64 as u64
}

/// Immediate zero-extended to 64 bits (bitwise family).
#[inline(always)]
fn imm_zero(word: u32) -> u64 {
    u64::from(imm(word))
}

/// Branch displacement: sign-extended and pre-shifted to a byte offset.
#[inline(always)]
fn branch_offset(word: u32) -> i64 {
    i64::from(imm(word) as i16) << 2
}

/// Decode a raw 32-bit instruction word.
///
/// # Example
/// ```
/// use n64rx::core::cpu::{decode, Op};
///
/// // addiu r1, r0, 5
/// let instr = decode(0x2401_0005);
/// assert!(matches!(instr.op, Op::AluImm { .. }));
/// assert_eq!(instr.raw, 0x2401_0005);
/// ```
pub fn decode(word: u32) -> Instruction {
    let op = match word >> 26 {
        0x00 => decode_special(word),
        0x01 => decode_regimm(word),
        0x02 => Op::Jump {
            target: (word & 0x03FF_FFFF) << 2,
            link: false,
        },
        0x03 => Op::Jump {
            target: (word & 0x03FF_FFFF) << 2,
            link: true,
        },
        0x04 => branch(word, BranchCond::Eq),
        0x05 => branch(word, BranchCond::Ne),
        0x06 => branch(word, BranchCond::LessEqualZero),
        0x07 => branch(word, BranchCond::GreaterZero),
        0x08 => alu_imm(word, AluImmKind::Addi, imm_signed(word)),
        0x09 => alu_imm(word, AluImmKind::Addiu, imm_signed(word)),
        0x0A => alu_imm(word, AluImmKind::Slti, imm_signed(word)),
        0x0B => alu_imm(word, AluImmKind::Sltiu, imm_signed(word)),
        0x0C => alu_imm(word, AluImmKind::Andi, imm_zero(word)),
        0x0D => alu_imm(word, AluImmKind::Ori, imm_zero(word)),
        0x0E => alu_imm(word, AluImmKind::Xori, imm_zero(word)),
        0x0F => Op::Lui {
            rt: rt(word),
            imm: (u64::from(imm(word)) << 16) as u32 as i32 as i64 as u64,
        },
        0x18 => alu_imm(word, AluImmKind::Daddi, imm_signed(word)),
        0x19 => alu_imm(word, AluImmKind::Daddiu, imm_signed(word)),
        0x20 => load(word, LoadKind::Byte),
        0x21 => load(word, LoadKind::Half),
        0x22 => load(word, LoadKind::WordLeft),
        0x23 => load(word, LoadKind::Word),
        0x24 => load(word, LoadKind::ByteUnsigned),
        0x25 => load(word, LoadKind::HalfUnsigned),
        0x26 => load(word, LoadKind::WordRight),
        0x27 => load(word, LoadKind::WordUnsigned),
        0x28 => store(word, StoreKind::Byte),
        0x29 => store(word, StoreKind::Half),
        0x2A => store(word, StoreKind::WordLeft),
        0x2B => store(word, StoreKind::Word),
        0x2E => store(word, StoreKind::WordRight),
        0x37 => load(word, LoadKind::Double),
        0x3F => store(word, StoreKind::Double),
        // COPz (0x10-0x13), CACHE (0x2F), branch-likely and everything else
        _ => Op::Reserved,
    };

    Instruction { raw: word, op }
}

/// SPECIAL instructions (primary opcode 0x00), selected by the funct field.
fn decode_special(word: u32) -> Op {
    match word & 0x3F {
        0x00 => shift(word, ShiftKind::Sll, 0),
        0x02 => shift(word, ShiftKind::Srl, 0),
        0x03 => shift(word, ShiftKind::Sra, 0),
        0x04 => shift_reg(word, ShiftKind::Sll),
        0x06 => shift_reg(word, ShiftKind::Srl),
        0x07 => shift_reg(word, ShiftKind::Sra),
        0x08 => Op::JumpReg {
            rs: rs(word),
            rd: 0,
            link: false,
        },
        0x09 => Op::JumpReg {
            rs: rs(word),
            rd: rd(word),
            link: true,
        },
        0x0D => Op::Break,
        0x10 => Op::HiLo {
            kind: HiLoKind::MoveFromHi,
            reg: rd(word),
        },
        0x11 => Op::HiLo {
            kind: HiLoKind::MoveToHi,
            reg: rs(word),
        },
        0x12 => Op::HiLo {
            kind: HiLoKind::MoveFromLo,
            reg: rd(word),
        },
        0x13 => Op::HiLo {
            kind: HiLoKind::MoveToLo,
            reg: rs(word),
        },
        0x14 => shift_reg(word, ShiftKind::Dsll),
        0x16 => shift_reg(word, ShiftKind::Dsrl),
        0x17 => shift_reg(word, ShiftKind::Dsra),
        0x18 => mul_div(word, MulDivKind::Mult),
        0x19 => mul_div(word, MulDivKind::Multu),
        0x1A => mul_div(word, MulDivKind::Div),
        0x1B => mul_div(word, MulDivKind::Divu),
        0x20 => alu(word, AluKind::Add),
        0x21 => alu(word, AluKind::Addu),
        0x22 => alu(word, AluKind::Sub),
        0x23 => alu(word, AluKind::Subu),
        0x24 => alu(word, AluKind::And),
        0x25 => alu(word, AluKind::Or),
        0x26 => alu(word, AluKind::Xor),
        0x27 => alu(word, AluKind::Nor),
        0x2A => alu(word, AluKind::Slt),
        0x2B => alu(word, AluKind::Sltu),
        0x2C => alu(word, AluKind::Dadd),
        0x2D => alu(word, AluKind::Daddu),
        0x2E => alu(word, AluKind::Dsub),
        0x2F => alu(word, AluKind::Dsubu),
        0x38 => shift(word, ShiftKind::Dsll, 0),
        0x3A => shift(word, ShiftKind::Dsrl, 0),
        0x3B => shift(word, ShiftKind::Dsra, 0),
        0x3C => shift(word, ShiftKind::Dsll, 32),
        0x3E => shift(word, ShiftKind::Dsrl, 32),
        0x3F => shift(word, ShiftKind::Dsra, 32),
        // SYSCALL (0x0C), the trap forms and DMULT/DDIV family included
        _ => Op::Reserved,
    }
}

/// REGIMM branches (primary opcode 0x01), selected by the rt field.
///
/// Bit 0 of rt picks >= vs < zero; bit 4 picks the and-link form.
fn decode_regimm(word: u32) -> Op {
    let cond = match rt(word) & 0x01 {
        0 => BranchCond::LessZero,
        _ => BranchCond::GreaterEqualZero,
    };
    match rt(word) & !0x11 {
        0x00 => Op::Branch {
            cond,
            rs: rs(word),
            rt: 0,
            offset: branch_offset(word),
            link: rt(word) & 0x10 != 0,
        },
        _ => Op::Reserved,
    }
}

fn alu(word: u32, kind: AluKind) -> Op {
    Op::Alu {
        kind,
        rs: rs(word),
        rt: rt(word),
        rd: rd(word),
    }
}

fn alu_imm(word: u32, kind: AluImmKind, imm: u64) -> Op {
    Op::AluImm {
        kind,
        rs: rs(word),
        rt: rt(word),
        imm,
    }
}

fn shift(word: u32, kind: ShiftKind, extra: u8) -> Op {
    Op::Shift {
        kind,
        rt: rt(word),
        rd: rd(word),
        amount: shamt(word) + extra,
    }
}

fn shift_reg(word: u32, kind: ShiftKind) -> Op {
    Op::ShiftReg {
        kind,
        rs: rs(word),
        rt: rt(word),
        rd: rd(word),
    }
}

fn branch(word: u32, cond: BranchCond) -> Op {
    Op::Branch {
        cond,
        rs: rs(word),
        rt: rt(word),
        offset: branch_offset(word),
        link: false,
    }
}

fn load(word: u32, kind: LoadKind) -> Op {
    Op::Load {
        kind,
        base: rs(word),
        rt: rt(word),
        offset: imm_signed(word) as i64,
    }
}

fn store(word: u32, kind: StoreKind) -> Op {
    Op::Store {
        kind,
        base: rs(word),
        rt: rt(word),
        offset: imm_signed(word) as i64,
    }
}

fn mul_div(word: u32, kind: MulDivKind) -> Op {
    Op::MulDiv {
        kind,
        rs: rs(word),
        rt: rt(word),
    }
}
