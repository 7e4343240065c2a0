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

//! Decoded instruction model
//!
//! [`Instruction`] is a transient value produced fresh each cycle by the
//! decoder. The [`Op`] descriptor carries everything the execution unit
//! needs: immediates are already sign- or zero-extended per instruction
//! family and branch displacements pre-shifted, so raw bit fields are never
//! re-inspected after decode.

/// A decoded instruction: the raw word plus its operation descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Raw 32-bit instruction word, kept for fault reporting.
    pub raw: u32,
    /// Decoded operation.
    pub op: Op,
}

/// Operation descriptor, grouped by execution family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Three-register ALU operation.
    Alu {
        kind: AluKind,
        rs: u8,
        rt: u8,
        rd: u8,
    },
    /// Register-immediate ALU operation. `imm` is already extended:
    /// sign-extended for the arithmetic/compare forms, zero-extended for the
    /// bitwise forms.
    AluImm {
        kind: AluImmKind,
        rs: u8,
        rt: u8,
        imm: u64,
    },
    /// Constant-amount shift. The 32-suffixed doubleword forms fold their
    /// extra 32 into `amount` at decode time.
    Shift {
        kind: ShiftKind,
        rt: u8,
        rd: u8,
        amount: u8,
    },
    /// Variable-amount shift; the amount comes from rs and is masked per
    /// operand width at execute time.
    ShiftReg {
        kind: ShiftKind,
        rs: u8,
        rt: u8,
        rd: u8,
    },
    /// Load upper immediate; `imm` is the already shifted and sign-extended
    /// 64-bit value to store.
    Lui { rt: u8, imm: u64 },
    /// Memory load. `offset` is the sign-extended displacement from base.
    Load {
        kind: LoadKind,
        base: u8,
        rt: u8,
        offset: i64,
    },
    /// Memory store.
    Store {
        kind: StoreKind,
        base: u8,
        rt: u8,
        offset: i64,
    },
    /// Conditional branch. `offset` is the byte displacement from the delay
    /// slot, already shifted left by two and sign-extended. `link` writes
    /// r31 for the and-link forms.
    Branch {
        cond: BranchCond,
        rs: u8,
        rt: u8,
        offset: i64,
        link: bool,
    },
    /// Absolute jump within the current 256MB segment; `target` is the
    /// 26-bit index already shifted left by two.
    Jump { target: u32, link: bool },
    /// Jump through a register, optionally linking into rd.
    JumpReg { rs: u8, rd: u8, link: bool },
    /// Multiply or divide into HI/LO.
    MulDiv { kind: MulDivKind, rs: u8, rt: u8 },
    /// HI/LO register transfer. `reg` is rd for the move-from forms and rs
    /// for the move-to forms.
    HiLo { kind: HiLoKind, reg: u8 },
    /// Explicit halt.
    Break,
    /// Anything this core does not implement: reserved encodings, all
    /// coprocessor opcodes, SYSCALL, CACHE, branch-likely forms. Executing
    /// one is a first-class reserved-instruction outcome, never a crash.
    Reserved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluKind {
    /// 32-bit add, faults on signed overflow.
    Add,
    /// 32-bit add, wraps.
    Addu,
    /// 32-bit subtract, faults on signed overflow.
    Sub,
    /// 32-bit subtract, wraps.
    Subu,
    And,
    Or,
    Xor,
    Nor,
    /// Signed set-on-less-than.
    Slt,
    /// Unsigned set-on-less-than.
    Sltu,
    /// 64-bit add, faults on signed overflow.
    Dadd,
    /// 64-bit add, wraps.
    Daddu,
    /// 64-bit subtract, faults on signed overflow.
    Dsub,
    /// 64-bit subtract, wraps.
    Dsubu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluImmKind {
    /// Faults on signed overflow.
    Addi,
    Addiu,
    Slti,
    Sltiu,
    Andi,
    Ori,
    Xori,
    /// Faults on signed overflow.
    Daddi,
    Daddiu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftKind {
    /// 32-bit logical left; result sign-extended.
    Sll,
    /// 32-bit logical right; result sign-extended as a 32-bit value.
    Srl,
    /// 32-bit arithmetic right.
    Sra,
    /// 64-bit logical left.
    Dsll,
    /// 64-bit logical right.
    Dsrl,
    /// 64-bit arithmetic right.
    Dsra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// LB: sign-extended byte.
    Byte,
    /// LBU: zero-extended byte.
    ByteUnsigned,
    /// LH: sign-extended halfword.
    Half,
    /// LHU: zero-extended halfword.
    HalfUnsigned,
    /// LW: sign-extended word.
    Word,
    /// LWU: zero-extended word.
    WordUnsigned,
    /// LWL: merge the left part of an unaligned word.
    WordLeft,
    /// LWR: merge the right part of an unaligned word.
    WordRight,
    /// LD: doubleword.
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Byte,
    Half,
    Word,
    WordLeft,
    WordRight,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchCond {
    /// rs == rt
    Eq,
    /// rs != rt
    Ne,
    /// rs <= 0 (signed)
    LessEqualZero,
    /// rs > 0 (signed)
    GreaterZero,
    /// rs < 0 (signed)
    LessZero,
    /// rs >= 0 (signed)
    GreaterEqualZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulDivKind {
    Mult,
    Multu,
    Div,
    Divu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiLoKind {
    MoveFromHi,
    MoveToHi,
    MoveFromLo,
    MoveToLo,
}
