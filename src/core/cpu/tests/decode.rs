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
use proptest::prelude::*;

#[test]
fn test_decode_nop() {
    assert_eq!(
        decode(NOP).op,
        Op::Shift {
            kind: ShiftKind::Sll,
            rt: 0,
            rd: 0,
            amount: 0,
        }
    );
}

#[test]
fn test_decode_addu() {
    assert_eq!(
        decode(addu(3, 1, 2)).op,
        Op::Alu {
            kind: AluKind::Addu,
            rs: 1,
            rt: 2,
            rd: 3,
        }
    );
}

#[test]
fn test_decode_addi_sign_extends_immediate() {
    // imm 0xFFFF is -1, pre-extended to all ones.
    assert_eq!(
        decode(addi(2, 1, 0xFFFF)).op,
        Op::AluImm {
            kind: AluImmKind::Addi,
            rs: 1,
            rt: 2,
            imm: u64::MAX,
        }
    );
}

#[test]
fn test_decode_ori_zero_extends_immediate() {
    assert_eq!(
        decode(ori(2, 1, 0xFFFF)).op,
        Op::AluImm {
            kind: AluImmKind::Ori,
            rs: 1,
            rt: 2,
            imm: 0xFFFF,
        }
    );
}

#[test]
fn test_decode_lui_precomputes_value() {
    // 0x8000 << 16 is negative as a 32-bit value; sign-extended at decode.
    assert_eq!(
        decode(lui(5, 0x8000)).op,
        Op::Lui {
            rt: 5,
            imm: 0xFFFF_FFFF_8000_0000,
        }
    );
}

#[test]
fn test_decode_load_negative_offset() {
    assert_eq!(
        decode(lw(4, 29, 0xFFFC)).op,
        Op::Load {
            kind: LoadKind::Word,
            base: 29,
            rt: 4,
            offset: -4,
        }
    );
}

#[test]
fn test_decode_store_double() {
    assert_eq!(
        decode(sd(7, 3, 0x0010)).op,
        Op::Store {
            kind: StoreKind::Double,
            base: 3,
            rt: 7,
            offset: 16,
        }
    );
}

#[test]
fn test_decode_branch_offset_is_preshifted() {
    // Field value 0xFFFF (-1 instruction) becomes -4 bytes.
    assert_eq!(
        decode(beq(1, 2, 0xFFFF)).op,
        Op::Branch {
            cond: BranchCond::Eq,
            rs: 1,
            rt: 2,
            offset: -4,
            link: false,
        }
    );
}

#[test]
fn test_decode_regimm_branches() {
    assert_eq!(
        decode(bltz(9, 0x0004)).op,
        Op::Branch {
            cond: BranchCond::LessZero,
            rs: 9,
            rt: 0,
            offset: 16,
            link: false,
        }
    );
    assert_eq!(
        decode(bgezal(9, 0x0004)).op,
        Op::Branch {
            cond: BranchCond::GreaterEqualZero,
            rs: 9,
            rt: 0,
            offset: 16,
            link: true,
        }
    );
}

#[test]
fn test_decode_jump_target_is_preshifted() {
    assert_eq!(
        decode(j(0x0040_0000)).op,
        Op::Jump {
            target: 0x0040_0000,
            link: false,
        }
    );
    assert_eq!(
        decode(jal(0x0040_0000)).op,
        Op::Jump {
            target: 0x0040_0000,
            link: true,
        }
    );
}

#[test]
fn test_decode_jr_jalr() {
    assert_eq!(
        decode(jr(31)).op,
        Op::JumpReg {
            rs: 31,
            rd: 0,
            link: false,
        }
    );
    assert_eq!(
        decode(jalr(31, 4)).op,
        Op::JumpReg {
            rs: 4,
            rd: 31,
            link: true,
        }
    );
}

#[test]
fn test_decode_dsll32_folds_amount() {
    assert_eq!(
        decode(dsll32(2, 1, 4)).op,
        Op::Shift {
            kind: ShiftKind::Dsll,
            rt: 1,
            rd: 2,
            amount: 36,
        }
    );
}

#[test]
fn test_decode_break() {
    assert_eq!(decode(brk()).op, Op::Break);
}

#[test]
fn test_decode_coprocessor_opcodes_are_reserved() {
    // COP0..COP3 primary opcodes 0x10-0x13.
    for opcode in 0x10..=0x13u32 {
        assert_eq!(decode(opcode << 26).op, Op::Reserved);
    }
    // SYSCALL.
    assert_eq!(decode(0x0000_000C).op, Op::Reserved);
    // CACHE.
    assert_eq!(decode(0x2F << 26).op, Op::Reserved);
    // BEQL (branch likely).
    assert_eq!(decode(0x14 << 26).op, Op::Reserved);
}

#[test]
fn test_decode_preserves_raw_word() {
    let word = addu(3, 1, 2);
    assert_eq!(decode(word).raw, word);
}

proptest! {
    // Decoding is total and deterministic over the whole 32-bit space.
    #[test]
    fn decode_is_total_and_deterministic(word in any::<u32>()) {
        let a = decode(word);
        let b = decode(word);
        prop_assert_eq!(a, b);
        prop_assert_eq!(a.raw, word);
    }
}
