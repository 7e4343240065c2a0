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

#[test]
fn test_cpu_initialization() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs().pc(), RESET_VECTOR);
    assert_eq!(cpu.state(), CpuState::Running);
    assert_eq!(cpu.retired(), 0);
    assert_eq!(cpu.regs().read(0), 0);
}

#[test]
fn test_register_r0_is_hardwired() {
    let mut cpu = Cpu::new();
    cpu.regs_mut().write(0, 0xDEAD_BEEF);
    assert_eq!(cpu.regs().read(0), 0);
}

#[test]
fn test_register_read_write() {
    let mut cpu = Cpu::new();
    cpu.regs_mut().write(5, 0x1234_5678_9ABC_DEF0);
    assert_eq!(cpu.regs().read(5), 0x1234_5678_9ABC_DEF0);
}

#[test]
fn test_cpu_reset() {
    let mut cpu = Cpu::new();

    cpu.regs_mut().write(1, 0xFFFF_FFFF);
    cpu.regs_mut().set_pc(0x8000_0000);
    cpu.regs_mut().set_hi(0x1234_5678);
    cpu.regs_mut().set_lo(0x8765_4321);

    cpu.reset();

    assert_eq!(cpu.regs().read(1), 0);
    assert_eq!(cpu.regs().pc(), RESET_VECTOR);
    assert_eq!(cpu.regs().hi(), 0);
    assert_eq!(cpu.regs().lo(), 0);
    assert_eq!(cpu.state(), CpuState::Running);
    assert_eq!(cpu.retired(), 0);
}

#[test]
fn test_multiple_registers() {
    let mut cpu = Cpu::new();

    for i in 1..32u8 {
        cpu.regs_mut().write(i, u64::from(i) * 100);
    }

    for i in 1..32u8 {
        assert_eq!(cpu.regs().read(i), u64::from(i) * 100);
    }

    assert_eq!(cpu.regs().read(0), 0);
}

#[test]
fn test_nop_advances_pc() {
    let (mut cpu, mut bus) = setup(&[NOP, NOP, NOP]);
    run(&mut cpu, &mut bus, 3);
    assert_eq!(cpu.regs().pc(), 12);
    assert_eq!(cpu.retired(), 3);
}

#[test]
fn test_write_to_r0_via_instruction_is_dropped() {
    // ori r0, r0, 0xFFFF must not stick.
    let (mut cpu, mut bus) = setup(&[ori(0, 0, 0xFFFF)]);
    run(&mut cpu, &mut bus, 1);
    assert_eq!(cpu.regs().read(0), 0);
}

#[test]
fn test_retired_counts_only_completed_instructions() {
    let (mut cpu, mut bus) = setup(&[NOP, add(1, 2, 3), NOP]);
    // Force an overflow on the second instruction.
    cpu.regs_mut().write(2, 0x7FFF_FFFF);
    cpu.regs_mut().write(3, 1);

    assert_eq!(cpu.step(&mut bus), StepOutcome::Continue);
    assert!(matches!(cpu.step(&mut bus), StepOutcome::Exception(_)));
    assert_eq!(cpu.retired(), 1);
}

#[test]
fn test_step_after_halt_reports_halted() {
    let (mut cpu, mut bus) = setup(&[brk(), NOP]);
    assert_eq!(cpu.step(&mut bus), StepOutcome::Halted);
    assert_eq!(cpu.state(), CpuState::Halted);

    let pc = cpu.regs().pc();
    assert_eq!(cpu.step(&mut bus), StepOutcome::Halted);
    assert_eq!(cpu.regs().pc(), pc);
}

#[test]
fn test_reset_recovers_from_fault() {
    let (mut cpu, mut bus) = setup(&[lw(1, 0, 1)]); // misaligned load
    assert!(matches!(cpu.step(&mut bus), StepOutcome::Exception(_)));
    assert_eq!(cpu.state(), CpuState::Faulted);

    cpu.reset();
    assert_eq!(cpu.state(), CpuState::Running);
}
