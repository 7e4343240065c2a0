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

//! System integration module
//!
//! Ties the CPU core, the memory bus and the peripherals together into a
//! console and provides the emulation loop.
//!
//! ## Physical memory map
//!
//! ```text
//! 0x00000000  RDRAM          4 MiB (8 MiB with Expansion Pak)
//! 0x04000000  RSP DMEM/IMEM  8 KiB
//! 0x04400000  VI registers
//! 0x04500000  AI registers
//! 0x10000000  Cartridge ROM  (read-only)
//! 0x1FC007C0  PIF RAM        64 bytes
//! ```
//!
//! Everything else is open bus.

#[cfg(test)]
mod tests;

use std::cell::RefCell;
use std::rc::Rc;

use super::audio::AudioInterface;
use super::config::EmulatorConfig;
use super::cpu::{Cpu, CpuState, StepOutcome};
use super::error::Result;
use super::input::{ControllerState, PifInterface};
use super::memory::{Bus, BusBuilder};
use super::rom::Rom;
use super::video::VideoInterface;

pub const RDRAM_BASE: u32 = 0x0000_0000;
pub const SP_MEM_BASE: u32 = 0x0400_0000;
pub const SP_MEM_SIZE: u32 = 0x2000;
pub const VI_BASE: u32 = 0x0440_0000;
pub const AI_BASE: u32 = 0x0450_0000;
pub const CART_ROM_BASE: u32 = 0x1000_0000;
pub const PIF_RAM_BASE: u32 = 0x1FC0_07C0;

/// The boot stub copies at most 1 MiB of the cartridge into RAM.
const BOOT_COPY_LIMIT: usize = 0x10_0000;

/// Half-lines of scan-out per frame, matching the VI power-on state.
const LINES_PER_FRAME: u64 = 524;

/// The emulated console.
///
/// # Example
/// ```no_run
/// use n64rx::core::config::EmulatorConfig;
/// use n64rx::core::rom::Rom;
/// use n64rx::core::system::System;
///
/// let mut system = System::new(EmulatorConfig::default()).unwrap();
/// let rom = Rom::load("game.z64").unwrap();
/// system.load_rom(rom).unwrap();
/// system.tick_frame();
/// ```
pub struct System {
    cpu: Cpu,
    bus: Bus,
    config: EmulatorConfig,
    vi: Rc<RefCell<VideoInterface>>,
    ai: Rc<RefCell<AudioInterface>>,
    pif: Rc<RefCell<PifInterface>>,
    rom_name: Option<String>,
}

impl System {
    /// Build the console without a cartridge inserted.
    pub fn new(config: EmulatorConfig) -> Result<Self> {
        let vi = Rc::new(RefCell::new(VideoInterface::new()));
        let ai = Rc::new(RefCell::new(AudioInterface::new()));
        let pif = Rc::new(RefCell::new(PifInterface::new()));

        let bus = Self::build_bus(&config, None, &vi, &ai, &pif)?;

        log::info!(
            "System initialized: {} MiB RDRAM",
            config.rdram_size() / 0x10_0000
        );

        Ok(Self {
            cpu: Cpu::new(),
            bus,
            config,
            vi,
            ai,
            pif,
            rom_name: None,
        })
    }

    fn build_bus(
        config: &EmulatorConfig,
        cart: Option<Vec<u8>>,
        vi: &Rc<RefCell<VideoInterface>>,
        ai: &Rc<RefCell<AudioInterface>>,
        pif: &Rc<RefCell<PifInterface>>,
    ) -> Result<Bus> {
        let mut builder = BusBuilder::new()
            .ram(RDRAM_BASE, config.rdram_size())
            .ram(SP_MEM_BASE, SP_MEM_SIZE)
            .device(VI_BASE, vi.clone())
            .device(AI_BASE, ai.clone())
            .device(PIF_RAM_BASE, pif.clone());

        if let Some(image) = cart {
            builder = builder.rom(CART_ROM_BASE, image);
        }

        builder.build()
    }

    /// Insert a cartridge and run the boot stub: map the ROM, copy the boot
    /// payload to the entry point and aim the CPU at it.
    pub fn load_rom(&mut self, rom: Rom) -> Result<()> {
        self.bus = Self::build_bus(
            &self.config,
            Some(rom.data().to_vec()),
            &self.vi,
            &self.ai,
            &self.pif,
        )?;

        let entry = i64::from(rom.entry_point() as i32) as u64;
        let payload = rom.boot_payload();
        let copy_len = payload.len().min(BOOT_COPY_LIMIT);
        self.bus.write_block(entry, &payload[..copy_len])?;

        self.cpu.reset();
        self.cpu.regs_mut().set_pc(entry);

        log::info!(
            "Booting \"{}\": {} bytes at 0x{:016X}",
            rom.name(),
            copy_len,
            entry
        );
        self.rom_name = Some(rom.name().to_string());
        Ok(())
    }

    /// Execute one CPU instruction.
    pub fn step(&mut self) -> StepOutcome {
        self.cpu.step(&mut self.bus)
    }

    /// Run one video frame worth of emulation.
    ///
    /// Interleaves CPU execution with VI scan-out so that wait-for-vblank
    /// loops observe a moving beam, then services the audio FIFO and the
    /// controller port. Stops early on the first non-continuing outcome.
    pub fn tick_frame(&mut self) -> StepOutcome {
        let budget = self.config.instructions_per_frame.max(1);
        let line_interval = (budget / LINES_PER_FRAME).max(1);

        for executed in 0..budget {
            let outcome = self.cpu.step(&mut self.bus);
            if outcome != StepOutcome::Continue {
                return outcome;
            }
            if executed % line_interval == 0 {
                self.vi.borrow_mut().tick_line();
            }
        }

        self.ai.borrow_mut().process();
        self.pif.borrow_mut().poll();
        StepOutcome::Continue
    }

    /// Update the attached controller's state.
    pub fn set_controller(&mut self, state: ControllerState) {
        self.pif.borrow_mut().set_controller(state);
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn state(&self) -> CpuState {
        self.cpu.state()
    }

    /// Internal name of the inserted cartridge, if any.
    pub fn rom_name(&self) -> Option<&str> {
        self.rom_name.as_deref()
    }

    /// Frames completed since power-on.
    pub fn frames(&self) -> u64 {
        self.vi.borrow().frames()
    }
}
