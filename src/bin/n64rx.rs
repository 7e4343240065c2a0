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

use clap::Parser;
use log::{error, info, warn};
use n64rx::core::config::EmulatorConfig;
use n64rx::core::cpu::StepOutcome;
use n64rx::core::error::Result;
use n64rx::core::rom::Rom;
use n64rx::core::system::System;

/// Nintendo 64 CPU core emulator
#[derive(Parser)]
#[command(name = "n64rx")]
#[command(about = "Nintendo 64 CPU core emulator", long_about = None)]
struct Args {
    /// Path to a ROM image (.z64, .v64 or .n64)
    rom_file: String,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Fit the Expansion Pak (8 MiB RDRAM)
    #[arg(long)]
    expansion_pak: bool,

    /// Number of frames to emulate
    #[arg(short = 'n', long, default_value = "600")]
    frames: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("n64rx v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EmulatorConfig::load(path)?,
        None => EmulatorConfig::default(),
    };
    if args.expansion_pak {
        config.expansion_pak = true;
    }

    info!("Loading ROM from: {}", args.rom_file);
    let rom = match Rom::load(&args.rom_file) {
        Ok(rom) => rom,
        Err(e) => {
            error!("Failed to load ROM: {}", e);
            return Err(e);
        }
    };

    let mut system = System::new(config)?;
    system.load_rom(rom)?;

    info!("Starting emulation...");

    let log_interval = (args.frames / 10).max(1);

    for frame in 0..args.frames {
        if frame % log_interval == 0 && frame > 0 {
            info!(
                "Frame {}/{} | PC: 0x{:016X} | retired: {}",
                frame,
                args.frames,
                system.cpu().regs().pc(),
                system.cpu().retired()
            );
        }

        match system.tick_frame() {
            StepOutcome::Continue => {}
            StepOutcome::Exception(cause) => {
                error!(
                    "CPU fault after {} instructions: {:?}",
                    system.cpu().retired(),
                    cause
                );
                error!("PC: 0x{:016X}", system.cpu().regs().pc());
                system.cpu().dump_registers();
                std::process::exit(1);
            }
            StepOutcome::Halted => {
                warn!(
                    "CPU halted after {} instructions",
                    system.cpu().retired()
                );
                break;
            }
        }
    }

    info!("Emulation finished");
    info!("Frames: {}", system.frames());
    info!("Instructions retired: {}", system.cpu().retired());
    info!("Final PC: 0x{:016X}", system.cpu().regs().pc());

    Ok(())
}
