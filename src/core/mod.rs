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

//! Core emulation components
//!
//! This module contains all hardware emulation components:
//! - CPU (64-bit MIPS, VR4300 subset)
//! - Memory bus with construction-time range table
//! - Cartridge ROM loading
//! - VI / AI / PIF peripherals
//! - System integration

pub mod audio;
pub mod config;
pub mod cpu;
pub mod error;
pub mod input;
pub mod memory;
pub mod rom;
pub mod system;
pub mod video;

// Re-export commonly used types
pub use audio::AudioInterface;
pub use config::EmulatorConfig;
pub use cpu::{Cpu, CpuState, Exception, StepOutcome};
pub use error::{AccessFault, EmulatorError, Result};
pub use input::{ControllerState, PifInterface};
pub use memory::{Bus, BusBuilder, BusDevice};
pub use rom::Rom;
pub use system::System;
pub use video::VideoInterface;
