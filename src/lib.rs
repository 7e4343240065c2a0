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

//! Nintendo 64 CPU core emulator library
//!
//! This library emulates the console's VR4300 CPU and its view of the
//! machine: a 64-bit MIPS core with delayed branches, a big-endian memory
//! bus with memory-mapped peripherals, and recoverable per-instruction
//! exceptions.
//!
//! # Example
//!
//! ```no_run
//! use n64rx::core::config::EmulatorConfig;
//! use n64rx::core::rom::Rom;
//! use n64rx::core::system::System;
//!
//! let mut system = System::new(EmulatorConfig::default()).unwrap();
//! let rom = Rom::load("game.z64").unwrap();
//! system.load_rom(rom).unwrap();
//!
//! // Run one video frame worth of emulation.
//! system.tick_frame();
//! ```

pub mod core;
