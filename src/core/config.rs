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

//! Emulator configuration
//!
//! A small TOML file controls the machine build-out; every field has a
//! default so an absent or partial file just means a stock console.
//!
//! ```toml
//! expansion_pak = true
//! instructions_per_frame = 1562500
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{EmulatorError, Result};

/// VR4300 clock (93.75 MHz) divided by the NTSC frame rate.
const DEFAULT_INSTRUCTIONS_PER_FRAME: u64 = 1_562_500;

/// Machine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EmulatorConfig {
    /// Fit the Expansion Pak, doubling RDRAM from 4 MiB to 8 MiB.
    pub expansion_pak: bool,

    /// Instructions executed per emulated video frame.
    pub instructions_per_frame: u64,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            expansion_pak: false,
            instructions_per_frame: DEFAULT_INSTRUCTIONS_PER_FRAME,
        }
    }
}

impl EmulatorConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&text)
            .map_err(|e| EmulatorError::Config(format!("{}: {}", path.as_ref().display(), e)))?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// RDRAM size implied by this configuration.
    pub fn rdram_size(&self) -> u32 {
        if self.expansion_pak {
            0x0080_0000
        } else {
            0x0040_0000
        }
    }
}
