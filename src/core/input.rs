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

//! Peripheral Interface port (PIF RAM)
//!
//! The 64-byte PIF RAM block at 0x1FC007C0 is the mailbox between the CPU
//! and the peripheral microcontroller: programs build a joybus command
//! buffer in it and the PIF overwrites the buffer with responses. Storage
//! is byte-granular, so this device opts out of the bus alignment rule.
//!
//! Only the controller-state command is answered; everything else gets the
//! joybus error flag so probing code moves on instead of hanging.
//!
//! ## Controller state response
//!
//! ```text
//! byte 0: buttons 15..8   (A, B, Z, Start, D-pad)
//! byte 1: buttons 7..0    (C buttons, L, R)
//! byte 2: analog stick X  (signed)
//! byte 3: analog stick Y  (signed)
//! ```

use super::memory::BusDevice;

/// PIF RAM size in bytes.
const PIF_RAM_SIZE: usize = 64;

/// Joybus command: read controller buttons and stick.
const CMD_CONTROLLER_STATE: u8 = 0x01;

/// Joybus "command not understood" flag, set in the RX length byte.
const RX_ERROR: u8 = 0x80;

/// Controller button bitmask, mirroring the joybus wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub buttons: u16,
    pub stick_x: i8,
    pub stick_y: i8,
}

/// PIF RAM block plus the state of the single attached controller.
pub struct PifInterface {
    ram: [u8; PIF_RAM_SIZE],
    controller: ControllerState,
}

impl PifInterface {
    pub fn new() -> Self {
        Self {
            ram: [0; PIF_RAM_SIZE],
            controller: ControllerState::default(),
        }
    }

    /// Update the attached controller's state; visible at the next poll.
    pub fn set_controller(&mut self, state: ControllerState) {
        self.controller = state;
    }

    /// Run the joybus protocol over the command buffer in PIF RAM.
    ///
    /// Each transaction is `tx_len, rx_len, command, ...`; 0xFE ends the
    /// buffer, 0x00 skips to the next channel and 0xFF is padding.
    pub fn poll(&mut self) {
        let mut i = 0;
        while i < PIF_RAM_SIZE {
            match self.ram[i] {
                0xFE => break,
                0x00 | 0xFF => {
                    i += 1;
                    continue;
                }
                tx_len => {
                    let tx_len = (tx_len & 0x3F) as usize;
                    if i + 2 + tx_len > PIF_RAM_SIZE {
                        break;
                    }
                    let rx_len = (self.ram[i + 1] & 0x3F) as usize;
                    let command = self.ram[i + 2];
                    let rx_start = i + 2 + tx_len;
                    if rx_start + rx_len > PIF_RAM_SIZE {
                        break;
                    }

                    match command {
                        CMD_CONTROLLER_STATE if rx_len >= 4 => {
                            let state = self.controller;
                            self.ram[rx_start] = (state.buttons >> 8) as u8;
                            self.ram[rx_start + 1] = state.buttons as u8;
                            self.ram[rx_start + 2] = state.stick_x as u8;
                            self.ram[rx_start + 3] = state.stick_y as u8;
                        }
                        other => {
                            log::trace!("Unhandled joybus command 0x{:02X}", other);
                            self.ram[i + 1] |= RX_ERROR;
                        }
                    }

                    i = rx_start + rx_len;
                }
            }
        }
    }
}

impl Default for PifInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl BusDevice for PifInterface {
    fn size(&self) -> u32 {
        PIF_RAM_SIZE as u32
    }

    fn requires_alignment(&self) -> bool {
        false
    }

    fn read_word(&mut self, offset: u32) -> u32 {
        let i = (offset as usize) & (PIF_RAM_SIZE - 1) & !0x03;
        u32::from_be_bytes([self.ram[i], self.ram[i + 1], self.ram[i + 2], self.ram[i + 3]])
    }

    fn write_word(&mut self, offset: u32, value: u32) {
        let i = (offset as usize) & (PIF_RAM_SIZE - 1) & !0x03;
        self.ram[i..i + 4].copy_from_slice(&value.to_be_bytes());
    }

    fn read_byte(&mut self, offset: u32) -> u8 {
        self.ram[(offset as usize) & (PIF_RAM_SIZE - 1)]
    }

    fn write_byte(&mut self, offset: u32, value: u8) {
        self.ram[(offset as usize) & (PIF_RAM_SIZE - 1)] = value;
    }

    fn name(&self) -> &str {
        "PIF"
    }
}
