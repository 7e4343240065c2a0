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

//! Audio Interface (AI)
//!
//! Models the AI DMA register file with its two-deep buffer FIFO. No sound
//! is produced; the FIFO and status bits behave so that audio code which
//! queues buffers and polls AI_STATUS makes progress instead of spinning.
//!
//! ## Register Layout (base 0x04500000)
//!
//! ```text
//! 0x00: AI_DRAM_ADDR - DMA source address in RDRAM (W)
//! 0x04: AI_LEN       - transfer length; write enqueues a DMA (R/W)
//! 0x08: AI_CONTROL   - bit 0: DMA enable (W)
//! 0x0C: AI_STATUS    - bit 30: busy, bit 31: FIFO full (R); write acks IRQ
//! 0x10: AI_DACRATE   - DAC sample period (W)
//! 0x14: AI_BITRATE   - bits per sample (W)
//! ```

use super::memory::BusDevice;

const AI_DRAM_ADDR: u32 = 0x00;
const AI_LEN: u32 = 0x04;
const AI_CONTROL: u32 = 0x08;
const AI_STATUS: u32 = 0x0C;
const AI_DACRATE: u32 = 0x10;
const AI_BITRATE: u32 = 0x14;

const STATUS_BUSY: u32 = 1 << 30;
const STATUS_FULL: u32 = 1 << 31;

/// A queued audio DMA transfer.
#[derive(Debug, Clone, Copy)]
struct PendingDma {
    dram_addr: u32,
    len: u32,
}

/// Audio Interface register file.
pub struct AudioInterface {
    dram_addr: u32,
    control: u32,
    dacrate: u32,
    bitrate: u32,
    /// Hardware FIFO: the playing transfer plus at most one queued behind it.
    fifo: [Option<PendingDma>; 2],
}

impl AudioInterface {
    pub fn new() -> Self {
        Self {
            dram_addr: 0,
            control: 0,
            dacrate: 0,
            bitrate: 0,
            fifo: [None, None],
        }
    }

    /// Retire the currently playing buffer, promoting the queued one.
    ///
    /// Called once per frame by the system; real hardware drains at the DAC
    /// rate, but frame granularity is enough for FIFO progress.
    pub fn process(&mut self) {
        if let Some(done) = self.fifo[0].take() {
            log::trace!(
                "AI DMA complete: 0x{:08X}, {} bytes",
                done.dram_addr,
                done.len
            );
            self.fifo[0] = self.fifo[1].take();
        }
    }

    fn busy(&self) -> bool {
        self.fifo[0].is_some()
    }

    fn full(&self) -> bool {
        self.fifo[1].is_some()
    }

    fn status(&self) -> u32 {
        let mut status = 0;
        if self.busy() {
            status |= STATUS_BUSY;
        }
        if self.full() {
            status |= STATUS_FULL;
        }
        status
    }
}

impl Default for AudioInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl BusDevice for AudioInterface {
    fn size(&self) -> u32 {
        0x18
    }

    fn read_word(&mut self, offset: u32) -> u32 {
        match offset {
            // Remaining length of the playing transfer.
            AI_LEN => self.fifo[0].map_or(0, |dma| dma.len),
            AI_STATUS => self.status(),
            _ => 0,
        }
    }

    fn write_word(&mut self, offset: u32, value: u32) {
        match offset {
            AI_DRAM_ADDR => self.dram_addr = value & 0x00FF_FFF8,
            AI_LEN => {
                let dma = PendingDma {
                    dram_addr: self.dram_addr,
                    len: value & 0x0003_FFF8,
                };
                if self.fifo[0].is_none() {
                    self.fifo[0] = Some(dma);
                } else if self.fifo[1].is_none() {
                    self.fifo[1] = Some(dma);
                } else {
                    log::debug!("AI_LEN write with full FIFO dropped");
                }
            }
            AI_CONTROL => self.control = value & 0x01,
            AI_STATUS => {
                // Write acknowledges the AI interrupt.
                log::trace!("AI interrupt acknowledged");
            }
            AI_DACRATE => self.dacrate = value & 0x3FFF,
            AI_BITRATE => self.bitrate = value & 0x0F,
            _ => {}
        }
    }

    fn name(&self) -> &str {
        "AI"
    }
}
