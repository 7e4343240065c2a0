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

//! Video Interface (VI)
//!
//! Models the VI register file: the framebuffer scan-out configuration and
//! the half-line counter that boot code polls to synchronize with vertical
//! blank. No rasterization happens here; the registers exist so that
//! programs that configure and poll the VI observe plausible hardware.
//!
//! ## Register Layout (base 0x04400000)
//!
//! ```text
//! 0x00: VI_STATUS   - control: pixel size, AA mode
//! 0x04: VI_ORIGIN   - framebuffer base physical address
//! 0x08: VI_WIDTH    - framebuffer width in pixels
//! 0x0C: VI_INTR     - half-line to raise the VI interrupt on
//! 0x10: VI_CURRENT  - current half-line (R); write clears interrupt
//! 0x14: VI_BURST    - video timing parameters
//! 0x18: VI_V_SYNC   - half-lines per frame (524 NTSC non-interlaced)
//! 0x1C: VI_H_SYNC   - quarter-pixels per line
//! 0x20: VI_LEAP     - leap pattern for PAL
//! 0x24: VI_H_START  - active video horizontal span
//! 0x28: VI_V_START  - active video vertical span
//! 0x2C: VI_V_BURST  - color burst vertical span
//! 0x30: VI_X_SCALE  - horizontal scale factor
//! 0x34: VI_Y_SCALE  - vertical scale factor
//! ```

use super::memory::BusDevice;

const REG_COUNT: usize = 14;

const VI_CURRENT: u32 = 0x10;
const VI_V_SYNC: u32 = 0x18;

/// NTSC non-interlaced half-line count, used until VI_V_SYNC is written.
const DEFAULT_V_SYNC: u32 = 524;

/// Video Interface register file.
pub struct VideoInterface {
    regs: [u32; REG_COUNT],
    /// Current half-line, advanced by [`tick_line`](Self::tick_line).
    current_line: u32,
    /// Frames completed since power-on.
    frames: u64,
}

impl VideoInterface {
    pub fn new() -> Self {
        let mut vi = Self {
            regs: [0; REG_COUNT],
            current_line: 0,
            frames: 0,
        };
        vi.regs[(VI_V_SYNC / 4) as usize] = DEFAULT_V_SYNC;
        vi
    }

    /// Advance one half-line of scan-out; returns `true` on frame wrap.
    pub fn tick_line(&mut self) -> bool {
        let v_sync = self.regs[(VI_V_SYNC / 4) as usize].max(1);
        self.current_line += 1;
        if self.current_line >= v_sync {
            self.current_line = 0;
            self.frames += 1;
            return true;
        }
        false
    }

    /// Framebuffer base physical address (VI_ORIGIN).
    pub fn framebuffer_origin(&self) -> u32 {
        self.regs[1]
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for VideoInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl BusDevice for VideoInterface {
    fn size(&self) -> u32 {
        (REG_COUNT * 4) as u32
    }

    fn read_word(&mut self, offset: u32) -> u32 {
        if offset == VI_CURRENT {
            // Polled in wait-for-vblank loops; always reflects the beam.
            return self.current_line;
        }
        self.regs[(offset / 4) as usize]
    }

    fn write_word(&mut self, offset: u32, value: u32) {
        if offset == VI_CURRENT {
            // Writing VI_CURRENT acknowledges the VI interrupt; the counter
            // itself is beam-driven and not writable.
            log::trace!("VI interrupt acknowledged");
            return;
        }
        self.regs[(offset / 4) as usize] = value;
    }

    fn name(&self) -> &str {
        "VI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_read_write() {
        let mut vi = VideoInterface::new();
        vi.write_word(0x04, 0x0010_0000); // VI_ORIGIN
        assert_eq!(vi.read_word(0x04), 0x0010_0000);
        assert_eq!(vi.framebuffer_origin(), 0x0010_0000);
    }

    #[test]
    fn test_current_line_tracks_beam() {
        let mut vi = VideoInterface::new();
        assert_eq!(vi.read_word(VI_CURRENT), 0);
        vi.tick_line();
        vi.tick_line();
        assert_eq!(vi.read_word(VI_CURRENT), 2);
    }

    #[test]
    fn test_current_write_does_not_move_beam() {
        let mut vi = VideoInterface::new();
        vi.tick_line();
        vi.write_word(VI_CURRENT, 0);
        assert_eq!(vi.read_word(VI_CURRENT), 1);
    }

    #[test]
    fn test_frame_wrap() {
        let mut vi = VideoInterface::new();
        let mut wrapped = false;
        for _ in 0..DEFAULT_V_SYNC {
            wrapped = vi.tick_line();
        }
        assert!(wrapped);
        assert_eq!(vi.frames(), 1);
        assert_eq!(vi.read_word(VI_CURRENT), 0);
    }

    #[test]
    fn test_v_sync_register_controls_wrap() {
        let mut vi = VideoInterface::new();
        vi.write_word(VI_V_SYNC, 4);
        for _ in 0..3 {
            assert!(!vi.tick_line());
        }
        assert!(vi.tick_line());
    }
}
