//! Transmitter timing

use std::time::Duration;

use ledwall_hal::SpinDelay;

/// Delays the transmitter inserts around the handshake
///
/// The defaults match a Raspberry Pi driving a 16 MHz receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Busy-wait before and after driving the data lines, in spin units
    pub settle: u32,
    /// Calibration of the settle spin
    pub spin: SpinDelay,
    /// Minimum gap from one frame's end to the next frame's first byte
    pub frame_spacing: Duration,
    /// Gap after which a receiver still holding acknowledge has recovered
    pub recovery_wait: Duration,
    /// Wait after releasing the bus at startup
    pub startup_delay: Duration,
    /// All-zero frames sent at startup to resynchronize the receiver
    pub warmup_frames: usize,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            settle: 64,
            spin: SpinDelay::default(),
            frame_spacing: Duration::from_micros(100),
            recovery_wait: Duration::from_millis(15),
            startup_delay: Duration::from_millis(100),
            warmup_frames: 8,
        }
    }
}

impl Pacing {
    /// No waits at all, for simulated buses
    pub fn immediate() -> Self {
        Self {
            settle: 0,
            spin: SpinDelay::default(),
            frame_spacing: Duration::ZERO,
            recovery_wait: Duration::ZERO,
            startup_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}
