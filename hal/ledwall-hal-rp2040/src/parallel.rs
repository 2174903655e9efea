//! Eight-line parallel input over the SIO block
//!
//! The data bus must sit on GPIO 0-7 so one read of the SIO input register
//! returns the whole byte. Reading the pins one by one could mix bits of
//! two consecutive bytes.

use embassy_rp::gpio::Input;
use embassy_rp::pac;
use ledwall_hal::ParallelInput;

/// Data bus on GPIO 0-7, bit `n` = GPIO `n`
pub struct SioDataPort<'d> {
    /// Held so the pins stay configured as inputs
    _pins: [Input<'d>; 8],
}

impl<'d> SioDataPort<'d> {
    /// Take the eight inputs in GPIO order, GPIO 0 first
    pub fn new(pins: [Input<'d>; 8]) -> Self {
        Self { _pins: pins }
    }
}

impl ParallelInput for SioDataPort<'_> {
    #[inline(always)]
    fn read_byte(&self) -> u8 {
        (pac::SIO.gpio_in(0).read() & 0xFF) as u8
    }
}
