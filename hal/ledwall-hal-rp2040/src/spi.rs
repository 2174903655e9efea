//! Blocking SPI as a panel shifter

use embassy_rp::spi;
use embedded_hal::spi::SpiBus;
use ledwall_hal::spi::{Phase, Polarity, SpiConfig};
use ledwall_hal::SpiWrite;

/// Any blocking embedded-hal SPI bus as a [`SpiWrite`]
pub struct BlockingShifter<S>(S);

impl<S: SpiBus<u8>> BlockingShifter<S> {
    /// Wrap a configured bus
    pub fn new(bus: S) -> Self {
        Self(bus)
    }
}

impl<S: SpiBus<u8>> SpiWrite for BlockingShifter<S> {
    type Error = S::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), S::Error> {
        self.0.write(data)?;
        // Latch must not strobe before the last bit is out
        self.0.flush()
    }
}

/// Translate the shared SPI settings to embassy-rp's
pub fn embassy_config(config: &SpiConfig) -> spi::Config {
    let mut out = spi::Config::default();
    out.frequency = config.frequency;
    out.polarity = match config.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    out.phase = match config.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    out
}
