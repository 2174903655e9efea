//! SPI bus abstractions
//!
//! The panel only ever receives data, so the shared trait is write-only.

/// Write-only SPI master
///
/// Used to clock pixel bytes into the panel's column shift registers.
pub trait SpiWrite {
    /// Error type for SPI operations
    type Error;

    /// Write data, blocking until the last bit has left the shifter
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Write a single byte
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.write(&[byte])
    }
}

/// SPI configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl Default for SpiConfig {
    fn default() -> Self {
        // One byte must clear the shifter well inside a single scan tick
        Self {
            frequency: 8_000_000,
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
        }
    }
}

impl SpiConfig {
    /// Time to shift one byte, in nanoseconds
    pub const fn byte_time_ns(&self) -> u32 {
        let frequency = if self.frequency == 0 {
            1
        } else {
            self.frequency
        };
        8 * (1_000_000_000 / frequency)
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_byte_fits_scan_tick() {
        // A scan tick is ~10 µs
        assert!(SpiConfig::default().byte_time_ns() < 10_000);
        assert_eq!(SpiConfig::default().byte_time_ns(), 1000);
    }
}
