//! Bus pin assignment and the byte-to-mask table
//!
//! Pin numbers are BCM GPIO numbers. The data pins do not sit in bit order
//! on the header, so every byte is translated to a set-register mask through
//! a table generated once from the pin list.

use crate::error::TransmitError;

/// Highest BCM GPIO on the 40-pin header
pub const MAX_HEADER_GPIO: u8 = 27;

/// GPIO assignment of the parallel bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusPins {
    data: [u8; 8],
    request: u8,
    acknowledge: u8,
}

impl Default for BusPins {
    fn default() -> Self {
        Self::HEADER
    }
}

impl BusPins {
    /// Wiring of the reference harness: data bit `n` on `data[n]`
    pub const HEADER: Self = Self {
        data: [20, 21, 26, 16, 19, 13, 6, 5],
        request: 27,
        acknowledge: 22,
    };

    /// Create a pin map, rejecting duplicates and pins off the header
    pub fn new(data: [u8; 8], request: u8, acknowledge: u8) -> Result<Self, TransmitError> {
        let pins = Self {
            data,
            request,
            acknowledge,
        };
        let all = pins.all();
        for (i, &pin) in all.iter().enumerate() {
            if pin > MAX_HEADER_GPIO || all[..i].contains(&pin) {
                return Err(TransmitError::InvalidPin { pin });
            }
        }
        Ok(pins)
    }

    /// Data pins, bit 0 first
    pub fn data(&self) -> [u8; 8] {
        self.data
    }

    /// Request pin (output)
    pub fn request(&self) -> u8 {
        self.request
    }

    /// Acknowledge pin (input)
    pub fn acknowledge(&self) -> u8 {
        self.acknowledge
    }

    /// Pins the transmitter drives
    pub fn outputs(&self) -> [u8; 9] {
        let mut out = [self.request; 9];
        out[..8].copy_from_slice(&self.data);
        out
    }

    /// Every bus pin, outputs first
    pub fn all(&self) -> [u8; 10] {
        let mut all = [self.acknowledge; 10];
        all[..9].copy_from_slice(&self.outputs());
        all
    }

    /// Level-register mask of the request pin
    pub const fn request_mask(&self) -> u32 {
        1 << self.request
    }

    /// Level-register mask of the acknowledge pin
    pub const fn acknowledge_mask(&self) -> u32 {
        1 << self.acknowledge
    }
}

/// Byte value to set-register mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteMasks {
    table: [u32; 256],
}

impl ByteMasks {
    /// Build the table for `pins`
    pub const fn new(pins: &BusPins) -> Self {
        let mut table = [0u32; 256];
        let mut byte = 0;
        while byte < 256 {
            let mut bit = 0;
            while bit < 8 {
                if byte & (1 << bit) != 0 {
                    table[byte] |= 1 << pins.data[bit];
                }
                bit += 1;
            }
            byte += 1;
        }
        Self { table }
    }

    /// Pins to drive high for `byte`
    pub const fn set_mask(&self, byte: u8) -> u32 {
        self.table[byte as usize]
    }

    /// Pins to drive low for `byte`
    pub const fn clear_mask(&self, byte: u8) -> u32 {
        !self.set_mask(byte) & self.all_data()
    }

    /// Every data pin
    pub const fn all_data(&self) -> u32 {
        self.table[255]
    }
}
