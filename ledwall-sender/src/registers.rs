//! BCM283x GPIO register window
//!
//! Offsets are in 32-bit words from the start of the GPIO block, which is
//! what `/dev/gpiomem` maps at offset 0.

/// Bytes mapped from the start of the GPIO block
pub const WINDOW_BYTES: usize = 180;

/// 32-bit words in the mapped window
pub const WINDOW_WORDS: usize = WINDOW_BYTES / 4;

/// GPSET0: writing 1 drives a pin high
pub const SET_OFFSET: usize = 7;

/// GPCLR0: writing 1 drives a pin low
pub const CLEAR_OFFSET: usize = 10;

/// GPLEV0: current pin levels
pub const LEVEL_OFFSET: usize = 13;

/// Function-select registers covering GPIO 0-29
pub const FSEL_REGISTERS: usize = 3;

/// Function-select code for an output
pub const FSEL_OUTPUT: u32 = 0b001;

const FSEL_MASK: u32 = 0b111;

/// Word access to the GPIO block
///
/// Implemented by the memory-mapped device and by in-memory doubles in tests.
pub trait GpioRegisters {
    /// Read the word at `offset`
    fn read(&mut self, offset: usize) -> u32;

    /// Write `value` to the word at `offset`
    fn write(&mut self, offset: usize, value: u32);
}

impl<R: GpioRegisters + ?Sized> GpioRegisters for &mut R {
    fn read(&mut self, offset: usize) -> u32 {
        (**self).read(offset)
    }

    fn write(&mut self, offset: usize, value: u32) {
        (**self).write(offset, value)
    }
}

/// Function-select register holding `pin`
pub const fn fsel_offset(pin: u8) -> usize {
    pin as usize / 10
}

/// Bit position of `pin`'s 3-bit field within its function-select register
pub const fn fsel_shift(pin: u8) -> u32 {
    (pin as u32 % 10) * 3
}

/// Rewrite the function-select fields of `pins`, leaving other pins alone
///
/// `function` is the 3-bit code, e.g. [`FSEL_OUTPUT`] or 0 for input.
pub fn set_function<R: GpioRegisters + ?Sized>(registers: &mut R, pins: &[u8], function: u32) {
    for offset in 0..FSEL_REGISTERS {
        let mut word = registers.read(offset);
        let original = word;
        for &pin in pins.iter().filter(|pin| fsel_offset(**pin) == offset) {
            let shift = fsel_shift(pin);
            word = (word & !(FSEL_MASK << shift)) | ((function & FSEL_MASK) << shift);
        }
        if word != original {
            registers.write(offset, word);
        }
    }
}
