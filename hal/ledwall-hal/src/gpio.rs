//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins, plus the 8-line
//! parallel port the handshake receiver samples in a single read.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }

    /// Drive the pin high then low again
    fn pulse(&mut self) {
        self.set_high();
        self.set_low();
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Eight input lines read as one byte
///
/// Bit `n` of the returned byte is data line `n`. All eight lines must be
/// sampled by the same register read so a byte is never torn across two
/// transmitter writes.
pub trait ParallelInput {
    /// Sample all data lines at once
    fn read_byte(&self) -> u8;
}

/// Any eight input pins form a (slower, non-atomic) parallel port
impl<P: InputPin> ParallelInput for [P; 8] {
    fn read_byte(&self) -> u8 {
        self.iter()
            .enumerate()
            .fold(0u8, |byte, (bit, pin)| {
                byte | ((pin.is_high() as u8) << bit)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPin(bool);

    impl InputPin for FixedPin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    struct MockOutput {
        high: bool,
        edges: u8,
    }

    impl OutputPin for MockOutput {
        fn set_high(&mut self) {
            if !self.high {
                self.edges += 1;
            }
            self.high = true;
        }

        fn set_low(&mut self) {
            if self.high {
                self.edges += 1;
            }
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_pin_array_as_parallel_port() {
        let pins = [
            FixedPin(true),
            FixedPin(false),
            FixedPin(true),
            FixedPin(false),
            FixedPin(false),
            FixedPin(false),
            FixedPin(false),
            FixedPin(true),
        ];
        assert_eq!(pins.read_byte(), 0b1000_0101);
    }

    #[test]
    fn test_pulse_returns_low() {
        let mut pin = MockOutput {
            high: false,
            edges: 0,
        };
        pin.pulse();
        assert!(pin.is_set_low());
        assert_eq!(pin.edges, 2);
    }
}
