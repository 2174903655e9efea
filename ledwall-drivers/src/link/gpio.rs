//! Handshake port over plain GPIO
//!
//! The data lines must come from a [`ParallelInput`] that samples all
//! eight in one register read; the request line is a separate input.

use ledwall_core::traits::HandshakePort;
use ledwall_hal::{InputPin, OutputPin, ParallelInput};

/// Receiver end of the parallel bus
pub struct GpioLink<D, REQ, ACK> {
    data: D,
    request: REQ,
    ack: ACK,
}

impl<D, REQ, ACK> GpioLink<D, REQ, ACK>
where
    D: ParallelInput,
    REQ: InputPin,
    ACK: OutputPin,
{
    /// Create the link with acknowledge low
    pub fn new(data: D, request: REQ, ack: ACK) -> Self {
        let mut link = Self { data, request, ack };
        link.ack.set_low();
        link
    }

    /// Level currently driven on acknowledge
    pub fn acknowledge(&self) -> bool {
        self.ack.is_set_high()
    }
}

impl<D, REQ, ACK> HandshakePort for GpioLink<D, REQ, ACK>
where
    D: ParallelInput,
    REQ: InputPin,
    ACK: OutputPin,
{
    fn request(&self) -> bool {
        self.request.is_high()
    }

    fn data(&self) -> u8 {
        self.data.read_byte()
    }

    fn set_acknowledge(&mut self, high: bool) {
        self.ack.set_state(high);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct MockInput<'a>(&'a Cell<bool>);

    impl InputPin for MockInput<'_> {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    struct MockBus<'a>(&'a Cell<u8>);

    impl ParallelInput for MockBus<'_> {
        fn read_byte(&self) -> u8 {
            self.0.get()
        }
    }

    struct MockOutput {
        high: bool,
    }

    impl OutputPin for MockOutput {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_new_drops_acknowledge() {
        let request = Cell::new(false);
        let data = Cell::new(0);
        let ack = MockOutput { high: true };
        let link = GpioLink::new(MockBus(&data), MockInput(&request), ack);
        assert!(!link.acknowledge());
    }

    #[test]
    fn test_port_follows_lines() {
        let request = Cell::new(false);
        let data = Cell::new(0);
        let ack = MockOutput { high: false };
        let mut link = GpioLink::new(MockBus(&data), MockInput(&request), ack);

        request.set(true);
        data.set(0xA5);
        assert!(link.request());
        assert_eq!(link.data(), 0xA5);

        link.set_acknowledge(true);
        assert!(link.acknowledge());
        link.set_acknowledge(false);
        assert!(!link.acknowledge());
    }
}
