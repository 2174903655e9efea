//! Parallel handshake bus trait

/// Receiver end of the parallel handshake bus
///
/// `request` and the data lines are driven by the transmitter; acknowledge
/// is ours.
pub trait HandshakePort {
    /// Current level of the request line
    fn request(&self) -> bool;

    /// Sample all eight data lines at once
    fn data(&self) -> u8;

    /// Drive the acknowledge line
    fn set_acknowledge(&mut self, high: bool);
}
