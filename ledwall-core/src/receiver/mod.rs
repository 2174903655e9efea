//! Parallel-bus frame receiver
//!
//! Moves frames from the handshake bus into the ring. Protocol faults never
//! surface as errors: a stalled transmitter makes the receiver discard the
//! partial frame and go back to waiting for the next one.

pub mod machine;
pub mod state;

pub use machine::HandshakeReceiver;
pub use state::{ReceiverEvent, ReceiverState};
