//! Toggle-parity handshake rules
//!
//! Byte `n` of a frame (the duty byte is byte 0, the dummy byte is byte
//! `frame_len`) is announced by driving *request* to `n` even, and accepted
//! once *acknowledge* follows to the same level. Levels alternate, so neither
//! side ever needs to see a pulse.
//!
//! ```text
//! byte:     duty   p1    p2    p3  ...  pN   dummy
//! request:  ‾‾‾‾‾|_____|‾‾‾‾‾|_____ ... ‾‾‾‾|_______
//! ack:        ‾‾‾‾‾|_____|‾‾‾‾‾|___ ...   ‾‾‾‾|_____
//! ```

/// Ring slots on the receiver
pub const RING_SLOTS: usize = 8;

/// Refresh ticks without progress before the receiver gives up on a frame
///
/// At ~100 Hz refresh this is roughly 80 ms.
pub const STALL_TICKS: u8 = 8;

/// Request level that announces byte `index` of a frame
pub const fn request_level(index: usize) -> bool {
    index % 2 == 0
}

/// Acknowledge level that confirms byte `index` was sampled
pub const fn ack_level(index: usize) -> bool {
    request_level(index)
}

/// Whether the request line announces byte `index` (and not the one before)
pub const fn byte_pending(request: bool, index: usize) -> bool {
    request == request_level(index)
}

/// Refresh ticks elapsed since `since`, across counter wrap
pub const fn ticks_since(now: u8, since: u8) -> u8 {
    now.wrapping_sub(since)
}

/// Whether a session idle since `since` has stalled
pub const fn stalled(now: u8, since: u8) -> bool {
    ticks_since(now, since) > STALL_TICKS
}
