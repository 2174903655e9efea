//! Receiver states and the events they report

/// Handshake receiver states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiverState {
    /// Waiting for request to go high (start of a frame)
    #[default]
    Idle,
    /// A frame is announced but every free slot holds a queued frame
    WaitSpace,
    /// Copying payload bytes into the write slot
    Reading,
    /// Frame committed, waiting for the dummy byte to drop request
    PostFrame,
    /// Stalled after a commit; waiting for request low before resyncing
    ForceRecover,
}

/// Notable transitions, for logging by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiverEvent {
    /// Duty byte accepted, frame started
    Started {
        /// Brightness of the incoming frame
        duty: u8,
    },
    /// Frame announced while the ring is full
    RingFull,
    /// Last payload byte stored and the slot published
    Committed,
    /// Transmitter stalled mid-frame; the partial frame is discarded
    Dropped {
        /// Bytes stored before the stall, duty byte included
        received: usize,
    },
    /// Request stuck high after a commit; acknowledge released
    ForcedRelease,
    /// Request finally dropped after a forced release
    Resynchronized,
}
