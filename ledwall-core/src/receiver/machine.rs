//! Handshake receiver state machine
//!
//! Called in a tight foreground loop. Each [`poll`](HandshakeReceiver::poll)
//! samples the bus once and moves at most one byte into the ring. Timeouts
//! are measured in refresh ticks of the scan engine, so a transmitter that
//! disappears mid-frame costs at most ~80 ms before the receiver resyncs.

use ledwall_protocol::{ack_level, byte_pending, stalled};

use super::state::{ReceiverEvent, ReceiverState};
use crate::ring::RingProducer;
use crate::traits::HandshakePort;

/// Receiver filling the ring from the parallel bus
///
/// `N` is the frame length including the duty byte.
pub struct HandshakeReceiver<'a, const N: usize> {
    ring: RingProducer<'a, N>,
    state: ReceiverState,
    /// Next byte of the frame to accept
    index: usize,
    /// Refresh tick of the last accepted byte
    last_progress: u8,
}

impl<'a, const N: usize> HandshakeReceiver<'a, N> {
    /// Index of the last payload byte
    const FRAME_SIZE: usize = N - 1;

    /// Create an idle receiver
    pub fn new(ring: RingProducer<'a, N>) -> Self {
        Self {
            ring,
            state: ReceiverState::Idle,
            index: 0,
            last_progress: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> ReceiverState {
        self.state
    }

    /// Next byte index of the frame in flight
    pub fn index(&self) -> usize {
        self.index
    }

    /// The ring handle, for observing queue depth
    pub fn ring(&self) -> &RingProducer<'a, N> {
        &self.ring
    }

    /// Sample the bus once and advance the state machine
    ///
    /// Returns an event when something worth logging happened.
    pub fn poll<P: HandshakePort>(&mut self, port: &mut P) -> Option<ReceiverEvent> {
        match self.state {
            ReceiverState::Idle => {
                if port.request() {
                    Some(self.begin_frame(port))
                } else {
                    None
                }
            }
            ReceiverState::WaitSpace => {
                if self.ring.has_space() {
                    Some(self.begin_frame(port))
                } else {
                    None
                }
            }
            ReceiverState::Reading => self.read_payload(port),
            ReceiverState::PostFrame => {
                if !port.request() {
                    port.set_acknowledge(false);
                    self.state = ReceiverState::Idle;
                    None
                } else if stalled(self.ring.refresh_tick(), self.last_progress) {
                    port.set_acknowledge(false);
                    self.state = ReceiverState::ForceRecover;
                    Some(ReceiverEvent::ForcedRelease)
                } else {
                    None
                }
            }
            ReceiverState::ForceRecover => {
                if !port.request() {
                    self.state = ReceiverState::Idle;
                    Some(ReceiverEvent::Resynchronized)
                } else {
                    None
                }
            }
        }
    }

    /// Accept the duty byte if there is a free slot
    fn begin_frame<P: HandshakePort>(&mut self, port: &mut P) -> ReceiverEvent {
        if !self.ring.has_space() {
            self.state = ReceiverState::WaitSpace;
            return ReceiverEvent::RingFull;
        }

        let duty = port.data();
        self.ring.store(0, duty);
        port.set_acknowledge(ack_level(0));
        self.last_progress = self.ring.refresh_tick();
        self.index = 1;
        self.state = ReceiverState::Reading;
        ReceiverEvent::Started { duty }
    }

    fn read_payload<P: HandshakePort>(&mut self, port: &mut P) -> Option<ReceiverEvent> {
        let now = self.ring.refresh_tick();

        if byte_pending(port.request(), self.index) {
            self.ring.store(self.index, port.data());
            port.set_acknowledge(ack_level(self.index));
            if self.index < Self::FRAME_SIZE {
                self.last_progress = now;
                self.index += 1;
                None
            } else {
                self.ring.commit();
                self.state = ReceiverState::PostFrame;
                Some(ReceiverEvent::Committed)
            }
        } else if stalled(now, self.last_progress) {
            // Partial frame stays in the uncommitted slot and is overwritten
            port.set_acknowledge(false);
            self.state = ReceiverState::Idle;
            Some(ReceiverEvent::Dropped {
                received: self.index,
            })
        } else {
            None
        }
    }
}
