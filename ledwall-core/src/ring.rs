//! Lock-free frame ring
//!
//! Eight frame slots shared between the handshake receiver (producer, the
//! foreground loop) and the scan engine (consumer, interrupt context).
//!
//! There is no lock. Safety comes from index ownership:
//!
//! | Field   | Written by | Read by the other side for   |
//! |---------|------------|------------------------------|
//! | `write` | producer   | the consumer's empty check   |
//! | `read`  | consumer   | the producer's full check    |
//! | `ticks` | consumer   | the producer's stall timeout |
//!
//! The producer only writes slot `write` while `write != read`, and the
//! consumer only moves `read` forward while `read + 1 != write`, so the two
//! sides never touch the same slot. Slot bytes are individual atomics so the
//! sharing needs no `unsafe`; on Cortex-M a relaxed byte access compiles to a
//! plain load or store.

use portable_atomic::{AtomicU8, Ordering};

use ledwall_protocol::RING_SLOTS;

/// Slot index into the ring
///
/// A 3-bit value, always interpreted mod 8. Constructing from any `u8`
/// keeps only the low three bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingIndex(u8);

impl RingIndex {
    const MASK: u8 = (RING_SLOTS - 1) as u8;

    /// Wrap `value` into the 3-bit range
    pub const fn new(value: u8) -> Self {
        Self(value & Self::MASK)
    }

    /// Raw 3-bit value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Slot number as an array index
    pub const fn slot(self) -> usize {
        self.0 as usize
    }

    /// Following slot, wrapping 7 → 0
    pub const fn next(self) -> Self {
        Self::new(self.0.wrapping_add(1))
    }

    /// Slots from `self` forward to `later`, mod 8
    pub const fn distance_to(self, later: RingIndex) -> usize {
        (later.0.wrapping_sub(self.0) & Self::MASK) as usize
    }
}

/// Eight slots of `N`-byte frames plus the shared indices
///
/// `N` is the full frame length including the duty byte. Every slot starts
/// zeroed: duty 0 (blanked) and every pixel off.
pub struct FrameRing<const N: usize> {
    slots: [[AtomicU8; N]; RING_SLOTS],
    /// Slot being displayed. Written only by [`RingConsumer`].
    read: AtomicU8,
    /// Slot being filled. Written only by [`RingProducer`].
    write: AtomicU8,
    /// Refresh ticks, one per full row-group sweep. Written only by [`RingConsumer`].
    ticks: AtomicU8,
}

impl<const N: usize> Default for FrameRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameRing<N> {
    /// Create an empty ring displaying slot 0 and filling slot 1
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| core::array::from_fn(|_| AtomicU8::new(0))),
            read: AtomicU8::new(0),
            write: AtomicU8::new(1),
            ticks: AtomicU8::new(0),
        }
    }

    /// Split into the two handles
    ///
    /// The exclusive borrow guarantees there is only ever one producer and
    /// one consumer per ring.
    pub fn split(&mut self) -> (RingProducer<'_, N>, RingConsumer<'_, N>) {
        let ring: &Self = self;
        (RingProducer { ring }, RingConsumer { ring })
    }

    fn read_index(&self) -> RingIndex {
        RingIndex::new(self.read.load(Ordering::Acquire))
    }

    fn write_index(&self) -> RingIndex {
        RingIndex::new(self.write.load(Ordering::Acquire))
    }

    /// Committed frames waiting behind the displayed one (0..=7)
    fn queued(&self) -> usize {
        self.read_index().next().distance_to(self.write_index())
    }
}

/// Write side of the ring, owned by the handshake receiver
pub struct RingProducer<'a, const N: usize> {
    ring: &'a FrameRing<N>,
}

impl<const N: usize> RingProducer<'_, N> {
    /// Slot currently being filled
    pub fn write_index(&self) -> RingIndex {
        RingIndex::new(self.ring.write.load(Ordering::Relaxed))
    }

    /// Slot the consumer is displaying
    pub fn read_index(&self) -> RingIndex {
        self.ring.read_index()
    }

    /// Whether the write slot is free to fill
    ///
    /// False when the consumer is still displaying it, i.e. seven frames are
    /// queued.
    pub fn has_space(&self) -> bool {
        self.write_index() != self.ring.read_index()
    }

    /// Store one byte of the frame being received
    ///
    /// Only valid while [`has_space`](Self::has_space) holds.
    pub fn store(&mut self, index: usize, byte: u8) {
        debug_assert!(self.has_space(), "write slot is being displayed");
        self.ring.slots[self.write_index().slot()][index].store(byte, Ordering::Relaxed);
    }

    /// Publish the filled slot to the consumer and move to the next one
    pub fn commit(&mut self) {
        let next = self.write_index().next();
        self.ring.write.store(next.value(), Ordering::Release);
    }

    /// Refresh tick count maintained by the consumer
    pub fn refresh_tick(&self) -> u8 {
        self.ring.ticks.load(Ordering::Relaxed)
    }

    /// Committed frames not yet on display
    pub fn queued(&self) -> usize {
        self.ring.queued()
    }
}

/// Read side of the ring, owned by the scan engine
pub struct RingConsumer<'a, const N: usize> {
    ring: &'a FrameRing<N>,
}

impl<const N: usize> RingConsumer<'_, N> {
    /// Slot currently displayed
    pub fn read_index(&self) -> RingIndex {
        RingIndex::new(self.ring.read.load(Ordering::Relaxed))
    }

    /// Slot the producer is filling
    pub fn write_index(&self) -> RingIndex {
        self.ring.write_index()
    }

    /// Byte `index` of the displayed frame
    pub fn byte(&self, index: usize) -> u8 {
        self.ring.slots[self.read_index().slot()][index].load(Ordering::Relaxed)
    }

    /// Duty byte of the displayed frame
    pub fn duty(&self) -> u8 {
        self.byte(0)
    }

    /// Move to the next committed frame, if there is one
    ///
    /// Never advances onto the slot being written; with nothing new the
    /// current frame stays on display. Returns whether `read` moved.
    pub fn try_advance(&mut self) -> bool {
        let next = self.read_index().next();
        if next == self.ring.write_index() {
            return false;
        }
        self.ring.read.store(next.value(), Ordering::Release);
        true
    }

    /// Count one completed refresh
    pub fn tick(&mut self) {
        // Sole writer, so a plain load/store pair is enough
        let ticks = self.ring.ticks.load(Ordering::Relaxed);
        self.ring.ticks.store(ticks.wrapping_add(1), Ordering::Relaxed);
    }

    /// Refresh tick count
    pub fn refresh_tick(&self) -> u8 {
        self.ring.ticks.load(Ordering::Relaxed)
    }

    /// Committed frames not yet on display
    pub fn queued(&self) -> usize {
        self.ring.queued()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LEN: usize = 65;

    fn fill(producer: &mut RingProducer<'_, LEN>, marker: u8) {
        for index in 0..LEN {
            producer.store(index, marker);
        }
        producer.commit();
    }

    #[test]
    fn test_ring_index_wraps() {
        assert_eq!(RingIndex::new(9).value(), 1);
        assert_eq!(RingIndex::new(7).next().value(), 0);
        assert_eq!(RingIndex::new(6).distance_to(RingIndex::new(1)), 3);
        assert_eq!(RingIndex::new(3).distance_to(RingIndex::new(3)), 0);
    }

    #[test]
    fn test_starts_empty_and_blank() {
        let mut ring = FrameRing::<LEN>::new();
        let (producer, consumer) = ring.split();
        assert_eq!(consumer.read_index().value(), 0);
        assert_eq!(producer.write_index().value(), 1);
        assert!(producer.has_space());
        assert_eq!(producer.queued(), 0);
        assert_eq!(consumer.duty(), 0);
        assert_eq!(consumer.byte(LEN - 1), 0);
    }

    #[test]
    fn test_consumer_holds_last_frame_when_empty() {
        let mut ring = FrameRing::<LEN>::new();
        let (_producer, mut consumer) = ring.split();
        assert!(!consumer.try_advance());
        assert_eq!(consumer.read_index().value(), 0);
    }

    #[test]
    fn test_commit_then_advance() {
        let mut ring = FrameRing::<LEN>::new();
        let (mut producer, mut consumer) = ring.split();

        fill(&mut producer, 42);
        assert_eq!(consumer.queued(), 1);

        assert!(consumer.try_advance());
        assert_eq!(consumer.duty(), 42);
        assert_eq!(consumer.queued(), 0);
        // Nothing further committed, stay on slot 1
        assert!(!consumer.try_advance());
        assert_eq!(consumer.read_index().value(), 1);
    }

    #[test]
    fn test_full_after_seven_frames() {
        let mut ring = FrameRing::<LEN>::new();
        let (mut producer, mut consumer) = ring.split();

        for marker in 1..=7 {
            assert!(producer.has_space());
            fill(&mut producer, marker);
        }
        assert!(!producer.has_space());
        assert_eq!(producer.queued(), 7);
        assert_eq!(producer.write_index(), consumer.read_index());

        assert!(consumer.try_advance());
        assert!(producer.has_space());
        assert_eq!(consumer.duty(), 1);
    }

    #[test]
    fn test_refresh_tick_wraps() {
        let mut ring = FrameRing::<LEN>::new();
        let (producer, mut consumer) = ring.split();
        for _ in 0..300 {
            consumer.tick();
        }
        assert_eq!(producer.refresh_tick(), (300 % 256) as u8);
    }

    proptest! {
        /// Random interleavings never let the two sides share a slot, and
        /// frames come out in the order they went in.
        #[test]
        fn ring_preserves_ownership_and_order(
            steps in proptest::collection::vec(any::<bool>(), 1..400)
        ) {
            let mut ring = FrameRing::<LEN>::new();
            let (mut producer, mut consumer) = ring.split();
            let mut next_marker: u8 = 1;
            let mut last_seen: u8 = 0;

            for produce in steps {
                if produce {
                    if producer.has_space() {
                        prop_assert_ne!(producer.write_index(), consumer.read_index());
                        fill(&mut producer, next_marker);
                        next_marker = next_marker.wrapping_add(1).max(1);
                    }
                } else {
                    let was_full = !producer.has_space();
                    if consumer.try_advance() {
                        let marker = consumer.duty();
                        let expected = if last_seen == 255 { 1 } else { last_seen + 1 };
                        prop_assert_eq!(marker, expected);
                        last_seen = marker;
                        // The consumer never lands on the slot being written
                        prop_assert_ne!(consumer.read_index(), consumer.write_index());
                    } else {
                        prop_assert!(!was_full);
                        prop_assert_eq!(consumer.queued(), 0);
                    }
                }
                prop_assert!(consumer.queued() <= RING_SLOTS - 1);
                // Indices only coincide when the ring is full
                let full = !producer.has_space();
                prop_assert_eq!(consumer.read_index() == consumer.write_index(), full);
            }
        }
    }
}
