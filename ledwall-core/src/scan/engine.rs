//! Scan engine
//!
//! Per-tick behavior, keyed by the 8-bit scan counter `count` with
//! `q = shift ticks per row-group`:
//!
//! | `count`     | Action                                                        |
//! |-------------|---------------------------------------------------------------|
//! | `< q`       | shift byte `1 + count + q·group`; close window at blank tick  |
//! | `q`         | latch; close window if blank tick is `q` or `q + 1`           |
//! | `q + 1`     | select rows, next group; on wrap count a refresh, next frame  |
//! | `q + 2`     | blank tick from duty; open window unless duty is 0            |
//! | otherwise   | close window at blank tick                                    |

use crate::ring::RingConsumer;
use crate::scan::row_group::RowGroup;
use crate::scan::window::blank_tick;
use crate::traits::PanelBus;

/// Interrupt-side driver of the panel
///
/// `N` is the frame length including the duty byte.
pub struct ScanEngine<'a, const N: usize> {
    ring: RingConsumer<'a, N>,
    count: u8,
    group: RowGroup,
    blank_at: u8,
}

impl<'a, const N: usize> ScanEngine<'a, N> {
    /// Bytes shifted per row-group
    ///
    /// Fails to compile for frames whose row-group plus the three control
    /// ticks would not fit a 256-tick sweep.
    pub const SHIFT_TICKS: u8 = {
        assert!(
            N > 1 && (N - 1) % 4 == 0,
            "frame payload must split into 4 row-groups"
        );
        assert!((N - 1) / 4 + 3 <= 256, "row-group does not fit one sweep");
        ((N - 1) / 4) as u8
    };

    /// Start at tick 0 of row-group 0, blanked
    pub fn new(ring: RingConsumer<'a, N>) -> Self {
        Self {
            ring,
            count: 0,
            group: RowGroup::default(),
            blank_at: 0,
        }
    }

    /// Run one scan tick
    pub fn tick<B: PanelBus>(&mut self, bus: &mut B) {
        let q = Self::SHIFT_TICKS;
        let count = self.count;

        if count < q {
            let index = 1 + count as usize + q as usize * self.group.index();
            bus.shift_out(self.ring.byte(index));
            if self.blank_at == count {
                bus.set_output_enable(false);
            }
        } else if count == q {
            bus.latch();
            // q + 1 is the row-select tick, which does not check the window
            if self.blank_at == q || self.blank_at == q + 1 {
                bus.set_output_enable(false);
            }
        } else if count == q + 1 {
            bus.select_row_group(self.group);
            self.group = self.group.next();
            if self.group.is_first() {
                self.ring.tick();
                self.ring.try_advance();
            }
        } else if count == q + 2 {
            self.blank_at = blank_tick(self.ring.duty(), q);
            if self.blank_at != q + 2 {
                bus.set_output_enable(true);
            }
        } else if self.blank_at == count {
            bus.set_output_enable(false);
        }

        self.count = count.wrapping_add(1);
    }

    /// Scan counter position of the next tick
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Row-group the next sweep shifts
    pub fn row_group(&self) -> RowGroup {
        self.group
    }

    /// Tick at which the current lit window closes
    pub fn blank_at(&self) -> u8 {
        self.blank_at
    }

    /// The ring handle, for observing the displayed slot
    pub fn ring(&self) -> &RingConsumer<'a, N> {
        &self.ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::{FrameRing, RingProducer};
    use crate::scan::window::lit_ticks;
    use crate::scan::SWEEP_TICKS;

    const LEN: usize = 65;

    /// Mock panel recording what the engine drove
    #[derive(Default)]
    struct MockPanel {
        shifted: std::vec::Vec<u8>,
        latches: usize,
        selects: std::vec::Vec<usize>,
        lit: bool,
        lit_ticks: u32,
        ever_lit: bool,
    }

    impl PanelBus for MockPanel {
        fn shift_out(&mut self, byte: u8) {
            self.shifted.push(byte);
        }

        fn latch(&mut self) {
            self.latches += 1;
        }

        fn select_row_group(&mut self, group: RowGroup) {
            self.selects.push(group.index());
        }

        fn set_output_enable(&mut self, lit: bool) {
            self.lit = lit;
            self.ever_lit |= lit;
        }
    }

    fn run(engine: &mut ScanEngine<'_, LEN>, panel: &mut MockPanel, ticks: u32) {
        for _ in 0..ticks {
            engine.tick(panel);
            if panel.lit {
                panel.lit_ticks += 1;
            }
        }
    }

    fn commit(producer: &mut RingProducer<'_, LEN>, duty: u8) {
        producer.store(0, duty);
        for index in 1..LEN {
            producer.store(index, index as u8);
        }
        producer.commit();
    }

    #[test]
    fn test_shift_ticks_for_single_panel() {
        assert_eq!(ScanEngine::<LEN>::SHIFT_TICKS, 16);
        assert_eq!(ScanEngine::<{ 1 + 15 * 64 }>::SHIFT_TICKS, 240);
    }

    #[test]
    fn test_sweep_shifts_one_row_group_and_latches() {
        let mut ring = FrameRing::<LEN>::new();
        let (mut producer, consumer) = ring.split();
        let mut engine = ScanEngine::new(consumer);
        let mut panel = MockPanel::default();

        // Put a frame on display first
        commit(&mut producer, 10);
        run(&mut engine, &mut panel, 4 * SWEEP_TICKS);
        assert_eq!(engine.ring().duty(), 10);

        panel.shifted.clear();
        run(&mut engine, &mut panel, SWEEP_TICKS);
        let expected: std::vec::Vec<u8> = (1..=16).collect();
        assert_eq!(panel.shifted, expected);

        run(&mut engine, &mut panel, SWEEP_TICKS);
        assert_eq!(panel.shifted[16], 17);
        assert_eq!(panel.shifted.len(), 32);
        assert_eq!(panel.latches, 6);
    }

    #[test]
    fn test_row_select_cycles_and_refresh_ticks() {
        let mut ring = FrameRing::<LEN>::new();
        let (producer, consumer) = ring.split();
        let mut engine = ScanEngine::new(consumer);
        let mut panel = MockPanel::default();

        run(&mut engine, &mut panel, 8 * SWEEP_TICKS);
        assert_eq!(panel.selects, [0, 1, 2, 3, 0, 1, 2, 3]);
        assert_eq!(producer.refresh_tick(), 2);
        assert_eq!(engine.row_group().index(), 0);
        assert_eq!(engine.count(), 0);
    }

    #[test]
    fn test_advances_only_on_refresh_boundary() {
        let mut ring = FrameRing::<LEN>::new();
        let (mut producer, consumer) = ring.split();
        let mut engine = ScanEngine::new(consumer);
        let mut panel = MockPanel::default();

        commit(&mut producer, 1);
        commit(&mut producer, 2);

        // Three sweeps in, still on the initial slot
        run(&mut engine, &mut panel, 3 * SWEEP_TICKS);
        assert_eq!(engine.ring().read_index().value(), 0);

        run(&mut engine, &mut panel, SWEEP_TICKS);
        assert_eq!(engine.ring().duty(), 1);

        run(&mut engine, &mut panel, 4 * SWEEP_TICKS);
        assert_eq!(engine.ring().duty(), 2);

        // Nothing new: keep showing frame 2
        run(&mut engine, &mut panel, 8 * SWEEP_TICKS);
        assert_eq!(engine.ring().duty(), 2);
        assert_eq!(engine.ring().read_index().value(), 2);
    }

    #[test]
    fn test_duty_zero_stays_blank() {
        let mut ring = FrameRing::<LEN>::new();
        let (mut producer, consumer) = ring.split();
        let mut engine = ScanEngine::new(consumer);
        let mut panel = MockPanel::default();

        commit(&mut producer, 0);
        run(&mut engine, &mut panel, 16 * SWEEP_TICKS);

        assert_eq!(engine.blank_at(), ScanEngine::<LEN>::SHIFT_TICKS + 2);
        assert!(!panel.ever_lit);
        assert_eq!(panel.lit_ticks, 0);
    }

    #[test]
    fn test_lit_window_matches_duty() {
        for duty in [1u8, 17, 100, 237, 238, 239, 254, 255] {
            let mut ring = FrameRing::<LEN>::new();
            let (mut producer, consumer) = ring.split();
            let mut engine = ScanEngine::new(consumer);
            let mut panel = MockPanel::default();

            commit(&mut producer, duty);
            // Reach the frame, then settle one sweep
            run(&mut engine, &mut panel, 5 * SWEEP_TICKS);

            panel.lit_ticks = 0;
            run(&mut engine, &mut panel, 4 * SWEEP_TICKS);
            assert_eq!(panel.lit_ticks, 4 * lit_ticks(duty), "duty {}", duty);
        }
    }

    #[test]
    fn test_dimming_to_zero_closes_window() {
        let mut ring = FrameRing::<LEN>::new();
        let (mut producer, consumer) = ring.split();
        let mut engine = ScanEngine::new(consumer);
        let mut panel = MockPanel::default();

        commit(&mut producer, 255);
        run(&mut engine, &mut panel, 8 * SWEEP_TICKS);
        assert!(panel.ever_lit);

        commit(&mut producer, 0);
        run(&mut engine, &mut panel, 4 * SWEEP_TICKS + 3);
        assert_eq!(engine.ring().duty(), 0);

        panel.lit_ticks = 0;
        run(&mut engine, &mut panel, 4 * SWEEP_TICKS);
        assert!(!panel.lit);
        assert_eq!(panel.lit_ticks, 0);
    }
}
