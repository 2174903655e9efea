//! Bit-bang transmitter
//!
//! Drives one frame at a time over the parallel bus. Each byte is put on the
//! data lines, given time to settle, then announced by moving request to the
//! byte's parity level. The transmitter waits for acknowledge to follow
//! before the next byte. There is no timeout: a receiver that stalls
//! recovers on its own, and the transmitter only has to avoid starting a
//! frame while the receiver is still in recovery.

use std::thread;
use std::time::Instant;

use ledwall_protocol::{ack_level, request_level, Frame, PanelGrid};
use tracing::{debug, info, warn};

use crate::error::TransmitError;
use crate::gpiomem::GpioMem;
use crate::pacing::Pacing;
use crate::pins::{BusPins, ByteMasks};
use crate::registers::{
    set_function, GpioRegisters, CLEAR_OFFSET, FSEL_OUTPUT, LEVEL_OFFSET, SET_OFFSET,
};

/// Function-select code for an input
const FSEL_INPUT: u32 = 0b000;

/// Sender end of the parallel handshake bus
pub struct Transmitter<R: GpioRegisters = GpioMem> {
    registers: R,
    grid: PanelGrid,
    pins: BusPins,
    masks: ByteMasks,
    pacing: Pacing,
    last_completed: Option<Instant>,
}

impl Transmitter<GpioMem> {
    /// Take over `/dev/gpiomem` with the default wiring and timing
    pub fn open(grid: PanelGrid) -> Result<Self, TransmitError> {
        Self::open_with(grid, BusPins::default(), Pacing::default())
    }

    /// Take over `/dev/gpiomem` with explicit wiring and timing
    pub fn open_with(
        grid: PanelGrid,
        pins: BusPins,
        pacing: Pacing,
    ) -> Result<Self, TransmitError> {
        let registers = GpioMem::open()?;
        Self::with_registers(registers, grid, pins, pacing)
    }
}

impl<R: GpioRegisters> Transmitter<R> {
    /// Claim the bus pins in `registers` and resynchronize the receiver
    ///
    /// Programs the pin functions, drives the clear pattern, waits the
    /// startup delay and sends the warm-up frames.
    pub fn with_registers(
        registers: R,
        grid: PanelGrid,
        pins: BusPins,
        pacing: Pacing,
    ) -> Result<Self, TransmitError> {
        let mut transmitter = Self {
            registers,
            grid,
            pins,
            masks: ByteMasks::new(&pins),
            pacing,
            last_completed: None,
        };

        set_function(&mut transmitter.registers, &pins.outputs(), FSEL_OUTPUT);
        let acknowledge = [pins.acknowledge()];
        set_function(&mut transmitter.registers, &acknowledge, FSEL_INPUT);
        transmitter.clear();

        info!(
            width = grid.width(),
            height = grid.height(),
            frame_len = grid.frame_len(),
            "transmitter claimed the bus"
        );

        if !pacing.startup_delay.is_zero() {
            thread::sleep(pacing.startup_delay);
        }

        let blank = vec![0u8; grid.frame_len()];
        for _ in 0..pacing.warmup_frames {
            transmitter.send(&blank)?;
        }
        debug!(frames = pacing.warmup_frames, "warm-up frames sent");

        Ok(transmitter)
    }

    /// Send one frame, blocking until the receiver has taken every byte
    ///
    /// `frame` is the duty byte followed by the row-major payload. A frame
    /// of the wrong length is rejected before anything is driven.
    pub fn send(&mut self, frame: &[u8]) -> Result<(), TransmitError> {
        let frame = Frame::new(self.grid, frame)?;

        for (index, byte) in frame.wire_bytes().enumerate() {
            self.send_byte(index, byte);
        }

        self.last_completed = Some(Instant::now());
        debug!(duty = frame.duty(), "frame sent");
        Ok(())
    }

    fn send_byte(&mut self, index: usize, byte: u8) {
        let Pacing { settle, spin, .. } = self.pacing;

        spin.wait(settle);
        let (set, clear) = (self.masks.set_mask(byte), self.masks.clear_mask(byte));
        self.registers.write(SET_OFFSET, set);
        self.registers.write(CLEAR_OFFSET, clear);
        spin.wait(settle);

        let request = self.pins.request_mask();
        if request_level(index) {
            self.registers.write(SET_OFFSET, request);
        } else {
            self.registers.write(CLEAR_OFFSET, request);
        }

        let expected = ack_level(index);
        if index == 0 {
            if let Some(previous) = self.last_completed {
                sleep_until(previous + self.pacing.frame_spacing);
                if self.acknowledge() != expected {
                    warn!("receiver still recovering, waiting it out");
                    sleep_until(previous + self.pacing.recovery_wait);
                }
            }
        }

        while self.acknowledge() != expected {
            core::hint::spin_loop();
        }
    }

    fn acknowledge(&mut self) -> bool {
        self.registers.read(LEVEL_OFFSET) & self.pins.acknowledge_mask() != 0
    }

    /// Drive every data line and request low
    fn clear(&mut self) {
        let pattern = self.masks.all_data() | self.pins.request_mask();
        self.registers.write(CLEAR_OFFSET, pattern);
    }

    /// When the last frame finished, if any has
    pub fn last_completed(&self) -> Option<Instant> {
        self.last_completed
    }

    /// Wall this transmitter was opened for
    pub fn grid(&self) -> PanelGrid {
        self.grid
    }

    /// Pin wiring in use
    pub fn pins(&self) -> BusPins {
        self.pins
    }

    /// The register window
    pub fn registers(&self) -> &R {
        &self.registers
    }
}

impl<R: GpioRegisters> Drop for Transmitter<R> {
    fn drop(&mut self) {
        self.clear();
        set_function(&mut self.registers, &self.pins.all(), FSEL_INPUT);
        info!("transmitter released the bus");
    }
}

fn sleep_until(deadline: Instant) {
    let left = deadline.saturating_duration_since(Instant::now());
    if !left.is_zero() {
        thread::sleep(left);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::WINDOW_WORDS;

    /// Register window whose acknowledge line mirrors request
    ///
    /// Records the data byte every time request changes level.
    struct EchoBus {
        words: [u32; WINDOW_WORDS],
        pins: BusPins,
        sent: Vec<u8>,
        writes: usize,
    }

    impl EchoBus {
        fn new() -> Self {
            Self {
                words: [0; WINDOW_WORDS],
                pins: BusPins::HEADER,
                sent: Vec::new(),
                writes: 0,
            }
        }

        fn levels(&self) -> u32 {
            self.words[LEVEL_OFFSET]
        }

        fn data(&self) -> u8 {
            let levels = self.levels();
            self.pins
                .data()
                .iter()
                .enumerate()
                .filter(|(_, pin)| levels & (1 << **pin) != 0)
                .fold(0, |byte, (bit, _)| byte | (1 << bit))
        }
    }

    impl GpioRegisters for EchoBus {
        fn read(&mut self, offset: usize) -> u32 {
            if offset == LEVEL_OFFSET {
                let request = self.levels() & self.pins.request_mask() != 0;
                let ack = self.pins.acknowledge_mask();
                if request {
                    self.levels() | ack
                } else {
                    self.levels() & !ack
                }
            } else {
                self.words[offset]
            }
        }

        fn write(&mut self, offset: usize, value: u32) {
            self.writes += 1;
            let before = self.levels() & self.pins.request_mask();
            match offset {
                SET_OFFSET => self.words[LEVEL_OFFSET] |= value,
                CLEAR_OFFSET => self.words[LEVEL_OFFSET] &= !value,
                _ => self.words[offset] = value,
            }
            if self.levels() & self.pins.request_mask() != before {
                let byte = self.data();
                self.sent.push(byte);
            }
        }
    }

    fn single_panel() -> PanelGrid {
        PanelGrid::new(1, 1).unwrap()
    }

    fn open(bus: &mut EchoBus, grid: PanelGrid, pacing: Pacing) -> Transmitter<&mut EchoBus> {
        Transmitter::with_registers(bus, grid, BusPins::HEADER, pacing).unwrap()
    }

    fn no_warmup() -> Pacing {
        Pacing {
            warmup_frames: 0,
            ..Pacing::immediate()
        }
    }

    #[test]
    fn test_open_programs_pins_and_warms_up() {
        let mut bus = EchoBus::new();
        // Unrelated pins keep their function
        bus.words[0] = 0b100 << 6;
        let transmitter = open(&mut bus, single_panel(), Pacing::immediate());
        assert!(transmitter.last_completed().is_some());
        drop(transmitter);

        // Eight frames of 66 wire bytes, all zero
        assert_eq!(bus.sent.len(), 8 * 66);
        assert!(bus.sent.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_function_select_while_open() {
        let mut bus = EchoBus::new();
        bus.words[2] = 0b001 << 6; // GPIO 22 left as output by someone else
        let transmitter = open(&mut bus, single_panel(), no_warmup());
        let words = &transmitter.registers().words;
        assert_eq!(words[0], 0b00000000000001001000000000000000);
        assert_eq!(words[1], 0b00001000000001000000001000000000);
        assert_eq!(words[2], 0b00000000001001000000000000001001);
    }

    #[test]
    fn test_frame_goes_out_in_wire_order() {
        let mut bus = EchoBus::new();
        let grid = PanelGrid::new(2, 1).unwrap();
        let mut frame = vec![0u8; grid.frame_len()];
        frame[0] = 0x5A;
        for (i, byte) in frame[1..].iter_mut().enumerate() {
            *byte = (i * 7) as u8;
        }

        {
            let mut transmitter = open(&mut bus, grid, no_warmup());
            transmitter.send(&frame).unwrap();
        }

        let expected: Vec<u8> = Frame::new(grid, &frame).unwrap().wire_bytes().collect();
        assert_eq!(bus.sent, expected);
        assert_eq!(bus.sent.len(), grid.frame_len() + 1);
    }

    #[test]
    fn test_size_mismatch_drives_nothing() {
        let mut bus = EchoBus::new();
        let mut transmitter = open(&mut bus, single_panel(), Pacing::immediate());
        let completed = transmitter.last_completed();
        let writes = transmitter.registers().writes;

        for len in [0, 1, 64, 66, 129] {
            let err = transmitter.send(&vec![1u8; len]).unwrap_err();
            assert!(matches!(
                err,
                TransmitError::SizeMismatch { expected: 65, actual } if actual == len
            ));
        }

        assert_eq!(transmitter.last_completed(), completed);
        assert_eq!(transmitter.registers().writes, writes);
    }

    #[test]
    fn test_drop_releases_bus() {
        let mut bus = EchoBus::new();
        bus.words[0] = 0b100 << 6;
        {
            let mut transmitter = open(&mut bus, single_panel(), no_warmup());
            let mut frame = [0xFFu8; 65];
            frame[0] = 200;
            transmitter.send(&frame).unwrap();
        }

        assert_eq!(bus.words[0], 0b100 << 6);
        assert_eq!(bus.words[1], 0);
        assert_eq!(bus.words[2], 0);
        let bus_lines =
            ByteMasks::new(&BusPins::HEADER).all_data() | BusPins::HEADER.request_mask();
        assert_eq!(bus.levels() & bus_lines, 0);
    }
}
