//! Frame view and wire serialization
//!
//! A frame is the duty byte followed by the row-major payload. On the wire
//! the payload is reordered into scan order and followed by one dummy byte.

use crate::grid::PanelGrid;
use crate::mapping::TransmitOrder;

/// Index of the duty byte
pub const DUTY_INDEX: usize = 0;

/// Value of the trailing dummy byte
pub const DUMMY_BYTE: u8 = 0;

/// Errors that can occur when wrapping a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Buffer length disagrees with the grid
    SizeMismatch {
        /// Length required by the grid
        expected: usize,
        /// Length supplied
        actual: usize,
    },
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::SizeMismatch { expected, actual } => {
                write!(f, "frame is {} bytes, grid needs {}", actual, expected)
            }
        }
    }
}

/// Borrowed, length-checked frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    grid: PanelGrid,
    bytes: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Wrap `bytes`, which must be exactly `grid.frame_len()` long
    pub fn new(grid: PanelGrid, bytes: &'a [u8]) -> Result<Self, FrameError> {
        if bytes.len() != grid.frame_len() {
            return Err(FrameError::SizeMismatch {
                expected: grid.frame_len(),
                actual: bytes.len(),
            });
        }
        Ok(Self { grid, bytes })
    }

    /// Grid this frame was checked against
    pub fn grid(&self) -> PanelGrid {
        self.grid
    }

    /// Global brightness
    pub fn duty(&self) -> u8 {
        self.bytes[DUTY_INDEX]
    }

    /// Row-major pixel payload
    pub fn payload(&self) -> &'a [u8] {
        &self.bytes[DUTY_INDEX + 1..]
    }

    /// Bytes in wire order: duty, scan-ordered payload, dummy
    pub fn wire_bytes(&self) -> WireBytes<'a> {
        WireBytes {
            frame: *self,
            order: TransmitOrder::new(self.grid),
            stage: WireStage::Duty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WireStage {
    Duty,
    Payload,
    Done,
}

/// Iterator over a frame's wire bytes
#[derive(Debug, Clone)]
pub struct WireBytes<'a> {
    frame: Frame<'a>,
    order: TransmitOrder,
    stage: WireStage,
}

impl Iterator for WireBytes<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        match self.stage {
            WireStage::Duty => {
                self.stage = WireStage::Payload;
                Some(self.frame.duty())
            }
            WireStage::Payload => match self.order.next() {
                Some(offset) => Some(self.frame.payload()[offset]),
                None => {
                    self.stage = WireStage::Done;
                    Some(DUMMY_BYTE)
                }
            },
            WireStage::Done => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::frame_offset;

    fn ascending_frame(duty: u8) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[0] = duty;
        for (i, byte) in bytes[1..].iter_mut().enumerate() {
            *byte = i as u8;
        }
        bytes
    }

    #[test]
    fn test_size_mismatch() {
        let grid = PanelGrid::new(1, 1).unwrap();
        let bytes = [0u8; 64];
        assert_eq!(
            Frame::new(grid, &bytes),
            Err(FrameError::SizeMismatch {
                expected: 65,
                actual: 64
            })
        );
        let bytes = [0u8; 66];
        assert!(Frame::new(grid, &bytes).is_err());
    }

    #[test]
    fn test_wire_bytes_layout() {
        let grid = PanelGrid::new(1, 1).unwrap();
        let bytes = ascending_frame(200);
        let frame = Frame::new(grid, &bytes).unwrap();

        let mut wire = [0u8; 66];
        let mut len = 0;
        for byte in frame.wire_bytes() {
            wire[len] = byte;
            len += 1;
        }

        assert_eq!(len, 66);
        assert_eq!(wire[0], 200);
        assert_eq!(wire[65], DUMMY_BYTE);
        // First payload byte is row 0, column 0 of group 0
        assert_eq!(wire[1], frame_offset(&grid, 0, 0, 0, 0) as u8);
        assert_eq!(wire[1], 48);
        assert_eq!(wire[4], 0);
    }

    #[test]
    fn test_accessors() {
        let grid = PanelGrid::new(1, 1).unwrap();
        let bytes = ascending_frame(7);
        let frame = Frame::new(grid, &bytes).unwrap();
        assert_eq!(frame.duty(), 7);
        assert_eq!(frame.payload().len(), 64);
        assert_eq!(frame.payload()[63], 63);
    }
}
