//! Logical to physical byte order
//!
//! Frames arrive in row-major order (top-left origin, panels tiled left to
//! right then top to bottom). The receiver streams bytes to the panels in
//! scan order, so the transmitter reorders the payload on the way out.
//!
//! The microcontroller sits on the panel at grid coordinates
//! `(width - 1, height - 1)` and the chain snakes back from there, which is
//! why interlaced rows count down (`3 - row`).

use crate::grid::{PanelGrid, ROW_GROUPS};

/// Columns per panel per row-group, in bytes
const COLUMNS: usize = 4;

/// Interlaced rows per row-group
const ROWS: usize = 4;

/// Row-major payload offset of one scan position
///
/// - `ab`: row-group, in `[0, 4)`
/// - `panel`: chain index, in `[0, width * height)`
/// - `row`: interlaced row within the group, in `[0, 4)`
/// - `column`: byte column, in `[0, 4)`
///
/// The returned offset excludes the duty byte. Out-of-range arguments are a
/// caller bug.
pub fn frame_offset(grid: &PanelGrid, ab: u8, panel: usize, row: u8, column: u8) -> usize {
    debug_assert!((ab as usize) < ROW_GROUPS, "row-group out of range");
    debug_assert!(panel < grid.panel_count(), "panel out of range");
    debug_assert!((row as usize) < ROWS, "row out of range");
    debug_assert!((column as usize) < COLUMNS, "column out of range");

    let width = grid.width();
    let (ab, row, column) = (ab as usize, row as usize, column as usize);
    column
        + (panel % width) * COLUMNS
        + ((ROWS - 1 - row) * ROW_GROUPS + ab + (panel / width) * 16) * width * COLUMNS
}

/// Payload offsets in transmission order
///
/// Iterates row-group, then panel, then column, then row, yielding the
/// row-major offset the next transmitted byte comes from.
#[derive(Debug, Clone)]
pub struct TransmitOrder {
    grid: PanelGrid,
    position: usize,
}

impl TransmitOrder {
    /// Start at the first scan position of `grid`
    pub fn new(grid: PanelGrid) -> Self {
        Self { grid, position: 0 }
    }
}

impl Iterator for TransmitOrder {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.position >= self.grid.payload_len() {
            return None;
        }
        let k = self.position;
        self.position += 1;

        let row = (k % ROWS) as u8;
        let column = ((k / ROWS) % COLUMNS) as u8;
        let per_group = COLUMNS * ROWS;
        let panel = (k / per_group) % self.grid.panel_count();
        let ab = (k / (per_group * self.grid.panel_count())) as u8;
        Some(frame_offset(&self.grid, ab, panel, row, column))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.grid.payload_len().saturating_sub(self.position);
        (left, Some(left))
    }
}

impl ExactSizeIterator for TransmitOrder {}
