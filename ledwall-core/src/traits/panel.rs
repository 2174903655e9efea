//! Panel output bus trait

use crate::scan::RowGroup;

/// The panel side of the scan engine
///
/// Implementations drive the serial data/clock pair, the two row-select
/// lines, the latch line and output-enable. Every method is called from the
/// scan interrupt and must return within a fraction of a scan tick.
pub trait PanelBus {
    /// Clock one byte out on the serial data line, MSB first
    fn shift_out(&mut self, byte: u8);

    /// Pulse latch, moving shifted bits to the column outputs
    fn latch(&mut self);

    /// Drive the row-select lines for `group`
    fn select_row_group(&mut self, group: RowGroup);

    /// Light (`true`) or blank (`false`) the whole panel
    fn set_output_enable(&mut self, lit: bool);
}
