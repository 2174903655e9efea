//! Panel bus over GPIO pins and a write-only SPI shifter
//!
//! The panel chain's serial data and clock inputs hang off the SPI master,
//! so each scan tick costs one `write_byte`. At the default 8 MHz a byte
//! clears the shifter in 1 µs, well inside a scan tick.

use ledwall_core::scan::RowGroup;
use ledwall_core::traits::PanelBus;
use ledwall_hal::{OutputPin, SpiWrite};

/// Logic level meaning "LED on" on the data lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataPolarity {
    /// A set bit drives the line high
    #[default]
    ActiveHigh,
    /// A set bit drives the line low (inverting level shifters)
    ActiveLow,
}

impl DataPolarity {
    /// Convert a logical pixel byte to the levels put on the wire
    pub fn apply(self, byte: u8) -> u8 {
        match self {
            DataPolarity::ActiveHigh => byte,
            DataPolarity::ActiveLow => !byte,
        }
    }
}

/// Control pins of the panel chain
pub struct PanelPins<A, B, LAT, OE> {
    /// Row-select bit 0
    pub a: A,
    /// Row-select bit 1
    pub b: B,
    /// Latch strobe
    pub latch: LAT,
    /// Output enable
    pub output_enable: OE,
}

/// GPIO panel driver
///
/// Pass `oe_inverted = true` when the output-enable line is wired
/// active-low.
pub struct GpioPanel<SPI, A, B, LAT, OE> {
    spi: SPI,
    pins: PanelPins<A, B, LAT, OE>,
    data: DataPolarity,
    /// If true, panel lit = OE pin LOW
    oe_inverted: bool,
    /// Shifts the SPI peripheral refused
    shift_faults: u32,
}

impl<SPI, A, B, LAT, OE> GpioPanel<SPI, A, B, LAT, OE>
where
    SPI: SpiWrite,
    A: OutputPin,
    B: OutputPin,
    LAT: OutputPin,
    OE: OutputPin,
{
    /// Create the driver with the panel blanked, latch idle and rows 0 selected
    pub fn new(
        spi: SPI,
        pins: PanelPins<A, B, LAT, OE>,
        data: DataPolarity,
        oe_inverted: bool,
    ) -> Self {
        let mut panel = Self {
            spi,
            pins,
            data,
            oe_inverted,
            shift_faults: 0,
        };
        panel.set_output_enable(false);
        panel.pins.latch.set_low();
        panel.select_row_group(RowGroup::default());
        panel
    }

    /// Number of bytes the SPI peripheral failed to shift
    pub fn shift_faults(&self) -> u32 {
        self.shift_faults
    }
}

impl<SPI, A, B, LAT, OE> PanelBus for GpioPanel<SPI, A, B, LAT, OE>
where
    SPI: SpiWrite,
    A: OutputPin,
    B: OutputPin,
    LAT: OutputPin,
    OE: OutputPin,
{
    fn shift_out(&mut self, byte: u8) {
        // Nothing to report to from interrupt context; a lost byte shows
        // for one refresh only
        if self.spi.write_byte(self.data.apply(byte)).is_err() {
            self.shift_faults = self.shift_faults.saturating_add(1);
        }
    }

    fn latch(&mut self) {
        self.pins.latch.pulse();
    }

    fn select_row_group(&mut self, group: RowGroup) {
        self.pins.a.set_state(group.line_a());
        self.pins.b.set_state(group.line_b());
    }

    fn set_output_enable(&mut self, lit: bool) {
        self.pins.output_enable.set_state(lit != self.oe_inverted);
    }
}
