//! Scan task
//!
//! Drives one [`ScanEngine`] tick per ticker period. Runs on the interrupt
//! executor so the foreground receiver loop can never delay a tick.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Ticker;
use ledwall_core::ScanEngine;
use ledwall_drivers::GpioPanel;
use ledwall_hal_rp2040::{BlockingShifter, RpOutput};

use crate::config::{FRAME_LEN, SCAN_TICK};

/// The board's panel driver
pub type Panel = GpioPanel<
    BlockingShifter<Spi<'static, SPI0, Blocking>>,
    RpOutput<'static>,
    RpOutput<'static>,
    RpOutput<'static>,
    RpOutput<'static>,
>;

/// Refreshes between shift-fault reports
const FAULT_REPORT_REFRESHES: u32 = 100;

/// Scan task - one engine tick per period, forever
#[embassy_executor::task]
pub async fn scan_task(mut engine: ScanEngine<'static, FRAME_LEN>, mut panel: Panel) {
    info!(
        "Scan task started: {} bytes per row-group, tick {} us",
        ScanEngine::<FRAME_LEN>::SHIFT_TICKS,
        SCAN_TICK.as_micros()
    );

    let mut ticker = Ticker::every(SCAN_TICK);
    let mut reported_faults = 0u32;
    let mut ticks = 0u32;

    loop {
        ticker.next().await;
        engine.tick(&mut panel);

        ticks = ticks.wrapping_add(1);
        if ticks % (FAULT_REPORT_REFRESHES * 1024) == 0 && panel.shift_faults() != reported_faults {
            reported_faults = panel.shift_faults();
            warn!("Panel SPI refused {} bytes so far", reported_faults);
        }
    }
}

/// Build the panel driver from configured pins
pub fn panel(
    spi: Spi<'static, SPI0, Blocking>,
    a: Output<'static>,
    b: Output<'static>,
    latch: Output<'static>,
    output_enable: Output<'static>,
) -> Panel {
    GpioPanel::new(
        BlockingShifter::new(spi),
        ledwall_drivers::PanelPins {
            a: RpOutput::new(a),
            b: RpOutput::new(b),
            latch: RpOutput::new(latch),
            output_enable: RpOutput::new(output_enable),
        },
        crate::config::DATA_POLARITY,
        crate::config::OE_INVERTED,
    )
}
