//! ledwall receiver firmware
//!
//! Receives frames from the companion computer over the parallel handshake
//! bus and scans them out to the panel chain at ~100 Hz.
//!
//! Two priority levels:
//!
//! - the scan task runs on an interrupt executor and preempts everything
//! - the receiver is a busy loop in thread mode
//!
//! They share nothing but the frame ring.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::InterruptExecutor;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::spi::Spi;
use ledwall_core::{FrameRing, HandshakeReceiver, ScanEngine};
use ledwall_drivers::GpioLink;
use ledwall_hal_rp2040::{embassy_config, RpInput, RpOutput, SioDataPort};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

mod config;
mod tasks;

use crate::config::{FRAME_LEN, PANEL_SPI};

/// Frame ring shared by the two priority levels
static RING: StaticCell<FrameRing<FRAME_LEN>> = StaticCell::new();

/// High-priority executor for the scan task
static EXECUTOR_SCAN: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_SCAN.on_interrupt()
}

#[entry]
fn main() -> ! {
    info!("ledwall firmware starting...");

    let p = embassy_rp::init(Default::default());

    let grid = config::GRID;
    let (columns, rows) = grid.pixels();
    info!(
        "Wall {}x{} panels ({}x{} pixels), {} byte frames",
        grid.width(),
        grid.height(),
        columns,
        rows,
        grid.frame_len()
    );

    let ring = RING.init_with(FrameRing::new);
    let (producer, consumer) = ring.split();

    // Panel chain: SPI0 on GPIO18/19, controls on GPIO10-13
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, embassy_config(&PANEL_SPI));
    let panel = tasks::scan::panel(
        spi,
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_13, Level::Low),
    );

    // Handshake bus: data on GPIO0-7, request GPIO8, acknowledge GPIO9
    let data = SioDataPort::new([
        Input::new(p.PIN_0, Pull::None),
        Input::new(p.PIN_1, Pull::None),
        Input::new(p.PIN_2, Pull::None),
        Input::new(p.PIN_3, Pull::None),
        Input::new(p.PIN_4, Pull::None),
        Input::new(p.PIN_5, Pull::None),
        Input::new(p.PIN_6, Pull::None),
        Input::new(p.PIN_7, Pull::None),
    ]);
    // Pulled down so a missing transmitter reads as idle
    let request = RpInput::new(Input::new(p.PIN_8, Pull::Down));
    let ack = RpOutput::new(Output::new(p.PIN_9, Level::Low));
    let link = GpioLink::new(data, request, ack);

    interrupt::SWI_IRQ_1.set_priority(Priority::P1);
    let spawner = EXECUTOR_SCAN.start(interrupt::SWI_IRQ_1);
    spawner
        .spawn(tasks::scan_task(ScanEngine::new(consumer), panel))
        .unwrap();
    info!("Scan task spawned");

    tasks::receive_loop(HandshakeReceiver::new(producer), link)
}
