//! Stream frames from stdin to the wall
//!
//! Each frame is the duty byte followed by `64 × width × height` row-major
//! pixel bytes. The stream ends at the first short read.

use std::io::{self, BufReader};

use anyhow::{Context, Result};
use clap::Parser;
use ledwall_protocol::PanelGrid;
use ledwall_sender::{FrameSource, Transmitter};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ledwall-sink",
    version,
    about = "Send raw frames from stdin to the LED wall"
)]
struct Cli {
    /// Panels across
    width: u8,
    /// Panels down
    height: u8,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let grid = PanelGrid::new(cli.width, cli.height)
        .map_err(ledwall_sender::TransmitError::from)
        .context("bad wall size")?;
    let mut transmitter = Transmitter::open(grid).context("cannot take over the GPIO bus")?;

    let stdin = io::stdin();
    let mut source = FrameSource::new(BufReader::new(stdin.lock()), grid.frame_len());
    while let Some(frame) = source.next_frame()? {
        transmitter.send(frame)?;
    }

    info!(frames = source.frames_read(), "input ended");
    Ok(())
}
