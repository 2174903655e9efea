//! Foreground receiver loop
//!
//! Polls the handshake bus as fast as the core allows. Never returns.

use defmt::*;
use ledwall_core::{HandshakeReceiver, ReceiverEvent};
use ledwall_drivers::GpioLink;
use ledwall_hal_rp2040::{RpInput, RpOutput, SioDataPort};

use crate::config::FRAME_LEN;

/// The board's handshake link
pub type Link = GpioLink<SioDataPort<'static>, RpInput<'static>, RpOutput<'static>>;

/// Receive frames into the ring forever
pub fn receive_loop(mut receiver: HandshakeReceiver<'static, FRAME_LEN>, mut link: Link) -> ! {
    info!("Receiver loop started, {} byte frames", FRAME_LEN);

    let mut frames: u32 = 0;
    loop {
        let Some(event) = receiver.poll(&mut link) else {
            continue;
        };

        match event {
            ReceiverEvent::Started { duty } => trace!("Frame start, duty {}", duty),
            ReceiverEvent::Committed => {
                frames = frames.wrapping_add(1);
                let queued = receiver.ring().queued();
                trace!("Frame {} committed, {} queued", frames, queued);
            }
            ReceiverEvent::RingFull => debug!("Ring full, holding transmitter"),
            ReceiverEvent::Dropped { received } => warn!(
                "Transmitter stalled after {} of {} bytes, frame dropped",
                received,
                FRAME_LEN
            ),
            ReceiverEvent::ForcedRelease => warn!("Request stuck high after frame, releasing"),
            ReceiverEvent::Resynchronized => info!("Bus resynchronized"),
        }
    }
}
