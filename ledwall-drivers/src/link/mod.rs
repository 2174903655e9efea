//! Handshake bus drivers

pub mod gpio;

pub use gpio::GpioLink;
