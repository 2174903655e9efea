//! Panel chain output drivers

pub mod gpio;

pub use gpio::{DataPolarity, GpioPanel, PanelPins};
