//! Hardware abstraction traits
//!
//! These traits define the interface between the pipeline logic and the
//! board-specific drivers.

pub mod link;
pub mod panel;

pub use link::HandshakePort;
pub use panel::PanelBus;
