//! Firmware tasks
//!
//! The scan runs as an async task on the high-priority interrupt executor.
//! The receiver is a plain busy loop in thread mode, preempted by the scan.

pub mod receive;
pub mod scan;

pub use receive::receive_loop;
pub use scan::{scan_task, Panel};
