//! Brightness window arithmetic
//!
//! The panel is lit from the third control tick of a sweep until the scan
//! counter reaches the blank tick. The blank tick is the duty byte offset by
//! that opening tick, wrapping at 256, and is kept exactly as the hardware
//! has always computed it.

/// Scan tick at which the lit window closes
///
/// `shift_ticks` is the number of bytes shifted per row-group. The window
/// opens at `shift_ticks + 2`; a result equal to that tick means the window
/// never opens (duty 0).
pub const fn blank_tick(duty: u8, shift_ticks: u8) -> u8 {
    duty.wrapping_add(shift_ticks).wrapping_add(2)
}

/// Lit ticks per 256-tick sweep for a duty value
///
/// Equal to `duty`, except that 255 lands the blank tick on the row-select
/// tick, which never checks it, so the latch tick closes the window one
/// tick early.
pub const fn lit_ticks(duty: u8) -> u32 {
    if duty == u8::MAX {
        duty as u32 - 1
    } else {
        duty as u32
    }
}
