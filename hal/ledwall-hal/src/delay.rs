//! Calibrated busy waits
//!
//! Settle delays on the handshake bus are far below what an OS sleep or a
//! timer tick can express, so they are spun. [`SpinDelay`] carries its own
//! calibration so the same contract holds across clock speeds.

/// Busy-wait delay measured in abstract units
///
/// One unit is one [`core::hint::spin_loop`] iteration, which is roughly one
/// pipeline-drained `nop` on the cores this project targets. The calibration
/// factor scales units for faster or slower cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinDelay {
    /// Spin iterations per unit
    spins_per_unit: u32,
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SpinDelay {
    /// Create a delay with the given calibration (clamped to at least 1)
    pub const fn new(spins_per_unit: u32) -> Self {
        Self {
            spins_per_unit: if spins_per_unit == 0 {
                1
            } else {
                spins_per_unit
            },
        }
    }

    /// Spin iterations per unit
    pub const fn spins_per_unit(&self) -> u32 {
        self.spins_per_unit
    }

    /// Number of iterations `units` will spin for
    pub const fn spins_for(&self, units: u32) -> u32 {
        units.saturating_mul(self.spins_per_unit)
    }

    /// Busy-wait for `units`
    #[inline(never)]
    pub fn wait(&self, units: u32) {
        for _ in 0..self.spins_for(units) {
            core::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_calibration_clamped() {
        assert_eq!(SpinDelay::new(0).spins_per_unit(), 1);
    }

    #[test]
    fn test_spins_scale_and_saturate() {
        let delay = SpinDelay::new(4);
        assert_eq!(delay.spins_for(64), 256);
        assert_eq!(delay.spins_for(u32::MAX), u32::MAX);
        delay.wait(16);
    }
}
