//! Row-group selector

/// One of the four interleaved row-groups
///
/// A 2-bit value, always interpreted mod 4. Bit 0 drives row-select line A
/// and bit 1 drives line B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RowGroup(u8);

impl RowGroup {
    const MASK: u8 = 0b11;

    /// Wrap `value` into the 2-bit range
    pub const fn new(value: u8) -> Self {
        Self(value & Self::MASK)
    }

    /// Group number, 0..=3
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next group, wrapping 3 → 0
    pub const fn next(self) -> Self {
        Self::new(self.0.wrapping_add(1))
    }

    /// Whether this is group 0, i.e. a refresh just completed
    pub const fn is_first(self) -> bool {
        self.0 == 0
    }

    /// Level of row-select line A
    pub const fn line_a(self) -> bool {
        self.0 & 0b01 != 0
    }

    /// Level of row-select line B
    pub const fn line_b(self) -> bool {
        self.0 & 0b10 != 0
    }
}
