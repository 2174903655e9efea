//! Panel grid geometry
//!
//! A wall is a `width × height` grid of 32x16 sub-panels. Each sub-panel
//! contributes 64 payload bytes to a frame (4 row-groups × 4 columns × 4
//! interlaced rows, each byte holding 8 serial lines).

/// Payload bytes contributed by one sub-panel
pub const PANEL_BYTES: usize = 64;

/// Number of interleaved row-groups scanned per refresh
pub const ROW_GROUPS: usize = 4;

/// Scan ticks per row-group sweep (one full turn of the 8-bit scan counter)
pub const SWEEP_TICKS: usize = 256;

/// Control ticks the scan engine needs after shifting (latch, row select, window)
pub const CONTROL_TICKS: usize = 3;

/// Largest panel count whose row-group still fits one sweep
///
/// Each row-group shifts `16 × panels` bytes plus [`CONTROL_TICKS`], and all of
/// it must fit the 256-tick counter.
pub const MAX_PANELS: usize = (SWEEP_TICKS - CONTROL_TICKS) / (PANEL_BYTES / ROW_GROUPS);

/// Errors for an invalid grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GridError {
    /// Width must be at least one panel
    ZeroWidth,
    /// Height must be at least one panel
    ZeroHeight,
    /// More panels than one scan sweep can address
    TooManyPanels {
        /// Requested panel count
        panels: usize,
    },
}

impl core::fmt::Display for GridError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GridError::ZeroWidth => f.write_str("width must be at least one panel"),
            GridError::ZeroHeight => f.write_str("height must be at least one panel"),
            GridError::TooManyPanels { panels } => write!(
                f,
                "{} panels exceed the {} a scan sweep can address",
                panels, MAX_PANELS
            ),
        }
    }
}

/// Frame length (duty byte included) for a `width × height` panel grid
///
/// Usable in const context so firmware can size its ring slots at compile time.
pub const fn frame_len(width: usize, height: usize) -> usize {
    1 + width * height * PANEL_BYTES
}

/// Validated panel grid
///
/// Dimensions are counted in panels, not pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGrid {
    width: u8,
    height: u8,
}

impl PanelGrid {
    /// Create a grid, rejecting empty or oversized walls
    pub const fn new(width: u8, height: u8) -> Result<Self, GridError> {
        if width == 0 {
            return Err(GridError::ZeroWidth);
        }
        if height == 0 {
            return Err(GridError::ZeroHeight);
        }
        let panels = width as usize * height as usize;
        if panels > MAX_PANELS {
            return Err(GridError::TooManyPanels { panels });
        }
        Ok(Self { width, height })
    }

    /// Panels across
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    /// Panels down
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Total number of panels
    pub const fn panel_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Pixel payload length (duty byte excluded)
    pub const fn payload_len(&self) -> usize {
        self.panel_count() * PANEL_BYTES
    }

    /// Full frame length (duty byte included)
    pub const fn frame_len(&self) -> usize {
        frame_len(self.width(), self.height())
    }

    /// Bytes shifted out per row-group, which is also the shift tick count
    pub const fn row_group_len(&self) -> usize {
        self.payload_len() / ROW_GROUPS
    }

    /// Pixel dimensions `(columns, rows)`
    pub const fn pixels(&self) -> (usize, usize) {
        (self.width() * 32, self.height() * 16)
    }
}
