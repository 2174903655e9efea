//! Sender errors

use std::io;

use ledwall_protocol::{FrameError, GridError};
use thiserror_no_std::Error;

/// Errors from the bit-bang transmitter
#[derive(Debug, Error)]
pub enum TransmitError {
    /// The GPIO register device could not be opened or locked
    #[error("cannot open {path} for exclusive access: {source}")]
    Unavailable {
        /// Device path
        path: &'static str,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// The register window could not be mapped
    #[error("mapping the GPIO register window failed: {0}")]
    MappingFailed(#[source] io::Error),

    /// Frame length disagrees with the wall size
    #[error("frame is {actual} bytes, the wall needs {expected}")]
    SizeMismatch {
        /// Length required by the grid
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// Wall size rejected
    #[error("invalid wall size: {0}")]
    Grid(GridError),

    /// A bus pin is out of range or assigned twice
    #[error("GPIO {pin} is out of range or assigned twice")]
    InvalidPin {
        /// Offending BCM pin number
        pin: u8,
    },
}

impl From<GridError> for TransmitError {
    fn from(err: GridError) -> Self {
        TransmitError::Grid(err)
    }
}

impl From<FrameError> for TransmitError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::SizeMismatch { expected, actual } => {
                TransmitError::SizeMismatch { expected, actual }
            }
        }
    }
}

/// Errors from a frame source
#[derive(Debug, Error)]
pub enum SourceError {
    /// The underlying reader failed
    #[error("reading frame {frame} failed: {source}")]
    Read {
        /// Zero-based index of the frame being read
        frame: u64,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_error_maps_to_size_mismatch() {
        let err: TransmitError = FrameError::SizeMismatch {
            expected: 65,
            actual: 3,
        }
        .into();
        assert!(matches!(
            err,
            TransmitError::SizeMismatch {
                expected: 65,
                actual: 3
            }
        ));
        assert_eq!(err.to_string(), "frame is 3 bytes, the wall needs 65");
    }

    #[test]
    fn test_grid_error_message() {
        let err = TransmitError::from(GridError::ZeroWidth);
        assert_eq!(
            err.to_string(),
            "invalid wall size: width must be at least one panel"
        );
    }

    fn assert_std_error<E: std::error::Error + Send + Sync + 'static>() {}

    #[test]
    fn test_errors_are_std_errors() {
        assert_std_error::<TransmitError>();
        assert_std_error::<SourceError>();

        let err = TransmitError::MappingFailed(io::Error::new(io::ErrorKind::Other, "no window"));
        let source = std::error::Error::source(&err).map(|source| source.to_string());
        assert_eq!(source.as_deref(), Some("no window"));
    }
}
