//! `/dev/gpiomem` register window
//!
//! The device maps the GPIO block without root. The file is locked with
//! `flock` so two senders can never drive the same bus.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::ptr::NonNull;

use tracing::debug;

use crate::error::TransmitError;
use crate::registers::{GpioRegisters, WINDOW_BYTES, WINDOW_WORDS};

/// Default device path
pub const GPIOMEM_PATH: &str = "/dev/gpiomem";

/// Mapped, exclusively locked GPIO register window
///
/// Unmapped and unlocked on drop.
pub struct GpioMem {
    base: NonNull<u32>,
    // Holds the flock; closed after the unmap in Drop
    _lock: File,
}

impl GpioMem {
    /// Open, lock and map [`GPIOMEM_PATH`]
    pub fn open() -> Result<Self, TransmitError> {
        Self::open_path(GPIOMEM_PATH)
    }

    /// Open, lock and map the register device at `path`
    pub fn open_path(path: &'static str) -> Result<Self, TransmitError> {
        let unavailable = |source| TransmitError::Unavailable { path, source };

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(path)
            .map_err(unavailable)?;

        // SAFETY: the descriptor is valid for the lifetime of `file`
        let locked = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
        if locked != 0 {
            return Err(unavailable(io::Error::last_os_error()));
        }

        // SAFETY: fresh shared mapping of a device we hold open; no existing
        // memory is affected
        let base = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                WINDOW_BYTES,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                0,
            )
        };
        if base == libc::MAP_FAILED {
            return Err(TransmitError::MappingFailed(io::Error::last_os_error()));
        }
        let base = NonNull::new(base.cast::<u32>()).ok_or_else(|| {
            TransmitError::MappingFailed(io::Error::new(
                io::ErrorKind::Other,
                "mmap returned a null window",
            ))
        })?;

        debug!(path, "mapped GPIO register window");
        Ok(Self { base, _lock: file })
    }

    fn word(&self, offset: usize) -> *mut u32 {
        assert!(
            offset < WINDOW_WORDS,
            "register offset {} outside window",
            offset
        );
        // SAFETY: in bounds of the WINDOW_BYTES mapping checked above
        unsafe { self.base.as_ptr().add(offset) }
    }
}

impl GpioRegisters for GpioMem {
    fn read(&mut self, offset: usize) -> u32 {
        // SAFETY: aligned, mapped, and device memory must not be cached
        unsafe { self.word(offset).read_volatile() }
    }

    fn write(&mut self, offset: usize, value: u32) {
        // SAFETY: as in `read`
        unsafe { self.word(offset).write_volatile(value) }
    }
}

impl Drop for GpioMem {
    fn drop(&mut self) {
        // SAFETY: `base` is the WINDOW_BYTES mapping made in `open_path` and
        // no references into it outlive `self`
        let result = unsafe { libc::munmap(self.base.as_ptr().cast(), WINDOW_BYTES) };
        if result != 0 {
            debug!(error = %io::Error::last_os_error(), "munmap failed");
        }
    }
}
