//! Run configuration and validation.
//!
//! Buffer size and round count are validated here, before any thread
//! starts. A rejected configuration never touches the buffer or the
//! signals.

use crate::layout::{BLOCK_SIZE, MAX_MEMSIZE};
use thiserror::Error;

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Buffer size was zero.
    #[error("buffer size must be positive")]
    ZeroSize,

    /// Buffer size is not a multiple of the block size.
    #[error("buffer size {size} is not a multiple of 32")]
    UnalignedSize {
        /// Rejected size in bytes.
        size: usize,
    },

    /// Buffer size exceeds the maximum.
    #[error("buffer size {size} exceeds the maximum of 64000 bytes")]
    OversizedBuffer {
        /// Rejected size in bytes.
        size: usize,
    },
}

/// Validated inputs for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    memsize: usize,
    rounds: u32,
}

impl RunConfig {
    /// Validate `memsize` and build the config.
    ///
    /// `memsize` must be a positive multiple of [`BLOCK_SIZE`] no larger
    /// than [`MAX_MEMSIZE`]. Any round count is accepted; zero rounds is a
    /// run that completes immediately.
    pub fn new(memsize: usize, rounds: u32) -> Result<Self, ConfigError> {
        if memsize == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if memsize % BLOCK_SIZE != 0 {
            return Err(ConfigError::UnalignedSize { size: memsize });
        }
        if memsize > MAX_MEMSIZE {
            return Err(ConfigError::OversizedBuffer { size: memsize });
        }
        Ok(Self { memsize, rounds })
    }

    /// Buffer size in bytes.
    pub fn memsize(&self) -> usize {
        self.memsize
    }

    /// Number of producer/consumer rounds.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Number of blocks the buffer divides into.
    pub fn blocks(&self) -> usize {
        self.memsize / BLOCK_SIZE
    }
}
