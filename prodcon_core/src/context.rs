//! Shared run context handed to both tasks.

use crate::config::RunConfig;
use crate::layout::SharedBuffer;
use crate::signal::Handshake;
use std::sync::Arc;

/// Everything the two tasks share, built once per run.
///
/// The buffer, the handshake signals, and the run parameters travel
/// together behind one `Arc` instead of living in process-wide globals.
pub struct RunContext {
    buffer: SharedBuffer,
    handshake: Handshake,
    rounds: u32,
}

impl RunContext {
    /// Allocate the buffer and the signal pair for a validated config.
    pub fn new(config: RunConfig) -> Arc<Self> {
        Arc::new(Self {
            buffer: SharedBuffer::new(config.memsize()),
            handshake: Handshake::new(),
            rounds: config.rounds(),
        })
    }

    /// The shared buffer and its exclusive lock.
    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }

    /// The signal pair coordinating the two tasks.
    pub fn handshake(&self) -> &Handshake {
        &self.handshake
    }

    /// Number of rounds in this run.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Number of blocks in the buffer.
    pub fn blocks(&self) -> usize {
        self.buffer.blocks()
    }
}
