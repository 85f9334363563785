//! Error types for producer/consumer runs

use thiserror::Error;

/// Identifies one of the two worker tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Fills blocks with payload and checksum.
    Producer,
    /// Recomputes and verifies each block's checksum.
    Consumer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Producer => f.write_str("producer"),
            Role::Consumer => f.write_str("consumer"),
        }
    }
}

/// Errors that can occur while a run is in flight
#[derive(Error, Debug)]
pub enum RunError {
    /// Signal was closed while a task was waiting on it
    #[error("{signal} signal closed while waiting")]
    SignalClosed {
        /// Name of the signal that was closed
        signal: &'static str,
    },

    /// Stored and recomputed checksums disagree for a block
    #[error(
        "checksums at block {block}, round {round} do not match: \
         producer {stored}, consumer {computed}"
    )]
    ChecksumMismatch {
        /// Index of the offending block
        block: usize,
        /// Round in which the mismatch was detected
        round: u32,
        /// Checksum stored by the producer
        stored: u16,
        /// Checksum recomputed by the consumer
        computed: u16,
    },

    /// Worker thread could not be spawned
    #[error("failed to spawn {role} task: {source}")]
    Spawn {
        /// Which task failed to start
        role: Role,
        /// Source OS error
        source: std::io::Error,
    },

    /// Worker thread panicked or dropped its result channel
    #[error("{role} task ended without reporting a result")]
    TaskLost {
        /// Which task disappeared
        role: Role,
    },
}

/// Result type for run operations
pub type RunResult<T> = Result<T, RunError>;
