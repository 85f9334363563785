//! # Producer/Consumer Checksum Exchange
//!
//! Bounded, round-based coordination between one producer and one consumer
//! sharing a fixed-size block buffer. The producer fills 32-byte blocks
//! (30 payload bytes plus a 16-bit checksum) round by round; the consumer
//! recomputes every checksum and verifies it against the stored value.
//!
//! ## Protocol
//!
//! One mutex serializes buffer access; two counting signals carry all
//! ordering:
//!
//! ```text
//! ┌──────────────┐  ready-for-consumer (per block)  ┌──────────────┐
//! │   Producer   ├─────────────────────────────────►│   Consumer   │
//! │ (per round)  │                                  │ (per block)  │
//! └─────┬────────┘◄─────────────────────────────────┴─────┬────────┘
//!       │           ready-for-producer (per round)        │
//!       ▼                                                 ▼
//!   ┌─────────────────────────────────────────────────────────┐
//!   │        SharedBuffer: [payload 30 | checksum 2] × N      │
//!   └─────────────────────────────────────────────────────────┘
//! ```
//!
//! This is a round handshake, not a per-block handshake: the producer is
//! gated once per round and may run a full round ahead of the consumer,
//! while the consumer is gated block by block. Round `n + 1` production
//! never starts before round `n` is fully verified.
//!
//! ## Example
//!
//! ```rust
//! use prodcon_core::{RunConfig, Supervisor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RunConfig::new(64, 2)?;
//! let report = Supervisor::new(config).run()?;
//! assert_eq!(report.blocks, 2);
//! assert_eq!(report.rounds, 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Workers never abort the process. Each hands its terminal result to the
//! [`Supervisor`], which closes the handshake on the first failure and
//! returns it to the caller:
//!
//! ```rust,no_run
//! use prodcon_core::{RunConfig, RunError, Supervisor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! match Supervisor::new(RunConfig::new(64, 1)?).run() {
//!     Ok(report) => println!("verified {} blocks x {} rounds", report.blocks, report.rounds),
//!     Err(RunError::ChecksumMismatch { block, round, stored, computed }) => {
//!         eprintln!("block {block}, round {round}: {stored} != {computed}");
//!     }
//!     Err(e) => eprintln!("run failed: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod consumer;
pub mod context;
pub mod error;
pub mod layout;
pub mod producer;
pub mod signal;
pub mod supervisor;

pub use config::{ConfigError, RunConfig};
pub use context::RunContext;
pub use error::{Role, RunError, RunResult};
pub use layout::{BLOCK_SIZE, MAX_MEMSIZE, PAYLOAD_SIZE, SharedBuffer};
pub use signal::{Handshake, Signal};
pub use supervisor::{RunReport, Supervisor};
