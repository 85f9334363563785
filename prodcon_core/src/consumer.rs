//! Consumer task: recomputes and verifies every block's checksum.

use crate::context::RunContext;
use crate::error::{RunError, RunResult};
use crate::layout;
use std::sync::Arc;
use tracing::{debug, warn};

/// Recompute block `block`'s checksum and compare it with the stored field.
///
/// Uses the same byte promotion as the producer; see
/// [`layout::block_checksum`].
pub fn verify_block(buf: &[u8], block: usize, round: u32) -> RunResult<()> {
    let computed = layout::block_checksum(layout::payload(buf, block));
    let stored = layout::read_checksum(buf, block);
    if stored != computed {
        return Err(RunError::ChecksumMismatch {
            block,
            round,
            stored,
            computed,
        });
    }
    Ok(())
}

/// Run the consumer side of the handshake.
///
/// Gated per block on `ready-for-consumer`; posts `ready-for-producer`
/// once per round, after the last block. A checksum mismatch is fatal and
/// carries the block index, the round index, and both values.
///
/// The consumer's wait-failure policy is report-first, unlike the
/// producer's silent-fatal one. A wait only fails once the signal is
/// closed, and a closed signal never yields another permit, so after
/// reporting the error is handed to the supervisor rather than retried.
pub fn run(ctx: Arc<RunContext>) -> RunResult<()> {
    let blocks = ctx.blocks();

    for round in 0..ctx.rounds() {
        for block in 0..blocks {
            if let Err(e) = ctx.handshake().ready_for_consumer.wait() {
                warn!(round, block, error = %e, "consumer signal wait failed");
                return Err(e);
            }

            let buf = ctx.buffer().lock();
            verify_block(&buf, block, round)?;
        }
        ctx.handshake().ready_for_producer.post();
        debug!(round, blocks, "consumer verified round");
    }
    Ok(())
}
