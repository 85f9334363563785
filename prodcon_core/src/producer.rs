//! Producer task: fills every block with random payload and its checksum.

use crate::context::RunContext;
use crate::error::RunResult;
use crate::layout;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, trace};

/// Fill `payload` with bytes in `[0, 255)` and return their checksum.
pub fn fill_block<R: Rng>(payload: &mut [u8], rng: &mut R) -> u16 {
    for byte in payload.iter_mut() {
        *byte = rng.gen_range(0..u8::MAX);
    }
    layout::block_checksum(payload)
}

/// Run the producer side of the handshake.
///
/// Gated once per round on `ready-for-producer`; posts `ready-for-consumer`
/// after every block, so the consumer can trail block by block while the
/// producer runs ahead. A failed signal wait is fatal for the whole run
/// and is handed back to the supervisor.
pub fn run(ctx: Arc<RunContext>) -> RunResult<()> {
    let mut rng = rand::thread_rng();
    let blocks = ctx.blocks();

    for round in 0..ctx.rounds() {
        ctx.handshake().ready_for_producer.wait()?;
        trace!(round, "producer entering round");

        for block in 0..blocks {
            {
                let mut buf = ctx.buffer().lock();
                let checksum = fill_block(layout::payload_mut(&mut buf, block), &mut rng);
                layout::write_checksum(&mut buf, block, checksum);
            }
            ctx.handshake().ready_for_consumer.post();
        }
        debug!(round, blocks, "producer finished round");
    }
    Ok(())
}
