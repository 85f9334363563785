//! Fault injection against the block integrity contract.

use prodcon_core::layout::{self, BLOCK_SIZE, SharedBuffer};
use prodcon_core::{RunError, consumer, producer};

fn produce_all(buffer: &SharedBuffer) {
    let mut rng = rand::thread_rng();
    let mut buf = buffer.lock();
    for block in 0..buffer.blocks() {
        let checksum = producer::fill_block(layout::payload_mut(&mut buf, block), &mut rng);
        layout::write_checksum(&mut buf, block, checksum);
    }
}

#[test]
fn intact_blocks_verify_cleanly() {
    let buffer = SharedBuffer::new(96);
    produce_all(&buffer);

    let buf = buffer.lock();
    for block in 0..3 {
        assert!(consumer::verify_block(&buf, block, 0).is_ok());
    }
}

#[test]
fn one_corrupted_payload_byte_yields_exactly_one_mismatch() {
    let buffer = SharedBuffer::new(96);
    produce_all(&buffer);
    {
        let mut buf = buffer.lock();
        buf[BLOCK_SIZE + 7] ^= 0x01;
    }

    let buf = buffer.lock();
    let outcomes: Vec<_> = (0..3)
        .map(|block| consumer::verify_block(&buf, block, 5))
        .collect();

    assert!(outcomes[0].is_ok());
    assert!(outcomes[2].is_ok());
    match &outcomes[1] {
        Err(RunError::ChecksumMismatch {
            block: 1,
            round: 5,
            stored,
            computed,
        }) => assert_ne!(stored, computed),
        other => panic!("expected mismatch at block 1, round 5, got {other:?}"),
    }
}

#[test]
fn recomputation_is_idempotent() {
    let buffer = SharedBuffer::new(64);
    produce_all(&buffer);

    let buf = buffer.lock();
    for block in 0..2 {
        let first = layout::block_checksum(layout::payload(&buf, block));
        let second = layout::block_checksum(layout::payload(&buf, block));
        assert_eq!(first, second);
        assert_eq!(first, layout::read_checksum(&buf, block));
    }
}
