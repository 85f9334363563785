//! Block layout of the shared buffer and the checksum contract.
//!
//! A buffer of `memsize` bytes is divided into 32-byte blocks, each holding
//! a 30-byte payload followed by a 16-bit checksum stored in native byte
//! order. Both tasks go through the accessors in this module, so the
//! byte-order and sign-extension conventions live in exactly one place.

use parking_lot::{Mutex, MutexGuard};
use static_assertions::const_assert_eq;

/// Size of one block in bytes.
pub const BLOCK_SIZE: usize = 32;

/// Payload bytes per block.
pub const PAYLOAD_SIZE: usize = 30;

/// Byte offset of the checksum field within a block.
pub const CHECKSUM_OFFSET: usize = 30;

/// Maximum buffer size in bytes.
pub const MAX_MEMSIZE: usize = 64000;

const_assert_eq!(PAYLOAD_SIZE + size_of::<u16>(), BLOCK_SIZE);
const_assert_eq!(CHECKSUM_OFFSET, PAYLOAD_SIZE);
const_assert_eq!(MAX_MEMSIZE % BLOCK_SIZE, 0);

/// Fixed-size byte region shared by the producer and the consumer.
///
/// The mutex is the exclusive lock of the handshake protocol: every payload
/// or checksum access happens while holding it. The lock serializes access
/// to the bytes; it does not order writes before reads across a round —
/// that is the job of the signals in [`crate::signal`].
pub struct SharedBuffer {
    blocks: usize,
    data: Mutex<Box<[u8]>>,
}

impl SharedBuffer {
    /// Allocate a zeroed buffer of `memsize` bytes.
    ///
    /// `memsize` must already be validated as a positive multiple of
    /// [`BLOCK_SIZE`] no larger than [`MAX_MEMSIZE`]; see
    /// [`crate::config::RunConfig`].
    pub fn new(memsize: usize) -> Self {
        debug_assert!(memsize > 0 && memsize % BLOCK_SIZE == 0 && memsize <= MAX_MEMSIZE);
        Self {
            blocks: memsize / BLOCK_SIZE,
            data: Mutex::new(vec![0u8; memsize].into_boxed_slice()),
        }
    }

    /// Number of blocks in the buffer.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Acquire the exclusive lock over the buffer bytes.
    pub fn lock(&self) -> MutexGuard<'_, Box<[u8]>> {
        self.data.lock()
    }
}

/// Borrow the payload bytes of block `i`.
pub fn payload(buf: &[u8], i: usize) -> &[u8] {
    &buf[i * BLOCK_SIZE..i * BLOCK_SIZE + PAYLOAD_SIZE]
}

/// Borrow the payload bytes of block `i` mutably.
pub fn payload_mut(buf: &mut [u8], i: usize) -> &mut [u8] {
    &mut buf[i * BLOCK_SIZE..i * BLOCK_SIZE + PAYLOAD_SIZE]
}

/// Read the checksum stored in block `i` (native byte order).
pub fn read_checksum(buf: &[u8], i: usize) -> u16 {
    let off = i * BLOCK_SIZE + CHECKSUM_OFFSET;
    u16::from_ne_bytes([buf[off], buf[off + 1]])
}

/// Store `value` into the checksum field of block `i` (native byte order).
pub fn write_checksum(buf: &mut [u8], i: usize, value: u16) {
    let off = i * BLOCK_SIZE + CHECKSUM_OFFSET;
    buf[off..off + 2].copy_from_slice(&value.to_ne_bytes());
}

/// Mod-65536 sum of the payload bytes.
///
/// Each byte is sign-extended before the wrapping add. Producer and
/// consumer must agree on this promotion bit-for-bit, so the convention
/// is fixed here and nowhere else.
pub fn block_checksum(payload: &[u8]) -> u16 {
    payload
        .iter()
        .fold(0u16, |sum, &b| sum.wrapping_add(b as i8 as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_is_deterministic() {
        let payload: Vec<u8> = (0..PAYLOAD_SIZE as u8).collect();
        assert_eq!(block_checksum(&payload), block_checksum(&payload));
    }

    #[test]
    fn checksum_sign_extends_high_bytes() {
        // 0xFF sign-extends to -1, so 30 of them wrap to 65536 - 30.
        let payload = [0xFFu8; PAYLOAD_SIZE];
        assert_eq!(block_checksum(&payload), 65506);
    }

    #[test]
    fn checksum_of_low_bytes_is_plain_sum() {
        let payload = [3u8; PAYLOAD_SIZE];
        assert_eq!(block_checksum(&payload), 90);
    }

    #[test]
    fn checksum_accessors_round_trip() {
        let mut buf = vec![0u8; 3 * BLOCK_SIZE];
        write_checksum(&mut buf, 0, 0xBEEF);
        write_checksum(&mut buf, 2, 42);
        assert_eq!(read_checksum(&buf, 0), 0xBEEF);
        assert_eq!(read_checksum(&buf, 1), 0);
        assert_eq!(read_checksum(&buf, 2), 42);
    }

    #[test]
    fn checksum_field_does_not_overlap_payload() {
        let mut buf = vec![0u8; 2 * BLOCK_SIZE];
        payload_mut(&mut buf, 0).fill(0xAA);
        payload_mut(&mut buf, 1).fill(0xBB);
        write_checksum(&mut buf, 0, u16::MAX);
        assert!(payload(&buf, 0).iter().all(|&b| b == 0xAA));
        assert!(payload(&buf, 1).iter().all(|&b| b == 0xBB));
        assert_eq!(payload(&buf, 0).len(), PAYLOAD_SIZE);
    }

    #[test]
    fn buffer_reports_block_count() {
        assert_eq!(SharedBuffer::new(BLOCK_SIZE).blocks(), 1);
        assert_eq!(SharedBuffer::new(64).blocks(), 2);
        assert_eq!(SharedBuffer::new(MAX_MEMSIZE).blocks(), 2000);
    }

    #[test]
    fn buffer_starts_zeroed() {
        let buffer = SharedBuffer::new(64);
        let buf = buffer.lock();
        assert!(buf.iter().all(|&b| b == 0));
    }
}
