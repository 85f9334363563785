//! Counting signals for the round/block handshake.
//!
//! A [`Signal`] is a counting semaphore: `wait` blocks until a permit is
//! available and consumes it, `post` adds one. The pair of signals in
//! [`Handshake`] carries the whole inter-task ordering of a run; the
//! buffer mutex only prevents literal concurrent access.
//!
//! Signals can be closed. A closed signal fails every `wait`, queued
//! permits included. The supervisor uses this to unpark the surviving task
//! after a fatal error on the other side and to stop it at its next gate.

use crate::error::{RunError, RunResult};
use parking_lot::{Condvar, Mutex};

struct SignalState {
    permits: u32,
    closed: bool,
}

/// Counting signal with blocking decrement.
pub struct Signal {
    name: &'static str,
    state: Mutex<SignalState>,
    cond: Condvar,
}

impl Signal {
    /// Create a signal holding `permits` initial permits.
    pub fn new(name: &'static str, permits: u32) -> Self {
        Self {
            name,
            state: Mutex::new(SignalState {
                permits,
                closed: false,
            }),
            cond: Condvar::new(),
        }
    }

    /// Block until a permit is available, then consume it.
    ///
    /// Fails as soon as the signal is closed, even if permits are queued.
    pub fn wait(&self) -> RunResult<()> {
        let mut state = self.state.lock();
        loop {
            if state.closed {
                return Err(RunError::SignalClosed { signal: self.name });
            }
            if state.permits > 0 {
                state.permits -= 1;
                return Ok(());
            }
            self.cond.wait(&mut state);
        }
    }

    /// Add one permit and wake a waiter. Dropped if the signal is closed.
    pub fn post(&self) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }
        state.permits += 1;
        self.cond.notify_one();
    }

    /// Close the signal, waking every parked waiter.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        self.cond.notify_all();
    }

    /// Current permit count.
    pub fn permits(&self) -> u32 {
        self.state.lock().permits
    }
}

/// The two signals coordinating producer and consumer.
///
/// Round handshake, not a per-block handshake: the producer waits on
/// [`ready_for_producer`](Self::ready_for_producer) once per round and
/// posts [`ready_for_consumer`](Self::ready_for_consumer) after every
/// block; the consumer waits once per block and posts the producer signal
/// once per round, after the last block. Within a round the producer may
/// run arbitrarily far ahead (the permits simply accumulate); across
/// rounds the producer cannot start round `n + 1` before the consumer has
/// drained round `n`.
pub struct Handshake {
    /// Producer may begin a round. Starts at 1 so round 0 proceeds
    /// immediately.
    pub ready_for_producer: Signal,
    /// A block is ready to verify. Starts at 0.
    pub ready_for_consumer: Signal,
}

impl Handshake {
    /// Create the signal pair with the protocol's initial counts.
    pub fn new() -> Self {
        Self {
            ready_for_producer: Signal::new("ready-for-producer", 1),
            ready_for_consumer: Signal::new("ready-for-consumer", 0),
        }
    }

    /// Close both signals, unparking whichever task is still waiting.
    pub fn close_all(&self) {
        self.ready_for_producer.close();
        self.ready_for_consumer.close();
    }
}

impl Default for Handshake {
    fn default() -> Self {
        Self::new()
    }
}
