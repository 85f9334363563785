//! Central coordinator: spawns the two tasks and owns the termination
//! policy.
//!
//! Workers never abort the process themselves. Each reports its terminal
//! result over a channel; the supervisor decides what a failure means for
//! the run, closes the handshake so the surviving task cannot stay parked,
//! and surfaces the first error to the caller.

use crate::config::RunConfig;
use crate::consumer;
use crate::context::RunContext;
use crate::error::{Role, RunError, RunResult};
use crate::producer;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use tracing::{error, info};

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Rounds completed.
    pub rounds: u32,
    /// Blocks written and verified per round.
    pub blocks: usize,
}

/// Drives one producer/consumer run to completion.
pub struct Supervisor {
    config: RunConfig,
}

impl Supervisor {
    /// Build a supervisor for a validated config.
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Spawn both tasks, collect their results, and report the outcome.
    ///
    /// Returns the first task error, if any. By then the handshake has
    /// been closed and both threads joined.
    pub fn run(&self) -> RunResult<RunReport> {
        let ctx = RunContext::new(self.config);
        info!(
            blocks = ctx.blocks(),
            rounds = ctx.rounds(),
            "starting producer/consumer run"
        );
        self.run_with_context(ctx)
    }

    fn run_with_context(&self, ctx: Arc<RunContext>) -> RunResult<RunReport> {
        let (tx, rx) = mpsc::channel();

        let producer_handle = spawn_task(Role::Producer, &ctx, &tx, producer::run)?;
        let consumer_handle = match spawn_task(Role::Consumer, &ctx, &tx, consumer::run) {
            Ok(handle) => handle,
            Err(e) => {
                ctx.handshake().close_all();
                drain_task(Role::Producer, producer_handle);
                return Err(e);
            }
        };
        drop(tx);

        let mut first_error: Option<RunError> = None;
        for _ in 0..2 {
            // recv fails only if a worker panicked without reporting; the
            // joins below turn that into TaskLost.
            let Ok((role, result)) = rx.recv() else { break };
            match result {
                Ok(()) => info!(%role, "task completed"),
                Err(e) => {
                    error!(%role, error = %e, "task failed");
                    if first_error.is_none() {
                        ctx.handshake().close_all();
                        first_error = Some(e);
                    }
                }
            }
        }

        // Nobody may stay parked across the joins.
        ctx.handshake().close_all();
        let producer_join = producer_handle.join();
        let consumer_join = consumer_handle.join();

        if let Some(e) = first_error {
            return Err(e);
        }
        producer_join.map_err(|_| RunError::TaskLost {
            role: Role::Producer,
        })?;
        consumer_join.map_err(|_| RunError::TaskLost {
            role: Role::Consumer,
        })?;

        Ok(RunReport {
            rounds: ctx.rounds(),
            blocks: ctx.blocks(),
        })
    }
}

fn spawn_task(
    role: Role,
    ctx: &Arc<RunContext>,
    tx: &mpsc::Sender<(Role, RunResult<()>)>,
    task: fn(Arc<RunContext>) -> RunResult<()>,
) -> RunResult<thread::JoinHandle<()>> {
    let ctx = Arc::clone(ctx);
    let tx = tx.clone();
    thread::Builder::new()
        .name(role.to_string())
        .spawn(move || {
            let result = task(ctx);
            // The receiver may already be gone if the run was abandoned.
            let _ = tx.send((role, result));
        })
        .map_err(|source| RunError::Spawn { role, source })
}

fn drain_task(role: Role, handle: thread::JoinHandle<()>) {
    if handle.join().is_err() {
        error!(%role, "task panicked during abandoned run");
    }
}
