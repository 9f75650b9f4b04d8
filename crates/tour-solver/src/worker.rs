//! Background solve worker.
//!
//! One solve runs on one dedicated thread.  The handle owns a
//! [`CancelToken`] clone and the receiving half of a one-shot channel; the
//! worker sends exactly one [`SolveReport`] (or error) when it finishes,
//! whether it completed, was cancelled, or found nothing.

use std::sync::mpsc;
use std::thread;

use tour_delivery::DeliveryGraph;

use crate::cancel::CancelToken;
use crate::solver::{solve, SolveOptions, SolveReport};
use crate::{SolverError, SolverResult};

/// Start a solve on a background thread.
///
/// The graph is moved into the worker; callers that still need it should
/// clone first.  Fails fast with [`SolverError::NoDeliveries`] before
/// spawning if there is nothing to tour.
pub fn spawn_solve(
    graph: DeliveryGraph,
    options: SolveOptions,
) -> SolverResult<SolverHandle> {
    if graph.len() < 2 {
        return Err(SolverError::NoDeliveries);
    }

    let cancel = CancelToken::new();
    let token = cancel.clone();
    let (tx, rx) = mpsc::sync_channel(1);

    // The channel, not the join handle, signals completion; the worker is
    // detached and reaped by the runtime when it sends.
    let _worker = thread::Builder::new()
        .name("tour-solver".into())
        .spawn(move || {
            let report = solve(&graph, &options, &token);
            // The caller may have dropped the handle; nothing to do then.
            let _ = tx.send(report);
        })?;

    Ok(SolverHandle { cancel, rx })
}

/// Caller-side handle to a running solve.
///
/// Dropping the handle detaches the worker; it finishes (or notices a
/// prior [`cancel`](SolverHandle::cancel)) and its report is discarded.
pub struct SolverHandle {
    cancel: CancelToken,
    rx:     mpsc::Receiver<SolverResult<SolveReport>>,
}

impl SolverHandle {
    /// Request cancellation.  Idempotent, and a no-op once the solve has
    /// already finished.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Block until the worker reports.
    pub fn wait(self) -> SolverResult<SolveReport> {
        self.rx.recv().map_err(|_| SolverError::WorkerLost)?
    }

    /// Non-blocking poll; `None` while the worker is still running.
    pub fn try_wait(&self) -> Option<SolverResult<SolveReport>> {
        match self.rx.try_recv() {
            Ok(report) => Some(report),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(SolverError::WorkerLost)),
        }
    }
}
