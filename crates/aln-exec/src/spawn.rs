use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use aln_core::Executor;
use aln_model::JobDescription;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::{
    error::{ExecError, ExecResult},
    runner::JobRunner,
};

/// Runs every job as its own Tokio task.
///
/// Jobs run concurrently and are never queued or rejected.
/// Each run is tagged with a random id that appears in its log span.
pub struct SpawnExecutor {
    runner: Arc<dyn JobRunner>,
    handle: Handle,
    cancel: CancellationToken,
    active: Arc<AtomicUsize>,
}

impl SpawnExecutor {
    pub fn new(runner: Arc<dyn JobRunner>, handle: Handle) -> Self {
        Self {
            runner,
            handle,
            cancel: CancellationToken::new(),
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Bind to the runtime of the caller.
    pub fn current(runner: Arc<dyn JobRunner>) -> ExecResult<Self> {
        let handle = Handle::try_current().map_err(|_| ExecError::NoRuntime)?;
        Ok(Self::new(runner, handle))
    }

    /// Number of jobs currently running.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Signal every running job to stop. Later submissions are cancelled on arrival.
    pub fn shutdown(&self) {
        info!(active = self.active(), "executor shutting down");
        self.cancel.cancel();
    }
}

/// Holds one slot of the active count; frees it even when the run panics.
struct ActiveRun(Arc<AtomicUsize>);

impl ActiveRun {
    fn enter(active: &Arc<AtomicUsize>) -> Self {
        active.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(active))
    }
}

impl Drop for ActiveRun {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Executor for SpawnExecutor {
    fn execute(&self, job: JobDescription) {
        let run_id = Uuid::new_v4();
        let runner = Arc::clone(&self.runner);
        let cancel = self.cancel.child_token();
        let active = ActiveRun::enter(&self.active);
        let span = info_span!("alignment", %run_id, runner = runner.name());

        self.handle.spawn(
            async move {
                let _active = active;
                debug!(target: "aln.exec", output = %job.output_path().display(), "run started");
                match runner.run(&job, cancel).await {
                    Ok(()) => info!(target: "aln.exec", output = %job.output_path().display(), "run finished"),
                    Err(ExecError::Cancelled) => warn!(target: "aln.exec", "run cancelled"),
                    Err(e) => error!(target: "aln.exec", error = %e, "run failed"),
                }
            }
            .instrument(span),
        );
    }
}
