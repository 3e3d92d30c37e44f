use std::sync::Arc;

use aln_model::JobDescription;
use tracing::{info, instrument};

/// Asynchronous backend that runs alignment jobs.
///
/// `execute` must return without waiting for the job. Progress, failures and results stay with the executor.
pub trait Executor: Send + Sync {
    fn execute(&self, job: JobDescription);
}

/// Fire-and-forget hand-off of built jobs to an [`Executor`].
///
/// No handle is kept: no retries, no timeout, no cancellation from this side.
#[derive(Clone)]
pub struct TaskSubmitter {
    executor: Arc<dyn Executor>,
}

impl TaskSubmitter {
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }

    #[instrument(level = "debug", skip(self, job), fields(output = %job.output_path().display()))]
    pub fn submit(&self, job: JobDescription) {
        info!(
            forward = %job.forward_reads().display(),
            reverse = %job.reverse_reads().display(),
            encoding = %job.encoding(),
            "submitting alignment job"
        );
        self.executor.execute(job);
    }
}
