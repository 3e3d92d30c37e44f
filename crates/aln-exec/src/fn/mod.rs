use std::{future::Future, pin::Pin, sync::Arc};

use aln_model::JobDescription;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::{error::ExecResult, runner::JobRunner};

type BoxRun = Pin<Box<dyn Future<Output = ExecResult<()>> + Send>>;
type RunFn = dyn Fn(JobDescription, CancellationToken) -> BoxRun + Send + Sync;

/// Runner backed by an async closure.
///
/// The closure receives its own copy of the job for every run.
pub struct FnRunner {
    name: &'static str,
    f: Arc<RunFn>,
}

impl FnRunner {
    pub fn new<F, Fut>(name: &'static str, f: F) -> Self
    where
        F: Fn(JobDescription, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ExecResult<()>> + Send + 'static,
    {
        Self {
            name,
            f: Arc::new(move |job, cancel| Box::pin(f(job, cancel)) as BoxRun),
        }
    }
}

#[async_trait]
impl JobRunner for FnRunner {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&self, job: &JobDescription, cancel: CancellationToken) -> ExecResult<()> {
        trace!(target: "aln.exec.fn", runner = self.name, "invoke");
        (self.f)(job.clone(), cancel).await
    }
}
