use aln_model::JobDescription;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ExecResult;

/// The long-running alignment computation behind an executor.
///
/// Implementations should return promptly with [`crate::ExecError::Cancelled`] once `cancel` fires.
#[async_trait]
pub trait JobRunner: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    async fn run(&self, job: &JobDescription, cancel: CancellationToken) -> ExecResult<()>;
}
