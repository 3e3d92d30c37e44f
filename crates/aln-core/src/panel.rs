//! Submission path of the alignment panel.
//!
//! One [`AlignerPanel`] is built by the application and passed to whatever triggers a start.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use aln_model::{RequiredInput, SlotRole};
use tokio::runtime::Handle;
use tracing::{debug, info, instrument};

use crate::{
    builder::build_job,
    config::PanelConfig,
    error::ValidationError,
    guard::{Acquire, ExecutionGuard},
    output::{Cancelled, FileChooser, OutputResolver, suggested_base_name},
    params::{ParameterStore, PropertyStore},
    submit::{Executor, TaskSubmitter},
};

/// Result of one start attempt. None of these is an error for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// A job writing to this path was handed to the executor.
    Submitted(PathBuf),
    /// A previous start is still cooling down.
    Denied,
    /// The save prompt was dismissed.
    Cancelled,
    /// A required input is absent.
    Missing(RequiredInput),
}

/// Built once by the application. `start` may be called from any thread; cooldown timers run on the
/// runtime behind the handle given to [`AlignerPanel::new`].
pub struct AlignerPanel {
    config: PanelConfig,
    params: ParameterStore,
    guard: ExecutionGuard,
    resolver: OutputResolver,
    submitter: TaskSubmitter,
}

impl AlignerPanel {
    pub fn new(
        config: PanelConfig,
        store: Arc<dyn PropertyStore>,
        chooser: Arc<dyn FileChooser>,
        executor: Arc<dyn Executor>,
        handle: Handle,
    ) -> Self {
        let resolver = OutputResolver::new(chooser, config.save_title.clone(), config.output_extension.clone());
        Self {
            params: ParameterStore::new(store),
            guard: ExecutionGuard::new(handle),
            resolver,
            submitter: TaskSubmitter::new(executor),
            config,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParameterStore {
        &mut self.params
    }

    /// Whether the start action should currently be enabled.
    pub fn can_start(&self) -> bool {
        !self.guard.is_busy()
    }

    pub fn guard(&self) -> &ExecutionGuard {
        &self.guard
    }

    /// Run one submission attempt.
    ///
    /// The guard is taken first. After a submission it is held for the configured cooldown; an attempt that
    /// ends without a job frees it at once.
    #[instrument(level = "debug", skip(self))]
    pub fn start(&self) -> StartOutcome {
        if self.guard.try_acquire() == Acquire::Denied {
            debug!("start ignored; cooling down");
            return StartOutcome::Denied;
        }

        let outcome = self.submit_current();
        let hold = match &outcome {
            StartOutcome::Submitted(_) => self.config.cooldown,
            _ => Duration::ZERO,
        };
        self.guard.release(hold);
        outcome
    }

    /// Cancel the pending guard release. Jobs already submitted keep running.
    pub fn shutdown(&self) {
        self.guard.shutdown();
    }

    fn submit_current(&self) -> StartOutcome {
        let Some(forward) = self.params.get(SlotRole::ForwardReads) else {
            return missing(RequiredInput::Slot(SlotRole::ForwardReads));
        };
        let base_name = forward
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let output = match self
            .resolver
            .resolve(suggested_base_name(&base_name), source_directory(forward))
        {
            Ok(path) => path,
            Err(Cancelled) => {
                debug!("start aborted; no output chosen");
                return StartOutcome::Cancelled;
            }
        };

        let job = match build_job(&self.params.snapshot(), self.params.encoding(), Some(output.as_path())) {
            Ok(job) => job,
            Err(ValidationError::MissingInput { input }) => return missing(input),
        };

        self.submitter.submit(job);
        info!(output = %output.display(), "alignment started");
        StartOutcome::Submitted(output)
    }
}

fn missing(input: RequiredInput) -> StartOutcome {
    info!(%input, "start skipped; input missing");
    StartOutcome::Missing(input)
}

/// Directory the save prompt opens in for `forward`.
pub fn source_directory(forward: &Path) -> Option<&Path> {
    forward.parent().filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use aln_model::{Encoding, JobDescription};

    use super::*;
    use crate::{output::SaveRequest, params::MemoryStore};

    const COOLDOWN: Duration = Duration::from_millis(3000);

    struct Chooser {
        answer: Mutex<Option<PathBuf>>,
        requests: Mutex<Vec<SaveRequest>>,
    }

    impl Chooser {
        fn answering(answer: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                answer: Mutex::new(answer.map(PathBuf::from)),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    impl FileChooser for Chooser {
        fn choose_save(&self, request: &SaveRequest) -> Option<PathBuf> {
            self.requests.lock().unwrap().push(request.clone());
            self.answer.lock().unwrap().clone()
        }
    }

    #[derive(Default)]
    struct Recording {
        jobs: Mutex<Vec<JobDescription>>,
    }

    impl Executor for Recording {
        fn execute(&self, job: JobDescription) {
            self.jobs.lock().unwrap().push(job);
        }
    }

    impl Recording {
        fn count(&self) -> usize {
            self.jobs.lock().unwrap().len()
        }
    }

    fn panel(chooser: Arc<Chooser>, executor: Arc<Recording>) -> AlignerPanel {
        panel_on(Handle::current(), COOLDOWN, chooser, executor)
    }

    fn panel_on(handle: Handle, cooldown: Duration, chooser: Arc<Chooser>, executor: Arc<Recording>) -> AlignerPanel {
        AlignerPanel::new(
            PanelConfig::default().with_cooldown(cooldown),
            Arc::new(MemoryStore::new()),
            chooser,
            executor,
            handle,
        )
    }

    fn fill(panel: &mut AlignerPanel) {
        let params = panel.params_mut();
        params.select(SlotRole::ForwardReads, "/reads/sample_R1.fastq.gz").unwrap();
        params.select(SlotRole::ReverseReads, "/reads/sample_R2.fastq.gz").unwrap();
        params.select(SlotRole::ReferenceGenome, "/ref/g.fasta").unwrap();
        params.select(SlotRole::DbSnp, "/ref/dbsnp.vcf").unwrap();
        params.select(SlotRole::Mills, "/ref/mills.vcf").unwrap();
        params.select(SlotRole::Phase1Indels, "/ref/phase1.vcf").unwrap();
        params.set_encoding(Some(Encoding::Phred33));
    }

    #[tokio::test(start_paused = true)]
    async fn start_submits_job_with_resolved_output() {
        let chooser = Chooser::answering(Some("/out/sample"));
        let executor = Arc::new(Recording::default());
        let mut panel = panel(Arc::clone(&chooser), Arc::clone(&executor));
        fill(&mut panel);

        let outcome = panel.start();
        assert_eq!(outcome, StartOutcome::Submitted(PathBuf::from("/out/sample.bam")));

        let jobs = executor.jobs.lock().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].output_path(), Path::new("/out/sample.bam"));
        assert_eq!(jobs[0].forward_reads(), Path::new("/reads/sample_R1.fastq.gz"));

        let requests = chooser.requests.lock().unwrap();
        assert_eq!(requests[0].initial_name, "sample_R1.bam");
        assert_eq!(requests[0].initial_dir.as_deref(), Some(Path::new("/reads")));
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_second_start_is_denied() {
        let executor = Arc::new(Recording::default());
        let mut panel = panel(Chooser::answering(Some("/out/a.bam")), Arc::clone(&executor));
        fill(&mut panel);

        assert!(matches!(panel.start(), StartOutcome::Submitted(_)));
        assert!(!panel.can_start());
        assert_eq!(panel.start(), StartOutcome::Denied);
        assert_eq!(executor.count(), 1);

        tokio::time::sleep(COOLDOWN).await;
        assert!(panel.can_start());
        assert!(matches!(panel.start(), StartOutcome::Submitted(_)));
        assert_eq!(executor.count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_prompt_submits_nothing() {
        let executor = Arc::new(Recording::default());
        let mut panel = panel(Chooser::answering(None), Arc::clone(&executor));
        fill(&mut panel);

        assert_eq!(panel.start(), StartOutcome::Cancelled);
        assert_eq!(executor.count(), 0);
        assert!(panel.can_start());
    }

    #[tokio::test(start_paused = true)]
    async fn missing_forward_reads_skips_prompt() {
        let chooser = Chooser::answering(Some("/out/a.bam"));
        let executor = Arc::new(Recording::default());
        let panel = panel(Arc::clone(&chooser), Arc::clone(&executor));

        assert_eq!(
            panel.start(),
            StartOutcome::Missing(RequiredInput::Slot(SlotRole::ForwardReads))
        );
        assert!(chooser.requests.lock().unwrap().is_empty());
        assert_eq!(executor.count(), 0);
        assert!(panel.can_start());
    }

    #[tokio::test(start_paused = true)]
    async fn missing_encoding_submits_nothing() {
        let executor = Arc::new(Recording::default());
        let mut panel = panel(Chooser::answering(Some("/out/a.bam")), Arc::clone(&executor));
        fill(&mut panel);
        panel.params_mut().set_encoding(None);

        assert_eq!(panel.start(), StartOutcome::Missing(RequiredInput::Encoding));
        assert_eq!(executor.count(), 0);
        assert!(panel.can_start());
    }

    #[test]
    fn start_works_outside_runtime() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .build()
            .unwrap();
        let executor = Arc::new(Recording::default());
        let cooldown = Duration::from_millis(50);
        let mut panel = panel_on(
            runtime.handle().clone(),
            cooldown,
            Chooser::answering(Some("/out/a.bam")),
            Arc::clone(&executor),
        );
        fill(&mut panel);

        let outcome = std::thread::spawn(move || {
            let first = panel.start();
            let second = panel.start();
            std::thread::sleep(cooldown * 4);
            (first, second, panel.can_start())
        })
        .join()
        .unwrap();

        assert_eq!(outcome.0, StartOutcome::Submitted(PathBuf::from("/out/a.bam")));
        assert_eq!(outcome.1, StartOutcome::Denied);
        assert!(outcome.2);
        assert_eq!(executor.count(), 1);
    }

    #[test]
    fn source_directory_of_bare_name_is_none() {
        assert_eq!(source_directory(Path::new("s_R1.fq")), None);
        assert_eq!(source_directory(Path::new("/reads/s_R1.fq")), Some(Path::new("/reads")));
    }
}
