//! External aligner process.
//!
//! The command line comes from a template. Placeholders are replaced by job fields:
//! `{forward}`, `{reverse}`, `{genome}`, `{dbsnp}`, `{mills}`, `{phase1}`, `{encoding}`, `{output}`.
//! The whole job is also exported as JSON in the `ALN_JOB` environment variable.

use std::{path::PathBuf, process::Stdio};

use aln_model::JobDescription;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::{
    error::{ExecError, ExecResult},
    runner::JobRunner,
    util::{KILL_GRACE, kill_graceful},
};

/// Environment variable carrying the serialized job.
pub const JOB_ENV: &str = "ALN_JOB";

#[derive(Clone, Debug)]
pub struct ProcConfig {
    pub program: String,
    /// Argument template; see the module docs for placeholders.
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
    /// Report a non-zero exit code as a failure.
    pub fail_on_non_zero: bool,
}

impl Default for ProcConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
            fail_on_non_zero: true,
        }
    }
}

impl ProcConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Expand the argument template for `job`.
    pub fn render_args(&self, job: &JobDescription) -> Vec<String> {
        let known = job.known_sites();
        let site = |i: usize| {
            known
                .get(i)
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        let values = [
            ("{forward}", job.forward_reads().display().to_string()),
            ("{reverse}", job.reverse_reads().display().to_string()),
            ("{genome}", job.reference_genome().display().to_string()),
            ("{dbsnp}", site(0)),
            ("{mills}", site(1)),
            ("{phase1}", site(2)),
            ("{encoding}", job.encoding().to_string()),
            ("{output}", job.output_path().display().to_string()),
        ];

        self.args
            .iter()
            .map(|arg| {
                values
                    .iter()
                    .fold(arg.clone(), |acc, (key, value)| acc.replace(key, value))
            })
            .collect()
    }
}

/// Runs the configured program once per job.
pub struct ProcRunner {
    name: &'static str,
    cfg: ProcConfig,
}

impl ProcRunner {
    pub fn new(cfg: ProcConfig) -> Self {
        Self { name: "proc", cfg }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn config(&self) -> &ProcConfig {
        &self.cfg
    }
}

#[async_trait]
impl JobRunner for ProcRunner {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&self, job: &JobDescription, cancel: CancellationToken) -> ExecResult<()> {
        if self.cfg.program.trim().is_empty() {
            return Err(ExecError::MissingProgram);
        }
        let args = self.cfg.render_args(job);
        let payload = serde_json::to_string(job)?;

        let mut cmd = tokio::process::Command::new(&self.cfg.program);
        cmd.args(&args);
        if let Some(cwd) = &self.cfg.cwd {
            cmd.current_dir(cwd);
        }
        for (k, v) in &self.cfg.env {
            cmd.env(k, v);
        }
        cmd.env(JOB_ENV, payload);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::inherit());
        cmd.kill_on_drop(true);

        trace!(target: "aln.exec.proc", program = %self.cfg.program, ?args, "spawn");
        let mut child = cmd.spawn().map_err(|e| ExecError::Spawn(e.to_string()))?;

        let read_stdout = child.stdout.take().map(|stdout| {
            let mut lines = BufReader::new(stdout).lines();
            tokio::spawn(async move {
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(target: "aln.exec.proc.out", %line);
                }
            })
        });

        tokio::select! {
            status = child.wait() => {
                let status = status?;
                if let Some(reader) = read_stdout {
                    let _ = reader.await;
                }

                if !status.success() && self.cfg.fail_on_non_zero {
                    return match status.code() {
                        Some(code) => Err(ExecError::NonZeroExit { code }),
                        None => Err(ExecError::KilledBySignal),
                    };
                }
                debug!(target: "aln.exec.proc", "exit success");
                Ok(())
            }
            _ = cancel.cancelled() => {
                debug!(target: "aln.exec.proc", "cancelled; stopping child");
                let _ = kill_graceful(&mut child, KILL_GRACE).await;
                Err(ExecError::Cancelled)
            }
        }
    }
}
