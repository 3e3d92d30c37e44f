use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use tracing::{info, warn};

use aln_core::{AlignerPanel, FileChooser, JsonFileStore, MemoryStore, PanelConfig, PropertyStore, SaveRequest};
use aln_exec::{ProcConfig, ProcRunner, SpawnExecutor};
use aln_model::{Encoding, SlotRole};
use aln_observe::{LoggerConfig, logger_init};

/// Answers every save prompt with the same path; stands in for a dialog.
struct FixedChooser(Option<PathBuf>);

impl FileChooser for FixedChooser {
    fn choose_save(&self, request: &SaveRequest) -> Option<PathBuf> {
        info!(title = %request.title, suggested = %request.initial_name, "save prompt");
        self.0.clone()
    }
}

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Logger
    let log_cfg = LoggerConfig::from_parts(env("ALN_LOG_FORMAT").as_deref(), env("ALN_LOG_LEVEL").as_deref())?;
    logger_init(&log_cfg)?;

    // 2) Panel config
    let mut config = PanelConfig::default();
    if let Some(ms) = env("ALN_COOLDOWN_MS") {
        let ms: u64 = ms.parse().context("ALN_COOLDOWN_MS must be an integer")?;
        config = config.with_cooldown(Duration::from_millis(ms));
    }

    let store: Arc<dyn PropertyStore> = match env("ALN_PROPERTIES") {
        Some(path) => Arc::new(JsonFileStore::open(&path).with_context(|| format!("open {path}"))?),
        None => Arc::new(MemoryStore::new()),
    };

    // 3) Executor
    let program = env("ALN_ALIGNER").unwrap_or_else(|| "echo".to_string());
    let proc_cfg = ProcConfig::new(program).with_args([
        "align", "{forward}", "{reverse}", "-R", "{genome}", "--known", "{dbsnp}", "{mills}", "{phase1}",
        "--encoding", "{encoding}", "-o", "{output}",
    ]);
    let executor = Arc::new(SpawnExecutor::current(Arc::new(ProcRunner::new(proc_cfg)))?);

    let chooser = Arc::new(FixedChooser(env("ALN_OUTPUT").map(PathBuf::from)));
    let mut panel = AlignerPanel::new(
        config,
        store,
        chooser,
        executor.clone(),
        tokio::runtime::Handle::current(),
    );

    // 4) Inputs
    for role in SlotRole::ALL {
        let key = format!("ALN_{}", role.as_str().to_ascii_uppercase());
        if let Some(path) = env(&key)
            && let Err(e) = panel.params_mut().select(role, path)
        {
            warn!(%role, error = %e, "input rejected");
        }
    }
    if let Some(encoding) = env("ALN_ENCODING") {
        panel.params_mut().set_encoding(Some(encoding.parse::<Encoding>()?));
    }

    // 5) Start twice: the second click lands inside the cooldown.
    info!(outcome = ?panel.start(), "first start");
    info!(outcome = ?panel.start(), "second start");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("interrupted"),
        _ = async {
            while executor.active() > 0 {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        } => info!("all runs finished"),
    }

    panel.shutdown();
    executor.shutdown();
    Ok(())
}
