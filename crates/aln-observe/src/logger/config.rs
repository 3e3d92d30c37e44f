use std::io::IsTerminal;

use crate::logger::{error::LoggerError, format::LoggerFormat};

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `info` or `info,aln_exec=debug`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color,
        }
    }
}

impl LoggerConfig {
    /// Build a config from optional textual overrides, keeping defaults for what is absent.
    pub fn from_parts(format: Option<&str>, level: Option<&str>) -> Result<Self, LoggerError> {
        let mut cfg = Self::default();
        if let Some(format) = format {
            cfg.format = format.parse()?;
        }
        if let Some(level) = level {
            let level = level.trim();
            if level.is_empty() {
                return Err(LoggerError::InvalidLogLevel(level.to_string()));
            }
            cfg.level = level.to_string();
        }
        Ok(cfg)
    }
}
