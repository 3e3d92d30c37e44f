use std::time::Duration;

/// Default time the start action stays disabled after a submission.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(3000);

/// Extension every alignment output carries.
pub const OUTPUT_EXTENSION: &str = ".bam";

#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// How long submission stays blocked after a job was handed off.
    pub cooldown: Duration,
    /// Appended to the chosen output path when missing.
    pub output_extension: String,
    /// Title of the save prompt.
    pub save_title: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN,
            output_extension: OUTPUT_EXTENSION.to_string(),
            save_title: "Save BAM file".to_string(),
        }
    }
}

impl PanelConfig {
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }
}
