use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::Arc,
};

use aln_model::FormatTag;
use tracing::debug;

/// Parameters of an interactive save prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub title: String,
    pub initial_name: String,
    pub initial_dir: Option<PathBuf>,
    pub filter: FormatTag,
}

/// Interactive destination picker, provided by the surrounding application.
pub trait FileChooser: Send + Sync {
    /// Returns the chosen path, or `None` if the user dismissed the prompt.
    fn choose_save(&self, request: &SaveRequest) -> Option<PathBuf>;
}

/// The user dismissed the save prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

pub struct OutputResolver {
    chooser: Arc<dyn FileChooser>,
    title: String,
    extension: String,
}

impl OutputResolver {
    pub fn new(chooser: Arc<dyn FileChooser>, title: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            chooser,
            title: title.into(),
            extension: extension.into(),
        }
    }

    /// Ask for a destination, suggesting `<base_name><extension>` inside `source_dir`.
    ///
    /// The returned path always ends with the required extension.
    pub fn resolve(&self, base_name: &str, source_dir: Option<&Path>) -> Result<PathBuf, Cancelled> {
        let request = SaveRequest {
            title: self.title.clone(),
            initial_name: format!("{base_name}{}", self.extension),
            initial_dir: source_dir.map(Path::to_path_buf),
            filter: FormatTag::Bam,
        };

        let Some(chosen) = self.chooser.choose_save(&request) else {
            debug!(suggested = %request.initial_name, "output selection cancelled");
            return Err(Cancelled);
        };
        Ok(ensure_extension(chosen, &self.extension))
    }
}

/// Strip everything from the first `.` of `file_name`.
///
/// `sample_R1.fastq.gz` becomes `sample_R1`; a name without a dot is returned whole.
pub fn suggested_base_name(file_name: &str) -> &str {
    match file_name.find('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

/// Append `extension` to `path` unless its file name already ends with it.
///
/// The existing extension is kept: `run.sam` becomes `run.sam.bam`.
pub fn ensure_extension(path: PathBuf, extension: &str) -> PathBuf {
    let has_extension = path
        .file_name()
        .map(|name| name.to_string_lossy().ends_with(extension))
        .unwrap_or(false);
    if has_extension {
        return path;
    }
    let mut raw: OsString = path.into_os_string();
    raw.push(extension);
    PathBuf::from(raw)
}
