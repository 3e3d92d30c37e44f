use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Encoding;

/// Immutable description of one alignment run.
///
/// Created once per submission and then handed over, by value, to an executor.
/// There are no setters; executors read it through the accessors or as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescription {
    forward_reads: PathBuf,
    reverse_reads: PathBuf,
    reference_genome: PathBuf,
    /// dbSNP, Mills, 1000 genomes phase 1 indels; in this order.
    known_sites: Vec<PathBuf>,
    encoding: Encoding,
    output_path: PathBuf,
}

impl JobDescription {
    pub fn new(
        forward_reads: PathBuf,
        reverse_reads: PathBuf,
        reference_genome: PathBuf,
        known_sites: [PathBuf; 3],
        encoding: Encoding,
        output_path: PathBuf,
    ) -> Self {
        Self {
            forward_reads,
            reverse_reads,
            reference_genome,
            known_sites: known_sites.into(),
            encoding,
            output_path,
        }
    }

    pub fn forward_reads(&self) -> &Path {
        &self.forward_reads
    }

    pub fn reverse_reads(&self) -> &Path {
        &self.reverse_reads
    }

    pub fn reference_genome(&self) -> &Path {
        &self.reference_genome
    }

    pub fn known_sites(&self) -> &[PathBuf] {
        &self.known_sites
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
