use std::path::Path;

use serde::{Deserialize, Serialize};

/// File format accepted by a parameter slot or produced by the aligner.
///
/// Each tag maps to a fixed list of filename suffixes.
/// Matching is done on the file name only and ignores ASCII case, so `Sample.FQ.GZ` is a FASTQ file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormatTag {
    /// Raw sequencing reads.
    Fastq,
    /// Reference sequences.
    Fasta,
    /// Variant calls (known-sites sets).
    Vcf,
    /// Aligned reads, the output format.
    Bam,
}

impl FormatTag {
    /// Filename suffixes accepted for this format, longest first.
    pub fn suffixes(&self) -> &'static [&'static str] {
        match self {
            FormatTag::Fastq => &[".fastq.gz", ".fq.gz", ".fastq", ".fq"],
            FormatTag::Fasta => &[".fasta.gz", ".fa.gz", ".fasta", ".fna", ".fa"],
            FormatTag::Vcf => &[".vcf.gz", ".vcf"],
            FormatTag::Bam => &[".bam"],
        }
    }

    /// Human readable filter description, as shown by file choosers.
    pub fn description(&self) -> &'static str {
        match self {
            FormatTag::Fastq => "FASTQ sequences",
            FormatTag::Fasta => "FASTA reference",
            FormatTag::Vcf => "Variant Call Format",
            FormatTag::Bam => "Binary Alignment Map",
        }
    }

    /// Returns `true` if the file name of `path` ends with one of this format's suffixes.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let name = name.to_ascii_lowercase();
        self.suffixes().iter().any(|s| name.len() > s.len() && name.ends_with(s))
    }

    /// Returns `true` if `path` matches at least one of `formats`.
    pub fn any_matches(formats: &[FormatTag], path: &Path) -> bool {
        formats.iter().any(|f| f.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fastq_accepts_compressed_and_plain() {
        assert!(FormatTag::Fastq.matches(Path::new("/data/sample_R1.fastq.gz")));
        assert!(FormatTag::Fastq.matches(Path::new("sample_R2.fq")));
        assert!(FormatTag::Fastq.matches(Path::new("SAMPLE.FQ.GZ")));
        assert!(!FormatTag::Fastq.matches(Path::new("sample.fasta")));
    }

    #[test]
    fn bare_suffix_is_not_a_file() {
        assert!(!FormatTag::Vcf.matches(Path::new("/data/.vcf")));
        assert!(!FormatTag::Bam.matches(Path::new("/")));
    }

    #[test]
    fn any_matches_checks_every_format() {
        let formats = [FormatTag::Fasta, FormatTag::Vcf];
        assert!(FormatTag::any_matches(&formats, Path::new("dbsnp_138.b37.vcf.gz")));
        assert!(FormatTag::any_matches(&formats, Path::new("human_g1k_v37.fasta")));
        assert!(!FormatTag::any_matches(&formats, Path::new("reads.fastq")));
        assert!(!FormatTag::any_matches(&[], Path::new("reads.fastq")));
    }
}
