use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{FormatTag, error::ModelError};

/// Role of a file parameter slot in the alignment panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotRole {
    ForwardReads,
    ReverseReads,
    ReferenceGenome,
    DbSnp,
    Mills,
    Phase1Indels,
}

impl SlotRole {
    /// Every slot, in panel order.
    pub const ALL: [SlotRole; 6] = [
        SlotRole::ForwardReads,
        SlotRole::ReverseReads,
        SlotRole::ReferenceGenome,
        SlotRole::DbSnp,
        SlotRole::Mills,
        SlotRole::Phase1Indels,
    ];

    /// Known-sites sets in the order the aligner expects them.
    pub const KNOWN_SITES: [SlotRole; 3] = [SlotRole::DbSnp, SlotRole::Mills, SlotRole::Phase1Indels];

    /// Label shown next to the slot.
    pub fn label(&self) -> &'static str {
        match self {
            SlotRole::ForwardReads => "Forward sequences",
            SlotRole::ReverseReads => "Reverse sequences",
            SlotRole::ReferenceGenome => "Genome (GRCh37)",
            SlotRole::DbSnp => "dbSNP",
            SlotRole::Mills => "Mills",
            SlotRole::Phase1Indels => "1000 genomes phase 1 indels",
        }
    }

    /// Formats a selected file must match.
    pub fn formats(&self) -> &'static [FormatTag] {
        match self {
            SlotRole::ForwardReads | SlotRole::ReverseReads => &[FormatTag::Fastq],
            SlotRole::ReferenceGenome => &[FormatTag::Fasta],
            SlotRole::DbSnp | SlotRole::Mills | SlotRole::Phase1Indels => &[FormatTag::Vcf],
        }
    }

    /// Key under which the selected path is persisted between sessions.
    ///
    /// Read files change from run to run and are never persisted.
    pub fn persist_key(&self) -> Option<&'static str> {
        match self {
            SlotRole::ForwardReads | SlotRole::ReverseReads => None,
            SlotRole::ReferenceGenome => Some("reference.genome"),
            SlotRole::DbSnp => Some("dbSNP"),
            SlotRole::Mills => Some("mills"),
            SlotRole::Phase1Indels => Some("phase1"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotRole::ForwardReads => "forward",
            SlotRole::ReverseReads => "reverse",
            SlotRole::ReferenceGenome => "genome",
            SlotRole::DbSnp => "dbsnp",
            SlotRole::Mills => "mills",
            SlotRole::Phase1Indels => "phase1",
        }
    }
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotRole {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        SlotRole::ALL
            .into_iter()
            .find(|r| r.as_str() == norm)
            .ok_or_else(|| ModelError::UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_reference_data_is_persisted() {
        let keys: Vec<_> = SlotRole::ALL.iter().filter_map(|r| r.persist_key()).collect();
        assert_eq!(keys, vec!["reference.genome", "dbSNP", "mills", "phase1"]);
    }

    #[test]
    fn known_sites_are_vcf() {
        for role in SlotRole::KNOWN_SITES {
            assert_eq!(role.formats(), &[FormatTag::Vcf]);
        }
    }

    #[test]
    fn parse_roundtrips_short_names() {
        for role in SlotRole::ALL {
            assert_eq!(role.as_str().parse::<SlotRole>(), Ok(role));
        }
        assert!("tumor".parse::<SlotRole>().is_err());
    }
}
