use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Quality-score encoding of the input reads.
///
/// There is no default: an unselected encoding is represented as `Option::<Encoding>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Encoding {
    /// Sanger / Illumina 1.8+ (ASCII offset 33).
    Phred33,
    /// Illumina 1.3 - 1.7 (ASCII offset 64).
    Phred64,
}

impl Encoding {
    /// All selectable encodings, in display order.
    pub const ALL: [Encoding; 2] = [Encoding::Phred33, Encoding::Phred64];

    /// ASCII offset of the quality characters.
    pub fn offset(&self) -> u8 {
        match self {
            Encoding::Phred33 => 33,
            Encoding::Phred64 => 64,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Phred33 => "phred33",
            Encoding::Phred64 => "phred64",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "phred33" | "phred+33" | "sanger" => Ok(Encoding::Phred33),
            "phred64" | "phred+64" | "illumina" => Ok(Encoding::Phred64),
            _ => Err(ModelError::UnknownEncoding(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("PHRED+33".parse::<Encoding>(), Ok(Encoding::Phred33));
        assert_eq!(" sanger ".parse::<Encoding>(), Ok(Encoding::Phred33));
        assert_eq!("illumina".parse::<Encoding>(), Ok(Encoding::Phred64));
        assert_eq!(
            "solexa".parse::<Encoding>(),
            Err(ModelError::UnknownEncoding("solexa".into()))
        );
    }

    #[test]
    fn offsets() {
        assert_eq!(Encoding::Phred33.offset(), 33);
        assert_eq!(Encoding::Phred64.offset(), 64);
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_string(&Encoding::Phred64).unwrap();
        assert_eq!(json, r#""phred64""#);
    }
}
