use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SlotRole;

/// Any input that must be present before a job can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequiredInput {
    Slot(SlotRole),
    Encoding,
    OutputPath,
}

impl fmt::Display for RequiredInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredInput::Slot(role) => write!(f, "{} ({})", role.label(), role),
            RequiredInput::Encoding => f.write_str("encoding"),
            RequiredInput::OutputPath => f.write_str("output path"),
        }
    }
}

impl From<SlotRole> for RequiredInput {
    fn from(role: SlotRole) -> Self {
        RequiredInput::Slot(role)
    }
}
