use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{FormatTag, SlotRole};

/// A typed file input of the panel.
///
/// `value`, when present, matches at least one of the role's formats.
/// The check happens once, when a file is selected; nothing re-validates it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSlot {
    role: SlotRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<PathBuf>,
}

impl ParameterSlot {
    /// Create an empty slot.
    pub fn empty(role: SlotRole) -> Self {
        Self { role, value: None }
    }

    pub fn role(&self) -> SlotRole {
        self.role
    }

    pub fn value(&self) -> Option<&Path> {
        self.value.as_deref()
    }

    pub fn allowed_formats(&self) -> &'static [FormatTag] {
        self.role.formats()
    }

    /// Returns `true` if `path` may be stored in this slot.
    pub fn accepts(&self, path: &Path) -> bool {
        FormatTag::any_matches(self.allowed_formats(), path)
    }

    /// Store `path` if it matches the slot's formats.
    ///
    /// Returns `false` and leaves the slot unchanged otherwise.
    pub fn try_set(&mut self, path: PathBuf) -> bool {
        if !self.accepts(&path) {
            return false;
        }
        self.value = Some(path);
        true
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}
