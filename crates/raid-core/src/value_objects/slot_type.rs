//! Slot type discriminant

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of slot, deciding which characters of an account may take it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotType {
    /// Open to main and alt characters
    #[default]
    Any,
    /// Reserved for an account's main character
    Main,
}

impl SlotType {
    /// Placement rank; higher ranks are offered first
    #[inline]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Any => 0,
            Self::Main => 1,
        }
    }

    /// Whether a character with the given main/alt standing fits this type
    #[inline]
    pub const fn admits(self, is_main: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Main => is_main,
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Main => f.write_str("main"),
        }
    }
}
