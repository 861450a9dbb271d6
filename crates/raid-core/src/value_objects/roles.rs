//! Raid role flags
//!
//! A slot accepts a set of roles and a signup selects the roles its
//! character is willing to play; both are stored as the same bitfield.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Roles: u16 {
        const TANK    = 1 << 0;
        const HEALER  = 1 << 1;
        const MELEE   = 1 << 2;
        const RANGED  = 1 << 3;
        const SUPPORT = 1 << 4;

        const DAMAGE = Self::MELEE.bits() | Self::RANGED.bits();
    }
}

impl Roles {
    /// Whether a slot accepting `self` admits a signup that selected `selected`
    ///
    /// An empty selection means the character has no preference and can
    /// fill any role the slot offers.
    #[inline]
    pub fn admits(&self, selected: Roles) -> bool {
        if selected.is_empty() {
            !self.is_empty()
        } else {
            self.intersects(selected)
        }
    }

    /// Lowercase names of the single roles in this set
    pub fn names(&self) -> Vec<String> {
        self.iter_names()
            .filter(|(_, flag)| flag.bits().is_power_of_two())
            .map(|(name, _)| name.to_lowercase())
            .collect()
    }

    /// Parse a list of role names (case-insensitive, `damage` is accepted)
    pub fn parse_names<I, S>(names: I) -> Result<Self, UnknownRole>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().try_fold(Roles::empty(), |acc, name| {
            let name = name.as_ref().trim();
            Roles::from_name(&name.to_uppercase())
                .map(|role| acc | role)
                .ok_or_else(|| UnknownRole(name.to_string()))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl fmt::Display for Roles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("any");
        }
        f.write_str(&self.names().join(", "))
    }
}

impl Serialize for Roles {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.names())
    }
}

impl<'de> Deserialize<'de> for Roles {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        Roles::parse_names(names).map_err(serde::de::Error::custom)
    }
}
