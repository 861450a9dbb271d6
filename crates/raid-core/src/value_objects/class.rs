//! Character class identifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a game class (warrior, priest, ...)
///
/// The class catalog lives outside this crate; the numeric value doubles
/// as the class rank used to order slots during placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(u16);

impl ClassId {
    #[inline]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for ClassId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}
