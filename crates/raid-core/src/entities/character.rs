//! Character entity - a player's in-game character

use serde::{Deserialize, Serialize};

use crate::value_objects::{ClassId, Snowflake};

/// A character belonging to a player account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: Snowflake,
    pub account_id: Snowflake,
    pub name: String,
    pub class_id: ClassId,
    /// Main character of its account (as opposed to an alt)
    pub is_main: bool,
}

impl Character {
    /// Create a main character
    pub fn new(id: Snowflake, account_id: Snowflake, name: String, class_id: ClassId) -> Self {
        Self {
            id,
            account_id,
            name,
            class_id,
            is_main: true,
        }
    }

    /// Create an alt character
    pub fn alt(id: Snowflake, account_id: Snowflake, name: String, class_id: ClassId) -> Self {
        Self {
            is_main: false,
            ..Self::new(id, account_id, name, class_id)
        }
    }

    #[inline]
    pub fn belongs_to(&self, account_id: Snowflake) -> bool {
        self.account_id == account_id
    }
}
