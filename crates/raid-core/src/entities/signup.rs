//! Signup entity - a character's request to join a raid

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Character;
use crate::value_objects::{Roles, Snowflake};

/// A character signed up for a raid
///
/// Whether the signup is placed is not stored here: a slot's occupant
/// reference is the only record of placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signup {
    pub id: Snowflake,
    pub raid_id: Snowflake,
    pub character: Character,
    /// Roles the character is willing to play; empty means no preference
    pub roles: Roles,
    pub created_at: DateTime<Utc>,
}

impl Signup {
    pub fn new(
        id: Snowflake,
        raid_id: Snowflake,
        character: Character,
        roles: Roles,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            raid_id,
            character,
            roles,
            created_at,
        }
    }

    /// The signup date used for fairness ordering
    #[inline]
    pub fn date(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn account_id(&self) -> Snowflake {
        self.character.account_id
    }

    #[inline]
    pub fn character_id(&self) -> Snowflake {
        self.character.id
    }
}
