//! Loot entity - an item awarded to a character during a raid

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loot {
    pub id: Snowflake,
    pub raid_id: Snowflake,
    pub character_id: Snowflake,
    pub item: String,
    pub looted_at: DateTime<Utc>,
}

impl Loot {
    pub fn new(id: Snowflake, raid_id: Snowflake, character_id: Snowflake, item: String) -> Self {
        Self {
            id,
            raid_id,
            character_id,
            item,
            looted_at: Utc::now(),
        }
    }
}
