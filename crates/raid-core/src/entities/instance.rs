//! Instance entity - a dungeon or raid zone that raids are scheduled in

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: Snowflake,
    pub name: String,
    pub min_level: Option<u16>,
    pub max_level: Option<u16>,
    pub active: bool,
}

impl Instance {
    pub fn new(id: Snowflake, name: String) -> Self {
        Self {
            id,
            name,
            min_level: None,
            max_level: None,
            active: true,
        }
    }

    /// Set the level bracket
    pub fn with_levels(mut self, min_level: u16, max_level: u16) -> Self {
        self.min_level = Some(min_level);
        self.max_level = Some(max_level);
        self
    }
}
