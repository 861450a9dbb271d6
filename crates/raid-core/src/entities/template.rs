//! Template entity - a reusable, named roster layout

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SlotSpec;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSlot {
    pub id: Snowflake,
    #[serde(flatten)]
    pub spec: SlotSpec,
}

/// Ordered slot layout that can be stamped onto a raid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: Snowflake,
    pub name: String,
    pub slots: Vec<TemplateSlot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Template {
    pub fn new(id: Snowflake, name: String, slots: Vec<TemplateSlot>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            slots,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Replace the layout; raids the template was applied to keep their copy
    pub fn set_slots(&mut self, slots: Vec<TemplateSlot>) {
        self.slots = slots;
        self.updated_at = Utc::now();
    }
}
