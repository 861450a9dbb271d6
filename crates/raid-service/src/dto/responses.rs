//! Response DTOs
//!
//! All response DTOs implement `Serialize`. Snowflake IDs are serialized
//! as strings.

use chrono::{DateTime, Utc};
use raid_core::{Roles, SlotType};
use serde::Serialize;

// ============================================================================
// Raid Responses
// ============================================================================

/// Full view of one raid and its roster
#[derive(Debug, Clone, Serialize)]
pub struct RaidResponse {
    pub id: String,
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    pub name: String,
    pub date: DateTime<Utc>,
    /// Coarse label relative to today, e.g. "Next Friday"
    pub word_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_level: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_level: Option<u16>,
    pub finalized: bool,
    pub started: bool,
    /// Calendar UID
    pub uid: String,
    pub number_of_slots: usize,
    pub slots: Vec<SlotResponse>,
    /// Slot positions per party
    pub groups: Vec<Vec<u32>>,
    pub confirmed: Vec<CharacterResponse>,
    pub waiting_list: Vec<WaitingGroupResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RaidResponse {
    /// Names of the characters holding a slot, in slot order
    pub fn confirmed_names(&self) -> Vec<&str> {
        self.confirmed.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of the characters on the waiting list, in signup order
    pub fn waiting_names(&self) -> Vec<&str> {
        self.waiting_list
            .iter()
            .flat_map(|group| group.signups.iter())
            .map(|signup| signup.character_name.as_str())
            .collect()
    }
}

/// Raid as shown in listings
#[derive(Debug, Clone, Serialize)]
pub struct RaidSummaryResponse {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub word_date: String,
    pub finalized: bool,
    pub number_of_slots: usize,
    pub confirmed_count: usize,
    pub waiting_count: usize,
}

/// Raid index: upcoming raids soonest first, old raids latest first
#[derive(Debug, Clone, Serialize)]
pub struct RaidListResponse {
    pub upcoming: Vec<RaidSummaryResponse>,
    pub old: Vec<RaidSummaryResponse>,
}

/// Values proposed for a new raid form
#[derive(Debug, Clone, Serialize)]
pub struct RaidDefaultsResponse {
    pub date: DateTime<Utc>,
    pub caldate: String,
    pub caltime: String,
    pub number_of_slots: usize,
}

/// One roster slot
#[derive(Debug, Clone, Serialize)]
pub struct SlotResponse {
    pub id: String,
    pub position: u32,
    pub classes: Vec<u16>,
    pub roles: Roles,
    pub slot_type: SlotType,
    pub closed: bool,
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupant: Option<SignupResponse>,
}

/// Adjacent waiting signups of one account
#[derive(Debug, Clone, Serialize)]
pub struct WaitingGroupResponse {
    pub account_id: String,
    pub signups: Vec<SignupResponse>,
}

// ============================================================================
// Signup Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SignupResponse {
    pub id: String,
    pub character_id: String,
    pub character_name: String,
    pub account_id: String,
    pub roles: Roles,
    pub signed_up_at: DateTime<Utc>,
}

/// Result of signing up: where the character ended up
#[derive(Debug, Clone, Serialize)]
pub struct SignupOutcomeResponse {
    pub signup: SignupResponse,
    pub placed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

// ============================================================================
// Template Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TemplateResponse {
    pub id: String,
    pub name: String,
    pub slots: Vec<TemplateSlotResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateSlotResponse {
    pub id: String,
    pub classes: Vec<u16>,
    pub roles: Roles,
    pub slot_type: SlotType,
    pub closed: bool,
}

// ============================================================================
// Character / Instance / Loot Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CharacterResponse {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub class_id: u16,
    pub is_main: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstanceResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_level: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_level: Option<u16>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LootResponse {
    pub id: String,
    pub raid_id: String,
    pub character_id: String,
    pub item: String,
    pub looted_at: DateTime<Utc>,
}
