//! Request DTOs for roster operations
//!
//! Every settable field is listed explicitly; nothing else on the entities
//! can be changed through a request. All request DTOs implement
//! `Deserialize` and `Validate`.

use raid_core::{Roles, SlotType, Snowflake};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// ============================================================================
// Raid Requests
// ============================================================================

/// Create raid request
///
/// The date is given as a calendar date and a clock time, both optional;
/// missing parts fall back to tomorrow at the configured raid hour.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateRaidRequest {
    #[validate(length(min = 1, max = 100, message = "Raid name must be 1-100 characters"))]
    pub name: String,

    /// e.g. `2026-03-14` or `03/14/2026`
    pub caldate: Option<String>,

    /// e.g. `20:30` or `8:30 PM`
    pub caltime: Option<String>,

    pub instance_id: Option<Snowflake>,

    /// Template stamped onto the new roster
    pub template_id: Option<Snowflake>,

    #[validate(range(min = 1, message = "A raid needs at least one slot"))]
    pub number_of_slots: Option<usize>,

    #[validate(range(min = 1, max = 999, message = "Level must be 1-999"))]
    pub min_level: Option<u16>,

    #[validate(range(min = 1, max = 999, message = "Level must be 1-999"))]
    pub max_level: Option<u16>,
}

/// Update raid request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRaidRequest {
    #[validate(length(min = 1, max = 100, message = "Raid name must be 1-100 characters"))]
    pub name: Option<String>,

    pub caldate: Option<String>,

    pub caltime: Option<String>,

    pub template_id: Option<Snowflake>,

    #[validate(range(min = 1, message = "A raid needs at least one slot"))]
    pub number_of_slots: Option<usize>,

    #[validate(range(min = 1, max = 999, message = "Level must be 1-999"))]
    pub min_level: Option<u16>,

    #[validate(range(min = 1, max = 999, message = "Level must be 1-999"))]
    pub max_level: Option<u16>,
}

// ============================================================================
// Signup Requests
// ============================================================================

/// Sign a character up for a raid
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignupRequest {
    pub character_id: Snowflake,

    /// Role names; empty means "any role"
    #[serde(default)]
    #[validate(custom(function = "validate_role_names"))]
    pub roles: Vec<String>,
}

/// Change the roles of an existing signup
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SelectRolesRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_role_names"))]
    pub roles: Vec<String>,
}

// ============================================================================
// Template Requests
// ============================================================================

/// One slot of a template
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TemplateSlotRequest {
    /// Accepted class ids; empty means any class
    #[serde(default)]
    pub classes: Vec<u16>,

    #[validate(
        length(min = 1, message = "A slot must accept at least one role"),
        custom(function = "validate_role_names")
    )]
    pub roles: Vec<String>,

    #[serde(default)]
    pub slot_type: SlotType,

    #[serde(default)]
    pub closed: bool,
}

/// Create or replace a template
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Template name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "A template needs at least one slot"), nested)]
    pub slots: Vec<TemplateSlotRequest>,
}

// ============================================================================
// Character / Instance / Loot Requests
// ============================================================================

/// Register a character for an account
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateCharacterRequest {
    #[validate(length(min = 2, max = 32, message = "Character name must be 2-32 characters"))]
    pub name: String,

    pub class_id: u16,

    /// Alts are refused by main-only slots
    #[serde(default = "default_true")]
    pub is_main: bool,
}

/// Create an instance (dungeon or raid zone)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateInstanceRequest {
    #[validate(length(min = 1, max = 100, message = "Instance name must be 1-100 characters"))]
    pub name: String,

    pub min_level: Option<u16>,

    pub max_level: Option<u16>,
}

/// Record an item looted during a raid
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecordLootRequest {
    pub character_id: Snowflake,

    #[validate(length(min = 1, max = 200, message = "Item must be 1-200 characters"))]
    pub item: String,
}

fn default_true() -> bool {
    true
}

fn validate_role_names(names: &[String]) -> Result<(), ValidationError> {
    Roles::parse_names(names).map(|_| ()).map_err(|err| {
        let mut error = ValidationError::new("unknown_role");
        error.message = Some(err.to_string().into());
        error
    })
}
