//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Raid not found: {0}")]
    RaidNotFound(Snowflake),

    #[error("Signup not found: {0}")]
    SignupNotFound(Snowflake),

    #[error("Character not found: {0}")]
    CharacterNotFound(Snowflake),

    #[error("Template not found: {0}")]
    TemplateNotFound(Snowflake),

    #[error("Instance not found: {0}")]
    InstanceNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid level range: {min} > {max}")]
    InvalidLevelRange { min: u16, max: u16 },

    #[error("Too many slots: max {max}")]
    TooManySlots { max: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Character already signed up: {0}")]
    AlreadySignedUp(Snowflake),

    #[error("Identifier already in use: {0}")]
    DuplicateId(Snowflake),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot delete a raid with loot records")]
    RaidHasLoot,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::RaidNotFound(_) => "UNKNOWN_RAID",
            Self::SignupNotFound(_) => "UNKNOWN_SIGNUP",
            Self::CharacterNotFound(_) => "UNKNOWN_CHARACTER",
            Self::TemplateNotFound(_) => "UNKNOWN_TEMPLATE",
            Self::InstanceNotFound(_) => "UNKNOWN_INSTANCE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidDate(_) => "INVALID_DATE",
            Self::InvalidLevelRange { .. } => "INVALID_LEVEL_RANGE",
            Self::TooManySlots { .. } => "TOO_MANY_SLOTS",

            // Conflict
            Self::AlreadySignedUp(_) => "ALREADY_SIGNED_UP",
            Self::DuplicateId(_) => "DUPLICATE_ID",

            // Business Rules
            Self::RaidHasLoot => "RAID_HAS_LOOT",

            // Infrastructure
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RaidNotFound(_)
                | Self::SignupNotFound(_)
                | Self::CharacterNotFound(_)
                | Self::TemplateNotFound(_)
                | Self::InstanceNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidDate(_)
                | Self::InvalidLevelRange { .. }
                | Self::TooManySlots { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadySignedUp(_) | Self::DuplicateId(_) | Self::RaidHasLoot
        )
    }
}
