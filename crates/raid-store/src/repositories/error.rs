//! Error handling utilities for repositories

use raid_core::error::DomainError;
use raid_core::value_objects::Snowflake;

/// Create a "raid not found" error
pub fn raid_not_found(id: Snowflake) -> DomainError {
    DomainError::RaidNotFound(id)
}

/// Create a "template not found" error
pub fn template_not_found(id: Snowflake) -> DomainError {
    DomainError::TemplateNotFound(id)
}

/// Create an "id already taken" error for inserts
pub fn duplicate_id(id: Snowflake) -> DomainError {
    DomainError::DuplicateId(id)
}
