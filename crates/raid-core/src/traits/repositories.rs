//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer states what it needs from storage; the storage layer
//! provides the implementation. A raid is always loaded and saved as a
//! whole aggregate (raid, slots and signups together) so that a save is
//! all-or-nothing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Character, Instance, Loot, Raid, Template};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Raid Repository
// ============================================================================

#[async_trait]
pub trait RaidRepository: Send + Sync {
    /// Load a raid with its slots and signups
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Raid>>;

    /// Raids dated at or after `since`, earliest first
    async fn find_upcoming(&self, since: DateTime<Utc>) -> RepoResult<Vec<Raid>>;

    /// Raids dated before `before`, latest first
    async fn find_before(&self, before: DateTime<Utc>) -> RepoResult<Vec<Raid>>;

    /// Raids scheduled in an instance, earliest first
    async fn find_by_instance(&self, instance_id: Snowflake) -> RepoResult<Vec<Raid>>;

    /// Insert a new raid aggregate
    async fn create(&self, raid: &Raid) -> RepoResult<()>;

    /// Replace a raid aggregate atomically
    async fn save(&self, raid: &Raid) -> RepoResult<()>;

    /// Delete a raid together with its slots and signups
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Template Repository
// ============================================================================

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Template>>;

    /// All templates ordered by name
    async fn find_all(&self) -> RepoResult<Vec<Template>>;

    async fn create(&self, template: &Template) -> RepoResult<()>;

    async fn update(&self, template: &Template) -> RepoResult<()>;
}

// ============================================================================
// Character Repository
// ============================================================================

#[async_trait]
pub trait CharacterRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Character>>;

    async fn find_by_account(&self, account_id: Snowflake) -> RepoResult<Vec<Character>>;

    async fn create(&self, character: &Character) -> RepoResult<()>;
}

// ============================================================================
// Instance Repository
// ============================================================================

#[async_trait]
pub trait InstanceRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Instance>>;

    async fn create(&self, instance: &Instance) -> RepoResult<()>;
}

// ============================================================================
// Loot Repository
// ============================================================================

#[async_trait]
pub trait LootRepository: Send + Sync {
    /// Number of loot records logged for a raid
    async fn count_by_raid(&self, raid_id: Snowflake) -> RepoResult<u64>;

    async fn create(&self, loot: &Loot) -> RepoResult<()>;
}
