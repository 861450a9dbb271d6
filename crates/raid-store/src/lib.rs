//! # raid-store
//!
//! Storage layer implementing the repository traits of `raid-core` in
//! process memory.
//!
//! ## Overview
//!
//! Raids are stored as whole aggregates (slots and signups included), so
//! loading is always eager and a save is atomic per raid. Serializing
//! concurrent roster mutations of the same raid is the service layer's job;
//! the store only guarantees that each individual read or write is
//! consistent.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use raid_store::MemoryStore;
//! use raid_core::traits::RaidRepository;
//!
//! async fn example(raid: raid_core::Raid) -> Result<(), raid_core::DomainError> {
//!     let store = MemoryStore::new();
//!     store.raids.create(&raid).await?;
//!     Ok(())
//! }
//! ```

pub mod repositories;

pub use repositories::{
    MemCharacterRepository, MemInstanceRepository, MemLootRepository, MemRaidRepository,
    MemTemplateRepository,
};

/// One of each repository, sharing nothing with other stores
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub raids: MemRaidRepository,
    pub templates: MemTemplateRepository,
    pub characters: MemCharacterRepository,
    pub instances: MemInstanceRepository,
    pub loot: MemLootRepository,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}
