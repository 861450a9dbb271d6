//! # raid-core
//!
//! Domain layer of the raid planner: entities, value objects, the roster
//! resolver that assigns signups to slots, repository traits and roster
//! events. This crate has no dependency on storage or transport.

pub mod calendar;
pub mod entities;
pub mod error;
pub mod events;
pub mod roster;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use calendar::{word_date, WordDate};
pub use entities::{
    Character, Instance, Loot, Raid, Signup, Slot, SlotSpec, Template, TemplateSlot,
};
pub use error::DomainError;
pub use events::{RosterEvent, VacateReason};
pub use roster::RosterResolver;
pub use traits::{
    CharacterRepository, InstanceRepository, LootRepository, RaidRepository, RepoResult,
    TemplateRepository,
};
pub use value_objects::{
    ClassId, Roles, SlotType, Snowflake, SnowflakeGenerator, SnowflakeParseError, UnknownRole,
};
