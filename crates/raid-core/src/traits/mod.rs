//! Persistence ports

mod repositories;

pub use repositories::{
    CharacterRepository, InstanceRepository, LootRepository, RaidRepository, RepoResult,
    TemplateRepository,
};
