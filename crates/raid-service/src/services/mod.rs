//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! validation, locking and orchestration of roster operations.

pub mod character;
pub mod context;
pub mod dates;
pub mod error;
pub mod instance;
pub mod loot;
pub mod raid;
pub mod signup;
pub mod template;

// Re-export all services for convenience
pub use character::CharacterService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{FieldErrors, ServiceError, ServiceResult};
pub use instance::InstanceService;
pub use loot::LootService;
pub use raid::{HistoryWindow, RaidService};
pub use signup::SignupService;
pub use template::TemplateService;
