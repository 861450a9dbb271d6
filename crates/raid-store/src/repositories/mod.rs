//! Repository implementations
//!
//! In-process implementations of the repository traits defined in raid-core.
//! Each repository is cheap to clone; clones share the same underlying data.

mod character;
mod error;
mod instance;
mod loot;
mod raid;
mod template;

pub use character::MemCharacterRepository;
pub use instance::MemInstanceRepository;
pub use loot::MemLootRepository;
pub use raid::MemRaidRepository;
pub use template::MemTemplateRepository;
