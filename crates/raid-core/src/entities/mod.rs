//! Domain entities - core business objects

mod character;
mod instance;
mod loot;
mod raid;
mod signup;
mod slot;
mod template;

pub use character::Character;
pub use instance::Instance;
pub use loot::Loot;
pub use raid::Raid;
pub use signup::Signup;
pub use slot::{Slot, SlotSpec};
pub use template::{Template, TemplateSlot};
