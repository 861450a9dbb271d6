//! Value objects - immutable types that represent domain concepts

mod class;
mod roles;
mod slot_type;
mod snowflake;

pub use class::ClassId;
pub use roles::{Roles, UnknownRole};
pub use slot_type::SlotType;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
