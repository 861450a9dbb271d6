//! Events emitted while the roster changes

mod roster_event;

pub use roster_event::{RosterEvent, VacateReason};
