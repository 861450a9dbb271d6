//! Roster resolution - assigning signups to slots
//!
//! [`RosterResolver`] wraps a loaded [`Raid`](crate::entities::Raid) and
//! performs every roster mutation: placing signups, withdrawing
//! characters, re-deriving placements, resizing and applying templates.

mod layout;
mod resolver;

pub use resolver::RosterResolver;
