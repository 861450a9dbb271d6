//! Roster events - what the resolver did to a raid's roster
//!
//! Collected while the resolver runs so callers can log them or forward
//! them to whoever renders the roster.

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Why a slot lost its occupant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacateReason {
    /// The signup was withdrawn
    Withdrawn,
    /// Cleared to re-derive placements from a signup date onward
    Resettled,
    /// The slot's new constraints no longer accept the occupant
    Evicted,
    /// The slot itself was destroyed
    SlotRemoved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RosterEvent {
    Placed {
        raid_id: Snowflake,
        signup_id: Snowflake,
        character_id: Snowflake,
        slot_id: Snowflake,
        position: u32,
    },
    Waitlisted {
        raid_id: Snowflake,
        signup_id: Snowflake,
        character_id: Snowflake,
    },
    Vacated {
        raid_id: Snowflake,
        signup_id: Snowflake,
        slot_id: Snowflake,
        reason: VacateReason,
    },
    SignupRemoved {
        raid_id: Snowflake,
        signup_id: Snowflake,
        character_id: Snowflake,
    },
    SlotAdded {
        raid_id: Snowflake,
        slot_id: Snowflake,
        position: u32,
    },
    SlotRemoved {
        raid_id: Snowflake,
        slot_id: Snowflake,
        position: u32,
    },
}

impl RosterEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Placed { .. } => "PLACED",
            Self::Waitlisted { .. } => "WAITLISTED",
            Self::Vacated { .. } => "VACATED",
            Self::SignupRemoved { .. } => "SIGNUP_REMOVED",
            Self::SlotAdded { .. } => "SLOT_ADDED",
            Self::SlotRemoved { .. } => "SLOT_REMOVED",
        }
    }

    pub fn raid_id(&self) -> Snowflake {
        match self {
            Self::Placed { raid_id, .. }
            | Self::Waitlisted { raid_id, .. }
            | Self::Vacated { raid_id, .. }
            | Self::SignupRemoved { raid_id, .. }
            | Self::SlotAdded { raid_id, .. }
            | Self::SlotRemoved { raid_id, .. } => *raid_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = RosterEvent::Vacated {
            raid_id: Snowflake::new(1),
            signup_id: Snowflake::new(2),
            slot_id: Snowflake::new(3),
            reason: VacateReason::SlotRemoved,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "VACATED");
        assert_eq!(json["reason"], "slot_removed");
        assert_eq!(json["slot_id"], "3");
        assert_eq!(event.event_type(), "VACATED");
        assert_eq!(event.raid_id(), Snowflake::new(1));
    }
}
