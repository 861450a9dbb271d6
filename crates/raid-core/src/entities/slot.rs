//! Slot entity - one constrained position in a raid roster

use serde::{Deserialize, Serialize};

use super::Signup;
use crate::value_objects::{ClassId, Roles, SlotType, Snowflake};

/// The constraints a slot places on its occupant
///
/// Shared by raid slots and template slots; two slots "differ" exactly
/// when their specs are unequal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpec {
    /// Accepted classes; empty accepts every class
    #[serde(default)]
    pub classes: Vec<ClassId>,
    pub roles: Roles,
    #[serde(default)]
    pub slot_type: SlotType,
    #[serde(default)]
    pub closed: bool,
}

impl SlotSpec {
    /// A slot any character can take in any role
    pub fn unconstrained() -> Self {
        Self {
            classes: Vec::new(),
            roles: Roles::all(),
            slot_type: SlotType::Any,
            closed: false,
        }
    }

    /// A slot restricted to the given roles
    pub fn for_roles(roles: Roles) -> Self {
        Self {
            roles,
            ..Self::unconstrained()
        }
    }

    pub fn with_classes(mut self, classes: impl IntoIterator<Item = ClassId>) -> Self {
        self.classes = classes.into_iter().collect();
        self
    }

    pub fn with_type(mut self, slot_type: SlotType) -> Self {
        self.slot_type = slot_type;
        self
    }

    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    /// Acceptance predicate: class, slot type and role all have to fit.
    ///
    /// Does not look at `closed`; callers decide whether a closed slot is
    /// considered at all.
    pub fn accepts(&self, signup: &Signup) -> bool {
        let character = &signup.character;
        (self.classes.is_empty() || self.classes.contains(&character.class_id))
            && self.slot_type.admits(character.is_main)
            && self.roles.admits(signup.roles)
    }

    /// Class rank used for scan order; unconstrained slots rank lowest
    pub fn class_rank(&self) -> u32 {
        self.classes
            .iter()
            .map(|class| u32::from(class.into_inner()) + 1)
            .max()
            .unwrap_or(0)
    }
}

/// A position in a raid roster, optionally held by one signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: Snowflake,
    pub raid_id: Snowflake,
    pub position: u32,
    #[serde(flatten)]
    pub spec: SlotSpec,
    /// Template slot this slot was built from, cleared once a template is applied
    pub template_slot_id: Option<Snowflake>,
    pub signup_id: Option<Snowflake>,
}

impl Slot {
    pub fn new(id: Snowflake, raid_id: Snowflake, position: u32, spec: SlotSpec) -> Self {
        Self {
            id,
            raid_id,
            position,
            spec,
            template_slot_id: None,
            signup_id: None,
        }
    }

    /// Not closed and not occupied
    #[inline]
    pub fn is_open(&self) -> bool {
        !self.spec.closed && self.signup_id.is_none()
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.signup_id.is_some()
    }

    #[inline]
    pub fn is_held_by(&self, signup_id: Snowflake) -> bool {
        self.signup_id == Some(signup_id)
    }

    #[inline]
    pub fn accepts(&self, signup: &Signup) -> bool {
        self.spec.accepts(signup)
    }

    /// Scan-order key: class rank, then slot-type rank (both descending)
    #[inline]
    pub fn rank(&self) -> (u32, u8) {
        (self.spec.class_rank(), self.spec.slot_type.rank())
    }
}
