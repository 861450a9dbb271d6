//! Greedy, time-ordered placement of signups into slots
//!
//! Placement is not a maximum matching. Each signup takes the first open
//! slot that accepts it, scanning slots by class rank, then slot-type rank
//! (both descending), then position. Signups are offered in signup-date
//! order with insertion order breaking ties, so re-running the resolver
//! on the same roster always produces the same assignment.

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::entities::{Raid, Signup};
use crate::error::DomainError;
use crate::events::{RosterEvent, VacateReason};
use crate::value_objects::{Roles, Snowflake};

/// Resolver bound to one raid for the duration of a mutation
///
/// Callers must hold the raid's lock while a resolver is alive.
pub struct RosterResolver<'a> {
    pub(super) raid: &'a mut Raid,
    pub(super) events: Vec<RosterEvent>,
}

impl<'a> RosterResolver<'a> {
    pub fn new(raid: &'a mut Raid) -> Self {
        Self {
            raid,
            events: Vec::new(),
        }
    }

    pub fn raid(&self) -> &Raid {
        self.raid
    }

    pub fn events(&self) -> &[RosterEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<RosterEvent> {
        self.events
    }

    /// Add a signup and try to place it right away
    ///
    /// Returns whether the signup got a slot; an unplaced signup stays on
    /// the waiting list.
    pub fn sign_up(&mut self, signup: Signup) -> Result<bool, DomainError> {
        let signup_id = signup.id;
        self.raid.add_signup(signup)?;
        self.raid.touch();
        Ok(self.place_character(signup_id))
    }

    /// Place a signup into the first acceptable open slot
    ///
    /// A signup that already holds a slot keeps it and counts as placed.
    pub fn place_character(&mut self, signup_id: Snowflake) -> bool {
        let Some(signup) = self.raid.signup(signup_id) else {
            return false;
        };
        if self.raid.is_placed(signup_id) {
            return true;
        }
        let character_id = signup.character_id();

        let mut candidates: Vec<usize> = self
            .raid
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_open())
            .map(|(index, _)| index)
            .collect();
        candidates.sort_by(|&a, &b| {
            let (a, b) = (&self.raid.slots[a], &self.raid.slots[b]);
            b.rank().cmp(&a.rank()).then(a.position.cmp(&b.position))
        });

        let chosen = candidates
            .into_iter()
            .find(|&index| self.raid.slots[index].accepts(signup));

        let raid_id = self.raid.id;
        match chosen {
            Some(index) => {
                let slot = &mut self.raid.slots[index];
                slot.signup_id = Some(signup_id);
                trace!(%raid_id, %signup_id, position = slot.position, "Signup placed");
                self.events.push(RosterEvent::Placed {
                    raid_id,
                    signup_id,
                    character_id,
                    slot_id: slot.id,
                    position: slot.position,
                });
                true
            }
            None => {
                trace!(%raid_id, %signup_id, "No slot accepts signup");
                self.events.push(RosterEvent::Waitlisted {
                    raid_id,
                    signup_id,
                    character_id,
                });
                false
            }
        }
    }

    /// Offer every unplaced signup a slot, earliest signup first
    ///
    /// Returns how many signups were placed.
    pub fn add_waiting_list(&mut self) -> usize {
        let pending = in_signup_order(self.raid.unplaced_signups());
        let placed = pending
            .into_iter()
            .filter(|&signup_id| self.place_character(signup_id))
            .count();
        debug!(raid_id = %self.raid.id, placed, "Waiting list backfilled");
        placed
    }

    /// Re-derive placements for every signup made at or after `since`
    ///
    /// All affected signups give up their slots first, then are placed
    /// again in signup order, so an earlier signup always gets the first
    /// pick of the slots freed up.
    pub fn resignup_from(&mut self, since: DateTime<Utc>) {
        let affected = in_signup_order(
            self.raid
                .signups
                .iter()
                .filter(|signup| signup.created_at >= since)
                .collect(),
        );

        for &signup_id in &affected {
            self.vacate(signup_id, VacateReason::Resettled);
        }
        for &signup_id in &affected {
            self.place_character(signup_id);
        }
        debug!(raid_id = %self.raid.id, resettled = affected.len(), %since, "Roster re-derived");
    }

    /// Withdraw a character from the raid
    ///
    /// Returns `false` if the character never signed up. Unless the raid is
    /// finalized, everyone who signed up at or after the removed signup is
    /// re-settled.
    pub fn remove_character(&mut self, character_id: Snowflake) -> bool {
        let Some(signup) = self.raid.signup_for(character_id) else {
            return false;
        };
        let (signup_id, since) = (signup.id, signup.date());

        self.vacate(signup_id, VacateReason::Withdrawn);
        self.raid.remove_signup(signup_id);
        self.raid.touch();
        self.events.push(RosterEvent::SignupRemoved {
            raid_id: self.raid.id,
            signup_id,
            character_id,
        });

        if self.raid.is_locked() {
            debug!(raid_id = %self.raid.id, %character_id, "Raid finalized, roster left as is");
        } else {
            self.resignup_from(since);
        }
        true
    }

    /// Change the roles a signup is willing to play
    ///
    /// The roster is re-derived from that signup's date unless the raid is
    /// finalized.
    pub fn select_roles(&mut self, signup_id: Snowflake, roles: Roles) -> Result<(), DomainError> {
        let signup = self
            .raid
            .signup_mut(signup_id)
            .ok_or(DomainError::SignupNotFound(signup_id))?;
        signup.roles = roles;
        let since = signup.date();
        self.raid.touch();

        if !self.raid.is_locked() {
            self.resignup_from(since);
        }
        Ok(())
    }

    pub(super) fn vacate(&mut self, signup_id: Snowflake, reason: VacateReason) {
        if let Some(slot_id) = self.raid.vacate(signup_id) {
            self.events.push(RosterEvent::Vacated {
                raid_id: self.raid.id,
                signup_id,
                slot_id,
                reason,
            });
        }
    }
}

/// Signup IDs sorted by signup date; the sort is stable so ties keep creation order
fn in_signup_order(mut signups: Vec<&Signup>) -> Vec<Snowflake> {
    signups.sort_by_key(|signup| signup.created_at);
    signups.into_iter().map(|signup| signup.id).collect()
}
