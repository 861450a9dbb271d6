//! Raid entity - a scheduled event with a fixed roster structure
//!
//! The raid owns its slots and signups. Everything derived from them
//! (confirmed characters, waiting list, groups) is recomputed by scanning
//! on each call and never cached, so it cannot drift from the occupant
//! references it is derived from.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Character, Signup, Slot};
use crate::calendar::{word_date, WordDate};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raid {
    pub id: Snowflake,
    /// Organizer account
    pub account_id: Snowflake,
    pub instance_id: Option<Snowflake>,
    pub name: String,
    pub date: DateTime<Utc>,
    pub min_level: Option<u16>,
    pub max_level: Option<u16>,
    /// Locked roster: removals no longer re-settle later signups
    pub finalized: bool,
    /// Ordered by position, positions are contiguous from 0
    pub slots: Vec<Slot>,
    /// Kept in creation order
    pub signups: Vec<Signup>,
    /// Requested slot count, reconciled before the raid is saved
    #[serde(skip)]
    desired_slots: Option<usize>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Raid {
    pub fn new(id: Snowflake, account_id: Snowflake, name: String, date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id,
            account_id,
            instance_id: None,
            name,
            date,
            min_level: None,
            max_level: None,
            finalized: false,
            slots: Vec::new(),
            signups: Vec::new(),
            desired_slots: None,
            created_at: now,
            updated_at: now,
        }
    }

    // === Attributes ===

    #[inline]
    pub fn is_organizer(&self, account_id: Snowflake) -> bool {
        self.account_id == account_id
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.finalized
    }

    /// Flip the finalized flag, returning the new value
    pub fn toggle_finalized(&mut self) -> bool {
        self.finalized = !self.finalized;
        self.touch();
        self.finalized
    }

    pub fn started(&self, now: DateTime<Utc>) -> bool {
        now > self.date
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.touch();
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
        self.touch();
    }

    pub fn set_levels(&mut self, min_level: Option<u16>, max_level: Option<u16>) -> Result<(), DomainError> {
        if let (Some(min), Some(max)) = (min_level, max_level) {
            if min > max {
                return Err(DomainError::InvalidLevelRange { min, max });
            }
        }
        self.min_level = min_level;
        self.max_level = max_level;
        self.touch();
        Ok(())
    }

    /// Actual number of slot rows
    #[inline]
    pub fn number_of_slots(&self) -> usize {
        self.slots.len()
    }

    /// Record the desired slot count; nothing changes until the slots are reconciled
    pub fn set_number_of_slots(&mut self, count: usize) {
        self.desired_slots = Some(count);
    }

    /// Take the pending desired slot count, if any
    pub(crate) fn take_desired_slots(&mut self) -> Option<usize> {
        self.desired_slots.take()
    }

    pub fn desired_slots(&self) -> Option<usize> {
        self.desired_slots
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // === Lookups ===

    pub fn signup(&self, signup_id: Snowflake) -> Option<&Signup> {
        self.signups.iter().find(|s| s.id == signup_id)
    }

    pub(crate) fn signup_mut(&mut self, signup_id: Snowflake) -> Option<&mut Signup> {
        self.signups.iter_mut().find(|s| s.id == signup_id)
    }

    /// Signup of a character, if it signed up
    pub fn signup_for(&self, character_id: Snowflake) -> Option<&Signup> {
        self.signups.iter().find(|s| s.character_id() == character_id)
    }

    /// Slot currently held by a signup
    pub fn slot_held_by(&self, signup_id: Snowflake) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.is_held_by(signup_id))
    }

    /// Slot currently held by a character
    pub fn slot_of(&self, character_id: Snowflake) -> Option<&Slot> {
        self.signup_for(character_id)
            .and_then(|signup| self.slot_held_by(signup.id))
    }

    /// Signup occupying a slot
    pub fn occupant(&self, slot: &Slot) -> Option<&Signup> {
        slot.signup_id.and_then(|id| self.signup(id))
    }

    #[inline]
    pub fn is_placed(&self, signup_id: Snowflake) -> bool {
        self.slot_held_by(signup_id).is_some()
    }

    pub fn has_open_slot(&self) -> bool {
        self.slots.iter().any(Slot::is_open)
    }

    // === Signup lifecycle ===

    /// Append a signup (unplaced)
    pub fn add_signup(&mut self, signup: Signup) -> Result<(), DomainError> {
        if self.signup_for(signup.character_id()).is_some() {
            return Err(DomainError::AlreadySignedUp(signup.character_id()));
        }
        self.signups.push(signup);
        Ok(())
    }

    /// Clear the slot held by a signup, returning that slot's ID
    pub(crate) fn vacate(&mut self, signup_id: Snowflake) -> Option<Snowflake> {
        let slot = self.slots.iter_mut().find(|slot| slot.is_held_by(signup_id))?;
        slot.signup_id = None;
        Some(slot.id)
    }

    /// Destroy a signup, opening its slot
    pub(crate) fn remove_signup(&mut self, signup_id: Snowflake) -> Option<Signup> {
        self.vacate(signup_id);
        let index = self.signups.iter().position(|s| s.id == signup_id)?;
        Some(self.signups.remove(index))
    }

    // === Derived views ===

    /// Characters holding a slot, in slot order
    pub fn confirmed_characters(&self) -> impl Iterator<Item = &Character> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| self.occupant(slot))
            .map(|signup| &signup.character)
    }

    /// Accounts of the placed characters, in slot order
    pub fn accounts(&self) -> Vec<Snowflake> {
        self.confirmed_characters().map(|c| c.account_id).collect()
    }

    pub fn character_in_raid(&self, character_id: Snowflake) -> bool {
        self.confirmed_characters().any(|c| c.id == character_id)
    }

    /// Signups whose account has no placed character
    ///
    /// Exclusion is per account: once any character of an account holds a
    /// slot, that account's other signups are not listed even though they
    /// are unplaced.
    pub fn waiting_list(&self) -> Vec<&Signup> {
        let placed: HashSet<Snowflake> = self.accounts().into_iter().collect();
        self.signups
            .iter()
            .filter(|signup| !placed.contains(&signup.account_id()))
            .collect()
    }

    /// Waiting list split into adjacent runs of the same account
    pub fn waiting_list_by_account(&self) -> Vec<Vec<&Signup>> {
        let mut runs: Vec<Vec<&Signup>> = Vec::new();
        for signup in self.waiting_list() {
            match runs.last_mut() {
                Some(run) if run[0].account_id() == signup.account_id() => run.push(signup),
                _ => runs.push(vec![signup]),
            }
        }
        runs
    }

    /// Signups holding no slot, by signup identity, in creation order
    pub fn unplaced_signups(&self) -> Vec<&Signup> {
        let placed: HashSet<Snowflake> = self.slots.iter().filter_map(|s| s.signup_id).collect();
        self.signups
            .iter()
            .filter(|signup| !placed.contains(&signup.id))
            .collect()
    }

    pub fn signups_from(&self, account_id: Snowflake) -> Vec<&Signup> {
        self.signups
            .iter()
            .filter(|signup| signup.character.belongs_to(account_id))
            .collect()
    }

    /// Slots chunked into parties of `size`
    pub fn groups(&self, size: usize) -> std::slice::Chunks<'_, Slot> {
        self.slots.chunks(size.max(1))
    }

    /// Calendar UID for iCal export
    pub fn uid(&self, domain: &str) -> String {
        format!("raid_{}@{}", self.id, domain)
    }

    /// Coarse label for the raid date relative to `today`
    pub fn word_date(&self, today: NaiveDate) -> WordDate {
        word_date(self.date.date_naive(), today)
    }
}

impl std::fmt::Display for Raid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
