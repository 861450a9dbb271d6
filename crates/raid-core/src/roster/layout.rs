//! Slot layout changes: resizing and template application
//!
//! Both may destroy occupied slots or evict occupants. The affected
//! signups are not an error; they simply fall back to the waiting list.
//! Neither operation backfills on its own; callers run
//! [`RosterResolver::add_waiting_list`] afterwards when they want that.

use tracing::debug;

use super::RosterResolver;
use crate::entities::{Slot, SlotSpec, Template};
use crate::events::{RosterEvent, VacateReason};
use crate::value_objects::{Snowflake, SnowflakeGenerator};

impl RosterResolver<'_> {
    /// Grow or shrink the roster to `count` slots
    ///
    /// Shrinking destroys slots from the tail. Growing appends
    /// unconstrained slots. Returns the signups that lost their slot.
    pub fn resize(&mut self, count: usize, ids: &SnowflakeGenerator) -> Vec<Snowflake> {
        let displaced = self.truncate(count);
        let raid_id = self.raid.id;

        for position in self.raid.slots.len()..count {
            let slot = Slot::new(
                ids.generate(),
                raid_id,
                position as u32,
                SlotSpec::unconstrained(),
            );
            self.events.push(RosterEvent::SlotAdded {
                raid_id,
                slot_id: slot.id,
                position: slot.position,
            });
            self.raid.slots.push(slot);
        }

        debug!(%raid_id, slots = count, displaced = displaced.len(), "Roster resized");
        displaced
    }

    /// Apply a pending `set_number_of_slots` request, if there is one
    pub fn reconcile_slot_count(&mut self, ids: &SnowflakeGenerator) -> Vec<Snowflake> {
        match self.raid.take_desired_slots() {
            Some(count) if count != self.raid.slots.len() => self.resize(count, ids),
            _ => Vec::new(),
        }
    }

    /// Reshape the roster after a template
    ///
    /// Slots past the template's length are destroyed. At every remaining
    /// index whose constraints differ from the template's, the occupant is
    /// kept only if the new constraints still accept it; the slot then
    /// stops referring to any template. Missing indices are created from
    /// the template. Returns the signups that lost their slot.
    pub fn apply_template(&mut self, template: &Template, ids: &SnowflakeGenerator) -> Vec<Snowflake> {
        let mut displaced = self.truncate(template.len());
        let raid_id = self.raid.id;
        let existing = self.raid.slots.len();

        for (index, template_slot) in template.slots.iter().enumerate() {
            let spec = &template_slot.spec;

            if index >= existing {
                let slot = Slot::new(ids.generate(), raid_id, index as u32, spec.clone());
                self.events.push(RosterEvent::SlotAdded {
                    raid_id,
                    slot_id: slot.id,
                    position: slot.position,
                });
                self.raid.slots.push(slot);
                continue;
            }

            if self.raid.slots[index].spec == *spec {
                continue;
            }

            let evicted = self.raid.slots[index].signup_id.filter(|&signup_id| {
                !self
                    .raid
                    .signup(signup_id)
                    .is_some_and(|signup| !spec.closed && spec.accepts(signup))
            });

            let slot = &mut self.raid.slots[index];
            slot.spec = spec.clone();
            slot.template_slot_id = None;

            if let Some(signup_id) = evicted {
                slot.signup_id = None;
                self.events.push(RosterEvent::Vacated {
                    raid_id,
                    signup_id,
                    slot_id: slot.id,
                    reason: VacateReason::Evicted,
                });
                displaced.push(signup_id);
            }
        }

        self.raid.touch();
        debug!(
            %raid_id,
            template_id = %template.id,
            slots = template.len(),
            displaced = displaced.len(),
            "Template applied"
        );
        displaced
    }

    // Destroy every slot at or past `count`, returning the displaced signups
    fn truncate(&mut self, count: usize) -> Vec<Snowflake> {
        if count >= self.raid.slots.len() {
            return Vec::new();
        }

        let raid_id = self.raid.id;
        let removed = self.raid.slots.split_off(count);
        let mut displaced = Vec::new();

        // Highest position first
        for slot in removed.into_iter().rev() {
            if let Some(signup_id) = slot.signup_id {
                self.events.push(RosterEvent::Vacated {
                    raid_id,
                    signup_id,
                    slot_id: slot.id,
                    reason: VacateReason::SlotRemoved,
                });
                displaced.push(signup_id);
            }
            self.events.push(RosterEvent::SlotRemoved {
                raid_id,
                slot_id: slot.id,
                position: slot.position,
            });
        }

        self.raid.touch();
        displaced
    }
}
