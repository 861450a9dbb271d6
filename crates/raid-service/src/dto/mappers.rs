//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use raid_core::entities::{Character, Instance, Loot, Raid, Signup, Slot, Template, TemplateSlot};
use raid_core::ClassId;

use super::responses::{
    CharacterResponse, InstanceResponse, LootResponse, RaidResponse, RaidSummaryResponse,
    SignupResponse, SlotResponse, TemplateResponse, TemplateSlotResponse, WaitingGroupResponse,
};

fn class_ids(classes: &[ClassId]) -> Vec<u16> {
    classes.iter().map(|class| class.into_inner()).collect()
}

// ============================================================================
// Character / Signup Mappers
// ============================================================================

impl From<&Character> for CharacterResponse {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id.to_string(),
            account_id: character.account_id.to_string(),
            name: character.name.clone(),
            class_id: character.class_id.into_inner(),
            is_main: character.is_main,
        }
    }
}

impl From<Character> for CharacterResponse {
    fn from(character: Character) -> Self {
        Self::from(&character)
    }
}

impl From<&Signup> for SignupResponse {
    fn from(signup: &Signup) -> Self {
        Self {
            id: signup.id.to_string(),
            character_id: signup.character_id().to_string(),
            character_name: signup.character.name.clone(),
            account_id: signup.account_id().to_string(),
            roles: signup.roles,
            signed_up_at: signup.created_at,
        }
    }
}

// ============================================================================
// Raid Mappers
// ============================================================================

/// A raid together with what it is rendered against
pub struct RaidView<'a> {
    pub raid: &'a Raid,
    pub now: DateTime<Utc>,
    pub uid_domain: &'a str,
    pub group_size: usize,
}

impl RaidView<'_> {
    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    fn slot(&self, slot: &Slot) -> SlotResponse {
        SlotResponse {
            id: slot.id.to_string(),
            position: slot.position,
            classes: class_ids(&slot.spec.classes),
            roles: slot.spec.roles,
            slot_type: slot.spec.slot_type,
            closed: slot.spec.closed,
            open: slot.is_open(),
            occupant: self.raid.occupant(slot).map(SignupResponse::from),
        }
    }
}

impl From<RaidView<'_>> for RaidResponse {
    fn from(view: RaidView<'_>) -> Self {
        let raid = view.raid;

        let waiting_list = raid
            .waiting_list_by_account()
            .into_iter()
            .map(|run| WaitingGroupResponse {
                account_id: run[0].account_id().to_string(),
                signups: run.into_iter().map(SignupResponse::from).collect(),
            })
            .collect();

        Self {
            id: raid.id.to_string(),
            account_id: raid.account_id.to_string(),
            instance_id: raid.instance_id.map(|id| id.to_string()),
            name: raid.name.clone(),
            date: raid.date,
            word_date: raid.word_date(view.today()).to_string(),
            min_level: raid.min_level,
            max_level: raid.max_level,
            finalized: raid.finalized,
            started: raid.started(view.now),
            uid: raid.uid(view.uid_domain),
            number_of_slots: raid.number_of_slots(),
            slots: raid.slots.iter().map(|slot| view.slot(slot)).collect(),
            groups: raid
                .groups(view.group_size)
                .map(|group| group.iter().map(|slot| slot.position).collect())
                .collect(),
            confirmed: raid.confirmed_characters().map(CharacterResponse::from).collect(),
            waiting_list,
            created_at: raid.created_at,
            updated_at: raid.updated_at,
        }
    }
}

impl From<RaidView<'_>> for RaidSummaryResponse {
    fn from(view: RaidView<'_>) -> Self {
        let raid = view.raid;
        Self {
            id: raid.id.to_string(),
            name: raid.name.clone(),
            date: raid.date,
            word_date: raid.word_date(view.today()).to_string(),
            finalized: raid.finalized,
            number_of_slots: raid.number_of_slots(),
            confirmed_count: raid.confirmed_characters().count(),
            waiting_count: raid.waiting_list().len(),
        }
    }
}

// ============================================================================
// Template Mappers
// ============================================================================

impl From<&TemplateSlot> for TemplateSlotResponse {
    fn from(slot: &TemplateSlot) -> Self {
        Self {
            id: slot.id.to_string(),
            classes: class_ids(&slot.spec.classes),
            roles: slot.spec.roles,
            slot_type: slot.spec.slot_type,
            closed: slot.spec.closed,
        }
    }
}

impl From<&Template> for TemplateResponse {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id.to_string(),
            name: template.name.clone(),
            slots: template.slots.iter().map(TemplateSlotResponse::from).collect(),
            created_at: template.created_at,
            updated_at: template.updated_at,
        }
    }
}

impl From<Template> for TemplateResponse {
    fn from(template: Template) -> Self {
        Self::from(&template)
    }
}

// ============================================================================
// Instance / Loot Mappers
// ============================================================================

impl From<&Instance> for InstanceResponse {
    fn from(instance: &Instance) -> Self {
        Self {
            id: instance.id.to_string(),
            name: instance.name.clone(),
            min_level: instance.min_level,
            max_level: instance.max_level,
        }
    }
}

impl From<&Loot> for LootResponse {
    fn from(loot: &Loot) -> Self {
        Self {
            id: loot.id.to_string(),
            raid_id: loot.raid_id.to_string(),
            character_id: loot.character_id.to_string(),
            item: loot.item.clone(),
            looted_at: loot.looted_at,
        }
    }
}
