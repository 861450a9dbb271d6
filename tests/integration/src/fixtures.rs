//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use raid_core::SlotType;
use raid_service::dto::{CreateRaidRequest, TemplateRequest, TemplateSlotRequest};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Class ids used across the tests
pub mod classes {
    pub const WARRIOR: u16 = 1;
    pub const PRIEST: u16 = 5;
    pub const MAGE: u16 = 8;
}

/// A raid named uniquely with `slots` unconstrained slots, tomorrow
pub fn raid_request(slots: usize) -> CreateRaidRequest {
    CreateRaidRequest {
        name: format!("Raid {}", unique_suffix()),
        number_of_slots: Some(slots),
        ..Default::default()
    }
}

/// A raid scheduled at `date`
pub fn raid_request_at(date: DateTime<Utc>, slots: usize) -> CreateRaidRequest {
    CreateRaidRequest {
        caldate: Some(date.format("%Y-%m-%d").to_string()),
        caltime: Some(date.format("%H:%M").to_string()),
        ..raid_request(slots)
    }
}

/// Template slot accepting `roles` from the given classes (empty = any)
pub fn template_slot(roles: &[&str], classes: &[u16]) -> TemplateSlotRequest {
    TemplateSlotRequest {
        classes: classes.to_vec(),
        roles: roles.iter().map(ToString::to_string).collect(),
        slot_type: SlotType::Any,
        closed: false,
    }
}

/// Template slot accepting every role from any class
pub fn open_slot() -> TemplateSlotRequest {
    template_slot(&["tank", "healer", "melee", "ranged", "support"], &[])
}

pub fn template_request(slots: Vec<TemplateSlotRequest>) -> TemplateRequest {
    TemplateRequest {
        name: format!("Template {}", unique_suffix()),
        slots,
    }
}
