//! Data transfer objects for roster requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for inputs
//! - Response DTOs for serializing outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCharacterRequest, CreateInstanceRequest, CreateRaidRequest, RecordLootRequest,
    SelectRolesRequest, SignupRequest, TemplateRequest, TemplateSlotRequest, UpdateRaidRequest,
};

pub use responses::{
    CharacterResponse, InstanceResponse, LootResponse, RaidDefaultsResponse, RaidListResponse,
    RaidResponse, RaidSummaryResponse, SignupOutcomeResponse, SignupResponse, SlotResponse,
    TemplateResponse, TemplateSlotResponse, WaitingGroupResponse,
};

pub use mappers::RaidView;
