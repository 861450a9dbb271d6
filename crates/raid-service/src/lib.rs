//! # raid-service
//!
//! Application layer: services that validate requests, serialize roster
//! mutations per raid and run the roster resolver, plus request and
//! response DTOs.

pub mod dto;
pub mod services;

pub use services::{
    CharacterService, HistoryWindow, InstanceService, LootService, RaidService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SignupService, TemplateService,
};
