//! Test helpers for integration tests
//!
//! `TestRig` wraps a service context over a fresh in-process store and
//! offers shortcuts for the steps most tests repeat.

use std::collections::HashSet;

use anyhow::{ensure, Context, Result};
use raid_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use raid_core::Snowflake;
use raid_service::dto::{
    CreateCharacterRequest, CreateRaidRequest, RaidResponse, SignupOutcomeResponse, SignupRequest,
    TemplateRequest,
};
use raid_service::{RaidService, ServiceContext, SignupService, TemplateService};

use crate::fixtures::{raid_request, unique_suffix};

/// Isolated service stack for one test
#[derive(Clone)]
pub struct TestRig {
    pub ctx: ServiceContext,
}

impl TestRig {
    /// Start a rig with default settings
    pub fn start() -> Self {
        Self::start_with_config(AppConfig::default())
    }

    pub fn start_with_config(config: AppConfig) -> Self {
        // Tests share one process; only the first call installs the subscriber
        let _ = try_init_tracing_with_config(TracingConfig::default());
        Self {
            ctx: ServiceContext::in_memory(config),
        }
    }

    pub fn raids(&self) -> RaidService<'_> {
        RaidService::new(&self.ctx)
    }

    pub fn signups(&self) -> SignupService<'_> {
        SignupService::new(&self.ctx)
    }

    pub fn templates(&self) -> TemplateService<'_> {
        TemplateService::new(&self.ctx)
    }

    /// Create a raid with `slots` unconstrained slots
    pub async fn raid_with_slots(&self, slots: usize) -> Result<Snowflake> {
        self.create_raid(raid_request(slots)).await
    }

    pub async fn create_raid(&self, request: CreateRaidRequest) -> Result<Snowflake> {
        let raid = self.raids().create_raid(Snowflake::new(1), request).await?;
        Ok(Snowflake::parse(&raid.id)?)
    }

    pub async fn create_template(&self, request: TemplateRequest) -> Result<Snowflake> {
        let template = self.templates().create_template(request).await?;
        Ok(Snowflake::parse(&template.id)?)
    }

    /// Register a main character on `account`
    pub async fn character(&self, account: i64, class_id: u16) -> Result<Snowflake> {
        self.character_named(account, &format!("Hero{}", unique_suffix()), class_id, true)
            .await
    }

    pub async fn character_named(
        &self,
        account: i64,
        name: &str,
        class_id: u16,
        is_main: bool,
    ) -> Result<Snowflake> {
        let character = raid_service::CharacterService::new(&self.ctx)
            .create_character(
                Snowflake::new(account),
                CreateCharacterRequest {
                    name: name.to_string(),
                    class_id,
                    is_main,
                },
            )
            .await?;
        Ok(Snowflake::parse(&character.id)?)
    }

    /// Sign a character up with no role preference
    pub async fn sign_up(
        &self,
        raid_id: Snowflake,
        character_id: Snowflake,
    ) -> Result<SignupOutcomeResponse> {
        self.sign_up_as(raid_id, character_id, &[]).await
    }

    pub async fn sign_up_as(
        &self,
        raid_id: Snowflake,
        character_id: Snowflake,
        roles: &[&str],
    ) -> Result<SignupOutcomeResponse> {
        let request = SignupRequest {
            character_id,
            roles: roles.iter().map(ToString::to_string).collect(),
        };
        Ok(self.signups().sign_up(raid_id, request).await?)
    }

    pub async fn raid(&self, raid_id: Snowflake) -> Result<RaidResponse> {
        Ok(self.raids().get_raid(raid_id).await?)
    }
}

/// Occupant character name per slot position
pub fn occupants(raid: &RaidResponse) -> Vec<Option<&str>> {
    raid.slots
        .iter()
        .map(|slot| slot.occupant.as_ref().map(|o| o.character_name.as_str()))
        .collect()
}

/// Check the roster holds each signup at most once and only known signups
pub fn assert_single_occupancy(raid: &RaidResponse) -> Result<()> {
    let mut seen = HashSet::new();
    for slot in &raid.slots {
        let Some(occupant) = &slot.occupant else {
            continue;
        };
        ensure!(
            seen.insert(occupant.id.clone()),
            "signup {} holds more than one slot",
            occupant.id
        );
    }
    ensure!(
        seen.len() == raid.confirmed.len(),
        "confirmed list disagrees with slot occupants"
    );
    Ok(())
}

/// Character id of a slot's occupant, parsed back into a snowflake
pub fn occupant_id(raid: &RaidResponse, position: usize) -> Result<Option<Snowflake>> {
    let slot = raid
        .slots
        .get(position)
        .with_context(|| format!("no slot at position {position}"))?;
    slot.occupant
        .as_ref()
        .map(|o| Snowflake::parse(&o.character_id))
        .transpose()
        .map_err(Into::into)
}
