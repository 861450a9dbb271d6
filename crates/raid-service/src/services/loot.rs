//! Loot service
//!
//! Loot records pin a raid: once any exist, the raid can no longer be deleted.

use raid_core::entities::Loot;
use raid_core::Snowflake;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{LootResponse, RecordLootRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Loot service
pub struct LootService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LootService<'a> {
    /// Create a new LootService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request))]
    pub async fn record_loot(&self, raid_id: Snowflake, request: RecordLootRequest) -> ServiceResult<LootResponse> {
        request.validate()?;
        // The raid must exist
        self.ctx.load_raid(raid_id).await?;

        let loot = Loot::new(self.ctx.generate_id(), raid_id, request.character_id, request.item);
        self.ctx.loot_repo().create(&loot).await?;

        info!(raid_id = %raid_id, character_id = %loot.character_id, "Loot recorded");

        Ok(LootResponse::from(&loot))
    }
}
