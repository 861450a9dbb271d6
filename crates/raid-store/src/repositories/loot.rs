//! In-memory implementation of LootRepository

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::instrument;

use raid_core::entities::Loot;
use raid_core::traits::{LootRepository, RepoResult};
use raid_core::value_objects::Snowflake;

use super::error::duplicate_id;

/// Append-only loot log
#[derive(Clone, Default)]
pub struct MemLootRepository {
    loot: Arc<RwLock<Vec<Loot>>>,
}

impl MemLootRepository {
    /// Create an empty MemLootRepository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LootRepository for MemLootRepository {
    #[instrument(skip(self))]
    async fn count_by_raid(&self, raid_id: Snowflake) -> RepoResult<u64> {
        let count = self
            .loot
            .read()
            .iter()
            .filter(|loot| loot.raid_id == raid_id)
            .count();
        Ok(count as u64)
    }

    #[instrument(skip(self, loot), fields(raid_id = %loot.raid_id))]
    async fn create(&self, loot: &Loot) -> RepoResult<()> {
        let mut log = self.loot.write();
        if log.iter().any(|existing| existing.id == loot.id) {
            return Err(duplicate_id(loot.id));
        }
        log.push(loot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_count_by_raid() {
        let repo = MemLootRepository::new();
        let raid_id = Snowflake::new(1);
        let character_id = Snowflake::new(2);

        assert_eq!(repo.count_by_raid(raid_id).await.unwrap(), 0);
        repo.create(&Loot::new(Snowflake::new(10), raid_id, character_id, "Onyxia Scale Cloak".to_string()))
            .await
            .unwrap();
        repo.create(&Loot::new(Snowflake::new(11), Snowflake::new(5), character_id, "Ring".to_string()))
            .await
            .unwrap();

        assert_eq!(repo.count_by_raid(raid_id).await.unwrap(), 1);
    }
}
