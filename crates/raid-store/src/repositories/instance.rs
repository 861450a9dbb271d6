//! In-memory implementation of InstanceRepository

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::instrument;

use raid_core::entities::Instance;
use raid_core::traits::{InstanceRepository, RepoResult};
use raid_core::value_objects::Snowflake;

use super::error::duplicate_id;

#[derive(Clone, Default)]
pub struct MemInstanceRepository {
    instances: Arc<DashMap<Snowflake, Instance>>,
}

impl MemInstanceRepository {
    /// Create an empty MemInstanceRepository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InstanceRepository for MemInstanceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Instance>> {
        Ok(self.instances.get(&id).map(|instance| instance.value().clone()))
    }

    #[instrument(skip(self, instance), fields(instance_id = %instance.id))]
    async fn create(&self, instance: &Instance) -> RepoResult<()> {
        match self.instances.entry(instance.id) {
            Entry::Occupied(_) => Err(duplicate_id(instance.id)),
            Entry::Vacant(entry) => {
                entry.insert(instance.clone());
                Ok(())
            }
        }
    }
}
