//! Service context - dependency container for services
//!
//! Holds all repositories, the ID generator, settings, the per-raid locks
//! and the roster event channel.

use std::sync::Arc;

use dashmap::DashMap;
use raid_common::{AppConfig, CalendarConfig, RosterConfig};
use raid_core::traits::{
    CharacterRepository, InstanceRepository, LootRepository, RaidRepository, TemplateRepository,
};
use raid_core::{Raid, RosterEvent, Snowflake, SnowflakeGenerator};
use raid_store::MemoryStore;
use tokio::sync::{broadcast, Mutex, OwnedMutexGuard};
use tracing::debug;

use super::error::{ServiceError, ServiceResult};

/// Capacity of the roster event channel; slow subscribers skip ahead
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories
/// - Snowflake generator for ID generation
/// - Roster and calendar settings
/// - Per-raid locks serializing roster mutations
/// - A broadcast channel of roster events
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    raid_repo: Arc<dyn RaidRepository>,
    template_repo: Arc<dyn TemplateRepository>,
    character_repo: Arc<dyn CharacterRepository>,
    instance_repo: Arc<dyn InstanceRepository>,
    loot_repo: Arc<dyn LootRepository>,

    // Settings
    config: Arc<AppConfig>,

    // Concurrency
    raid_locks: Arc<DashMap<Snowflake, Arc<Mutex<()>>>>,

    // Events
    events: broadcast::Sender<RosterEvent>,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        raid_repo: Arc<dyn RaidRepository>,
        template_repo: Arc<dyn TemplateRepository>,
        character_repo: Arc<dyn CharacterRepository>,
        instance_repo: Arc<dyn InstanceRepository>,
        loot_repo: Arc<dyn LootRepository>,
        config: Arc<AppConfig>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            raid_repo,
            template_repo,
            character_repo,
            instance_repo,
            loot_repo,
            config,
            raid_locks: Arc::new(DashMap::new()),
            events,
            snowflake_generator,
        }
    }

    /// Context backed by a fresh in-process store
    pub fn in_memory(config: AppConfig) -> Self {
        let generator = SnowflakeGenerator::new(config.snowflake.worker_id);
        Self::from_store(MemoryStore::new(), Arc::new(config), Arc::new(generator))
    }

    /// Context backed by an existing in-process store
    pub fn from_store(
        store: MemoryStore,
        config: Arc<AppConfig>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self::new(
            Arc::new(store.raids),
            Arc::new(store.templates),
            Arc::new(store.characters),
            Arc::new(store.instances),
            Arc::new(store.loot),
            config,
            snowflake_generator,
        )
    }

    // === Repositories ===

    /// Get the raid repository
    pub fn raid_repo(&self) -> &dyn RaidRepository {
        self.raid_repo.as_ref()
    }

    /// Get the template repository
    pub fn template_repo(&self) -> &dyn TemplateRepository {
        self.template_repo.as_ref()
    }

    /// Get the character repository
    pub fn character_repo(&self) -> &dyn CharacterRepository {
        self.character_repo.as_ref()
    }

    /// Get the instance repository
    pub fn instance_repo(&self) -> &dyn InstanceRepository {
        self.instance_repo.as_ref()
    }

    /// Get the loot repository
    pub fn loot_repo(&self) -> &dyn LootRepository {
        self.loot_repo.as_ref()
    }

    // === Settings ===

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn roster_config(&self) -> &RosterConfig {
        &self.config.roster
    }

    pub fn calendar_config(&self) -> &CalendarConfig {
        &self.config.calendar
    }

    // === Services ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    // === Raid locks ===

    /// Acquire the lock serializing roster mutations of one raid
    ///
    /// Hold the guard across load, mutate and save. Different raids never
    /// contend.
    pub async fn lock_raid(&self, raid_id: Snowflake) -> OwnedMutexGuard<()> {
        let lock = self.raid_locks.entry(raid_id).or_default().clone();
        lock.lock_owned().await
    }

    /// Lock a raid and load it
    ///
    /// An unknown raid leaves no lock behind.
    pub(crate) async fn lock_and_load(
        &self,
        raid_id: Snowflake,
    ) -> ServiceResult<(OwnedMutexGuard<()>, Raid)> {
        let guard = self.lock_raid(raid_id).await;
        match self.load_raid(raid_id).await {
            Ok(raid) => Ok((guard, raid)),
            Err(err) => {
                drop(guard);
                self.forget_raid_lock(raid_id);
                Err(err)
            }
        }
    }

    /// Drop the lock of a raid nobody else is holding or waiting on
    pub(crate) fn forget_raid_lock(&self, raid_id: Snowflake) {
        self.raid_locks
            .remove_if(&raid_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Load a raid or fail with not found
    pub(crate) async fn load_raid(&self, raid_id: Snowflake) -> ServiceResult<Raid> {
        self.raid_repo
            .find_by_id(raid_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Raid", raid_id.to_string()))
    }

    // === Events ===

    /// Subscribe to roster events of every raid
    pub fn subscribe(&self) -> broadcast::Receiver<RosterEvent> {
        self.events.subscribe()
    }

    /// Publish roster events after the raid that produced them was saved
    pub(crate) fn publish(&self, events: Vec<RosterEvent>) {
        if events.is_empty() {
            return;
        }
        let count = events.len();
        for event in events {
            // No subscribers is not an error
            let _ = self.events.send(event);
        }
        debug!(count, "Roster events published");
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("config", &self.config)
            .field("locked_raids", &self.raid_locks.len())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    raid_repo: Option<Arc<dyn RaidRepository>>,
    template_repo: Option<Arc<dyn TemplateRepository>>,
    character_repo: Option<Arc<dyn CharacterRepository>>,
    instance_repo: Option<Arc<dyn InstanceRepository>>,
    loot_repo: Option<Arc<dyn LootRepository>>,
    config: Option<Arc<AppConfig>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            raid_repo: None,
            template_repo: None,
            character_repo: None,
            instance_repo: None,
            loot_repo: None,
            config: None,
            snowflake_generator: None,
        }
    }

    /// Use every repository of an in-process store
    pub fn store(self, store: MemoryStore) -> Self {
        self.raid_repo(Arc::new(store.raids))
            .template_repo(Arc::new(store.templates))
            .character_repo(Arc::new(store.characters))
            .instance_repo(Arc::new(store.instances))
            .loot_repo(Arc::new(store.loot))
    }

    pub fn raid_repo(mut self, repo: Arc<dyn RaidRepository>) -> Self {
        self.raid_repo = Some(repo);
        self
    }

    pub fn template_repo(mut self, repo: Arc<dyn TemplateRepository>) -> Self {
        self.template_repo = Some(repo);
        self
    }

    pub fn character_repo(mut self, repo: Arc<dyn CharacterRepository>) -> Self {
        self.character_repo = Some(repo);
        self
    }

    pub fn instance_repo(mut self, repo: Arc<dyn InstanceRepository>) -> Self {
        self.instance_repo = Some(repo);
        self
    }

    pub fn loot_repo(mut self, repo: Arc<dyn LootRepository>) -> Self {
        self.loot_repo = Some(repo);
        self
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(Arc::new(config));
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// Settings default to `AppConfig::default()` and the generator to one
    /// using the configured worker id.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let config = self.config.unwrap_or_default();
        let snowflake_generator = self
            .snowflake_generator
            .unwrap_or_else(|| Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)));

        Ok(ServiceContext::new(
            self.raid_repo.ok_or_else(|| ServiceError::validation("raid_repo is required"))?,
            self.template_repo.ok_or_else(|| ServiceError::validation("template_repo is required"))?,
            self.character_repo.ok_or_else(|| ServiceError::validation("character_repo is required"))?,
            self.instance_repo.ok_or_else(|| ServiceError::validation("instance_repo is required"))?,
            self.loot_repo.ok_or_else(|| ServiceError::validation("loot_repo is required"))?,
            config,
            snowflake_generator,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
