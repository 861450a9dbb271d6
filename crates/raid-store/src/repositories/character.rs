//! In-memory implementation of CharacterRepository

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::instrument;

use raid_core::entities::Character;
use raid_core::traits::{CharacterRepository, RepoResult};
use raid_core::value_objects::Snowflake;

use super::error::duplicate_id;

#[derive(Clone, Default)]
pub struct MemCharacterRepository {
    characters: Arc<DashMap<Snowflake, Character>>,
}

impl MemCharacterRepository {
    /// Create an empty MemCharacterRepository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterRepository for MemCharacterRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Character>> {
        Ok(self.characters.get(&id).map(|character| character.value().clone()))
    }

    #[instrument(skip(self))]
    async fn find_by_account(&self, account_id: Snowflake) -> RepoResult<Vec<Character>> {
        let mut characters: Vec<Character> = self
            .characters
            .iter()
            .filter(|entry| entry.belongs_to(account_id))
            .map(|entry| entry.value().clone())
            .collect();
        // Mains first, then by name
        characters.sort_by(|a, b| b.is_main.cmp(&a.is_main).then_with(|| a.name.cmp(&b.name)));
        Ok(characters)
    }

    #[instrument(skip(self, character), fields(character_id = %character.id))]
    async fn create(&self, character: &Character) -> RepoResult<()> {
        match self.characters.entry(character.id) {
            Entry::Occupied(_) => Err(duplicate_id(character.id)),
            Entry::Vacant(entry) => {
                entry.insert(character.clone());
                Ok(())
            }
        }
    }
}
