//! Character service
//!
//! Registers the characters accounts sign raids up with.

use raid_core::entities::Character;
use raid_core::{ClassId, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CharacterResponse, CreateCharacterRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Character service
pub struct CharacterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CharacterService<'a> {
    /// Create a new CharacterService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request))]
    pub async fn create_character(
        &self,
        account_id: Snowflake,
        request: CreateCharacterRequest,
    ) -> ServiceResult<CharacterResponse> {
        request.validate()?;

        let id = self.ctx.generate_id();
        let class_id = ClassId::new(request.class_id);
        let character = if request.is_main {
            Character::new(id, account_id, request.name, class_id)
        } else {
            Character::alt(id, account_id, request.name, class_id)
        };
        self.ctx.character_repo().create(&character).await?;

        info!(character_id = %id, account_id = %account_id, "Character created");

        Ok(CharacterResponse::from(character))
    }

    /// Characters of an account, mains first
    #[instrument(skip(self))]
    pub async fn list_for_account(&self, account_id: Snowflake) -> ServiceResult<Vec<CharacterResponse>> {
        let characters = self.ctx.character_repo().find_by_account(account_id).await?;
        Ok(characters.iter().map(CharacterResponse::from).collect())
    }
}
