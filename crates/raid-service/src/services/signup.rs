//! Signup service
//!
//! Handles characters joining and leaving raids. Every operation loads the
//! raid, lets the roster resolver place or re-settle signups and saves the
//! raid again, all while holding that raid's lock.

use chrono::Utc;
use raid_core::entities::Signup;
use raid_core::{DomainError, Roles, RosterResolver, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{SelectRolesRequest, SignupOutcomeResponse, SignupRequest, SignupResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Signup service
pub struct SignupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SignupService<'a> {
    /// Create a new SignupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sign a character up and place it if a slot accepts it
    ///
    /// A character that fits no open slot stays on the waiting list; that
    /// is reported through `placed`, not as an error.
    #[instrument(skip(self, request), fields(character_id = %request.character_id))]
    pub async fn sign_up(
        &self,
        raid_id: Snowflake,
        request: SignupRequest,
    ) -> ServiceResult<SignupOutcomeResponse> {
        request.validate()?;
        let roles = parse_roles(&request.roles)?;

        let character = self
            .ctx
            .character_repo()
            .find_by_id(request.character_id)
            .await?
            .ok_or(DomainError::CharacterNotFound(request.character_id))?;

        let (_guard, mut raid) = self.ctx.lock_and_load(raid_id).await?;

        let signup = Signup::new(self.ctx.generate_id(), raid_id, character, roles, Utc::now());
        let signup_id = signup.id;

        let (placed, events) = {
            let mut resolver = RosterResolver::new(&mut raid);
            let placed = resolver.sign_up(signup)?;
            (placed, resolver.into_events())
        };

        self.ctx.raid_repo().save(&raid).await?;
        self.ctx.publish(events);

        let position = raid.slot_held_by(signup_id).map(|slot| slot.position);
        let signup = raid
            .signup(signup_id)
            .map(SignupResponse::from)
            .ok_or_else(|| ServiceError::internal("signup missing after save"))?;

        info!(
            raid_id = %raid_id,
            signup_id = %signup_id,
            placed,
            position = ?position,
            "Character signed up"
        );

        Ok(SignupOutcomeResponse {
            signup,
            placed,
            position,
        })
    }

    /// Withdraw a character from a raid
    ///
    /// Returns `false` when the character never signed up. Everyone who
    /// signed up after the withdrawn character is re-settled unless the raid
    /// is finalized.
    #[instrument(skip(self))]
    pub async fn withdraw(&self, raid_id: Snowflake, character_id: Snowflake) -> ServiceResult<bool> {
        let (_guard, mut raid) = self.ctx.lock_and_load(raid_id).await?;

        let (removed, events) = {
            let mut resolver = RosterResolver::new(&mut raid);
            let removed = resolver.remove_character(character_id);
            (removed, resolver.into_events())
        };

        if !removed {
            return Ok(false);
        }

        self.ctx.raid_repo().save(&raid).await?;
        self.ctx.publish(events);

        info!(
            raid_id = %raid_id,
            character_id = %character_id,
            finalized = raid.is_locked(),
            "Character withdrawn"
        );

        Ok(true)
    }

    /// Change the roles a signup is willing to play
    #[instrument(skip(self, request))]
    pub async fn select_roles(
        &self,
        raid_id: Snowflake,
        signup_id: Snowflake,
        request: SelectRolesRequest,
    ) -> ServiceResult<SignupOutcomeResponse> {
        request.validate()?;
        let roles = parse_roles(&request.roles)?;

        let (_guard, mut raid) = self.ctx.lock_and_load(raid_id).await?;

        let events = {
            let mut resolver = RosterResolver::new(&mut raid);
            resolver.select_roles(signup_id, roles)?;
            resolver.into_events()
        };

        self.ctx.raid_repo().save(&raid).await?;
        self.ctx.publish(events);

        let position = raid.slot_held_by(signup_id).map(|slot| slot.position);
        let signup = raid
            .signup(signup_id)
            .map(SignupResponse::from)
            .ok_or(DomainError::SignupNotFound(signup_id))?;

        info!(raid_id = %raid_id, signup_id = %signup_id, roles = %roles, "Roles selected");

        Ok(SignupOutcomeResponse {
            signup,
            placed: position.is_some(),
            position,
        })
    }

    /// Offer every waiting signup a slot, earliest first
    ///
    /// Returns how many signups were placed.
    #[instrument(skip(self))]
    pub async fn fill_waiting_list(&self, raid_id: Snowflake) -> ServiceResult<usize> {
        let (_guard, mut raid) = self.ctx.lock_and_load(raid_id).await?;

        let (placed, events) = {
            let mut resolver = RosterResolver::new(&mut raid);
            let placed = resolver.add_waiting_list();
            (placed, resolver.into_events())
        };

        if placed > 0 {
            self.ctx.raid_repo().save(&raid).await?;
            self.ctx.publish(events);
        }

        info!(raid_id = %raid_id, placed, "Waiting list processed");

        Ok(placed)
    }

    /// Signups of one account in a raid
    #[instrument(skip(self))]
    pub async fn signups_from(
        &self,
        raid_id: Snowflake,
        account_id: Snowflake,
    ) -> ServiceResult<Vec<SignupResponse>> {
        let raid = self.ctx.load_raid(raid_id).await?;
        Ok(raid
            .signups_from(account_id)
            .into_iter()
            .map(SignupResponse::from)
            .collect())
    }
}

fn parse_roles(names: &[String]) -> ServiceResult<Roles> {
    Roles::parse_names(names).map_err(|err| ServiceError::invalid_field("roles", err.to_string()))
}
