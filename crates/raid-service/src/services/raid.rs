//! Raid service
//!
//! Handles raid scheduling: creation, editing, listing, finalizing and
//! deletion. Roster reshaping caused by edits (slot count, template) runs
//! under the raid's lock together with the save.

use chrono::{DateTime, Duration, Months, Utc};
use raid_core::entities::{Raid, Template};
use raid_core::{DomainError, RosterResolver, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    CreateRaidRequest, RaidDefaultsResponse, RaidListResponse, RaidResponse, RaidSummaryResponse,
    RaidView, UpdateRaidRequest,
};

use super::context::ServiceContext;
use super::dates::{default_raid_date, parse_raid_date};
use super::error::{merge_field_errors, FieldErrors, ServiceError, ServiceResult};

/// How far back `recent_raids` looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryWindow {
    /// Every raid dated before now
    Past,
    LastMonth,
    LastThreeMonths,
}

/// Raid service
pub struct RaidService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RaidService<'a> {
    /// Create a new RaidService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Values to prefill a new raid with
    pub fn new_raid_defaults(&self) -> ServiceResult<RaidDefaultsResponse> {
        let date = default_raid_date(Utc::now(), self.ctx.calendar_config().default_raid_hour)?;
        Ok(RaidDefaultsResponse {
            date,
            caldate: date.format("%Y-%m-%d").to_string(),
            caltime: date.format("%H:%M").to_string(),
            number_of_slots: self.ctx.roster_config().default_slot_count,
        })
    }

    /// Schedule a new raid
    ///
    /// With a template the roster is stamped from it; otherwise the
    /// requested (or default) number of unconstrained slots is created.
    #[instrument(skip(self, request))]
    pub async fn create_raid(
        &self,
        account_id: Snowflake,
        request: CreateRaidRequest,
    ) -> ServiceResult<RaidResponse> {
        let mut fields = self.field_errors(&request, request.number_of_slots);
        let fallback = default_raid_date(Utc::now(), self.ctx.calendar_config().default_raid_hour)?;
        let date = parse_raid_date(request.caldate.as_deref(), request.caltime.as_deref(), fallback)
            .or_else(|err| match err {
                ServiceError::InvalidFields(errors) => {
                    merge_field_errors(&mut fields, errors);
                    Ok(fallback)
                }
                other => Err(other),
            })?;
        if !fields.is_empty() {
            return Err(ServiceError::InvalidFields(fields));
        }

        let template = self.find_template(request.template_id).await?;

        let mut raid = Raid::new(self.ctx.generate_id(), account_id, request.name, date);

        let (mut min_level, mut max_level) = (request.min_level, request.max_level);
        if let Some(instance_id) = request.instance_id {
            let instance = self
                .ctx
                .instance_repo()
                .find_by_id(instance_id)
                .await?
                .ok_or(DomainError::InstanceNotFound(instance_id))?;
            raid.instance_id = Some(instance.id);
            if min_level.is_none() && max_level.is_none() {
                min_level = instance.min_level;
                max_level = instance.max_level;
            }
        }
        raid.set_levels(min_level, max_level)?;

        let slot_count = match (&template, request.number_of_slots) {
            (_, Some(count)) => Some(count),
            (None, None) => Some(self.ctx.roster_config().default_slot_count),
            (Some(_), None) => None,
        };
        if let Some(count) = slot_count {
            raid.set_number_of_slots(count);
        }

        let events = {
            let mut resolver = RosterResolver::new(&mut raid);
            if let Some(template) = &template {
                resolver.apply_template(template, self.ctx.snowflake_generator());
            }
            resolver.reconcile_slot_count(self.ctx.snowflake_generator());
            resolver.into_events()
        };

        self.ctx.raid_repo().create(&raid).await?;
        self.ctx.publish(events);

        info!(
            raid_id = %raid.id,
            account_id = %account_id,
            slots = raid.number_of_slots(),
            "Raid created"
        );

        Ok(self.view(&raid))
    }

    /// Edit a raid
    ///
    /// A template is applied before the slot count is reconciled. Signups
    /// displaced by either change fall back to the waiting list, which is
    /// then backfilled unless the raid is finalized.
    #[instrument(skip(self, request))]
    pub async fn update_raid(
        &self,
        raid_id: Snowflake,
        request: UpdateRaidRequest,
    ) -> ServiceResult<RaidResponse> {
        let fields = self.field_errors(&request, request.number_of_slots);
        if !fields.is_empty() {
            return Err(ServiceError::InvalidFields(fields));
        }
        let template = self.find_template(request.template_id).await?;

        let (_guard, mut raid) = self.ctx.lock_and_load(raid_id).await?;

        if request.caldate.is_some() || request.caltime.is_some() {
            let date =
                parse_raid_date(request.caldate.as_deref(), request.caltime.as_deref(), raid.date)?;
            raid.set_date(date);
        }
        if let Some(name) = request.name {
            raid.set_name(name);
        }
        if request.min_level.is_some() || request.max_level.is_some() {
            raid.set_levels(
                request.min_level.or(raid.min_level),
                request.max_level.or(raid.max_level),
            )?;
        }
        if let Some(count) = request.number_of_slots {
            raid.set_number_of_slots(count);
        }

        let (displaced, backfilled, events) = {
            let mut resolver = RosterResolver::new(&mut raid);
            let mut displaced = Vec::new();
            if let Some(template) = &template {
                displaced.extend(resolver.apply_template(template, self.ctx.snowflake_generator()));
            }
            displaced.extend(resolver.reconcile_slot_count(self.ctx.snowflake_generator()));

            let backfilled = if resolver.raid().is_locked() {
                0
            } else {
                resolver.add_waiting_list()
            };
            (displaced.len(), backfilled, resolver.into_events())
        };

        self.ctx.raid_repo().save(&raid).await?;
        self.ctx.publish(events);

        info!(
            raid_id = %raid_id,
            slots = raid.number_of_slots(),
            displaced,
            backfilled,
            "Raid updated"
        );

        Ok(self.view(&raid))
    }

    /// Get a raid with its full roster
    #[instrument(skip(self))]
    pub async fn get_raid(&self, raid_id: Snowflake) -> ServiceResult<RaidResponse> {
        let raid = self.ctx.load_raid(raid_id).await?;
        Ok(self.view(&raid))
    }

    /// Raid index split at now minus the listing grace period
    ///
    /// A raid that started a few hours ago is still listed as upcoming.
    #[instrument(skip(self))]
    pub async fn list_raids(&self) -> ServiceResult<RaidListResponse> {
        let now = Utc::now();
        let cutoff = now - Duration::hours(self.ctx.roster_config().listing_grace_hours);

        let upcoming = self.ctx.raid_repo().find_upcoming(cutoff).await?;
        let old = self.ctx.raid_repo().find_before(cutoff).await?;

        Ok(RaidListResponse {
            upcoming: upcoming.iter().map(|raid| self.summary(raid, now)).collect(),
            old: old.iter().map(|raid| self.summary(raid, now)).collect(),
        })
    }

    /// Raids scheduled in an instance, earliest first
    #[instrument(skip(self))]
    pub async fn list_by_instance(
        &self,
        instance_id: Snowflake,
    ) -> ServiceResult<Vec<RaidSummaryResponse>> {
        let now = Utc::now();
        let raids = self.ctx.raid_repo().find_by_instance(instance_id).await?;
        Ok(raids.iter().map(|raid| self.summary(raid, now)).collect())
    }

    /// Past raids within a window, latest first
    #[instrument(skip(self))]
    pub async fn recent_raids(
        &self,
        window: HistoryWindow,
    ) -> ServiceResult<Vec<RaidSummaryResponse>> {
        let now = Utc::now();
        let since = match window {
            HistoryWindow::Past => None,
            HistoryWindow::LastMonth => Some(months_before(now, 1)),
            HistoryWindow::LastThreeMonths => Some(months_before(now, 3)),
        };

        let raids = self.ctx.raid_repo().find_before(now).await?;
        Ok(raids
            .iter()
            .filter(|raid| !since.is_some_and(|since| raid.date < since))
            .map(|raid| self.summary(raid, now))
            .collect())
    }

    /// Flip the finalized flag
    ///
    /// A finalized raid keeps its roster as is when characters withdraw.
    #[instrument(skip(self))]
    pub async fn toggle_finalized(&self, raid_id: Snowflake) -> ServiceResult<RaidResponse> {
        let (_guard, mut raid) = self.ctx.lock_and_load(raid_id).await?;

        let finalized = raid.toggle_finalized();
        self.ctx.raid_repo().save(&raid).await?;

        info!(raid_id = %raid_id, finalized, "Raid finalization toggled");

        Ok(self.view(&raid))
    }

    /// Delete a raid with its slots and signups
    ///
    /// Refused once loot has been recorded for it.
    #[instrument(skip(self))]
    pub async fn delete_raid(&self, raid_id: Snowflake) -> ServiceResult<()> {
        let (guard, raid) = self.ctx.lock_and_load(raid_id).await?;

        if self.ctx.loot_repo().count_by_raid(raid_id).await? > 0 {
            return Err(DomainError::RaidHasLoot.into());
        }

        self.ctx.raid_repo().delete(raid_id).await?;
        drop(guard);
        self.ctx.forget_raid_lock(raid_id);

        info!(raid_id = %raid_id, signups = raid.signups.len(), "Raid deleted");

        Ok(())
    }

    async fn find_template(&self, template_id: Option<Snowflake>) -> ServiceResult<Option<Template>> {
        let Some(template_id) = template_id else {
            return Ok(None);
        };
        let template = self
            .ctx
            .template_repo()
            .find_by_id(template_id)
            .await?
            .ok_or(DomainError::TemplateNotFound(template_id))?;
        Ok(Some(template))
    }

    /// Field errors of a raid form, including the configured slot ceiling
    fn field_errors(&self, request: &impl Validate, slots: Option<usize>) -> FieldErrors {
        let mut fields = match request.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => match ServiceError::from(errors) {
                ServiceError::InvalidFields(fields) => fields,
                _ => FieldErrors::new(),
            },
        };

        let max = self.ctx.roster_config().max_slot_count;
        if slots.is_some_and(|count| count > max) {
            fields
                .entry("number_of_slots".to_string())
                .or_default()
                .push(DomainError::TooManySlots { max }.to_string());
        }
        fields
    }

    pub(crate) fn view(&self, raid: &Raid) -> RaidResponse {
        RaidResponse::from(RaidView {
            raid,
            now: Utc::now(),
            uid_domain: &self.ctx.calendar_config().uid_domain,
            group_size: self.ctx.roster_config().group_size,
        })
    }

    fn summary(&self, raid: &Raid, now: DateTime<Utc>) -> RaidSummaryResponse {
        RaidSummaryResponse::from(RaidView {
            raid,
            now,
            uid_domain: &self.ctx.calendar_config().uid_domain,
            group_size: self.ctx.roster_config().group_size,
        })
    }
}

fn months_before(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
