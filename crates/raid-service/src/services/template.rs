//! Template service
//!
//! Templates are reusable roster layouts. Applying one reshapes a raid's
//! slots once; editing the template later does not touch raids it was
//! applied to.

use raid_core::entities::{SlotSpec, Template, TemplateSlot};
use raid_core::{ClassId, DomainError, Roles, RosterResolver, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{RaidResponse, TemplateRequest, TemplateResponse, TemplateSlotRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::raid::RaidService;

/// Template service
pub struct TemplateService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TemplateService<'a> {
    /// Create a new TemplateService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request))]
    pub async fn create_template(&self, request: TemplateRequest) -> ServiceResult<TemplateResponse> {
        request.validate()?;
        let slots = self.build_slots(&request.slots)?;

        let template = Template::new(self.ctx.generate_id(), request.name, slots);
        self.ctx.template_repo().create(&template).await?;

        info!(template_id = %template.id, slots = template.len(), "Template created");

        Ok(TemplateResponse::from(template))
    }

    /// Replace a template's name and slots
    #[instrument(skip(self, request))]
    pub async fn update_template(
        &self,
        template_id: Snowflake,
        request: TemplateRequest,
    ) -> ServiceResult<TemplateResponse> {
        request.validate()?;
        let slots = self.build_slots(&request.slots)?;

        let mut template = self.load(template_id).await?;
        template.name = request.name;
        template.set_slots(slots);
        self.ctx.template_repo().update(&template).await?;

        info!(template_id = %template_id, slots = template.len(), "Template updated");

        Ok(TemplateResponse::from(template))
    }

    #[instrument(skip(self))]
    pub async fn get_template(&self, template_id: Snowflake) -> ServiceResult<TemplateResponse> {
        self.load(template_id).await.map(TemplateResponse::from)
    }

    /// All templates ordered by name
    #[instrument(skip(self))]
    pub async fn list_templates(&self) -> ServiceResult<Vec<TemplateResponse>> {
        let templates = self.ctx.template_repo().find_all().await?;
        Ok(templates.iter().map(TemplateResponse::from).collect())
    }

    /// Reshape a raid's roster after a template
    ///
    /// Occupants that still fit their slot stay; the others and those whose
    /// slot was cut off go back to the waiting list, which is backfilled
    /// unless the raid is finalized.
    #[instrument(skip(self))]
    pub async fn apply_template(
        &self,
        raid_id: Snowflake,
        template_id: Snowflake,
    ) -> ServiceResult<RaidResponse> {
        let template = self.load(template_id).await?;

        let (_guard, mut raid) = self.ctx.lock_and_load(raid_id).await?;

        let (displaced, backfilled, events) = {
            let mut resolver = RosterResolver::new(&mut raid);
            let displaced = resolver.apply_template(&template, self.ctx.snowflake_generator());
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
            template_id = %template_id,
            displaced,
            backfilled,
            "Template applied to raid"
        );

        Ok(RaidService::new(self.ctx).view(&raid))
    }

    async fn load(&self, template_id: Snowflake) -> ServiceResult<Template> {
        Ok(self
            .ctx
            .template_repo()
            .find_by_id(template_id)
            .await?
            .ok_or(DomainError::TemplateNotFound(template_id))?)
    }

    fn build_slots(&self, requests: &[TemplateSlotRequest]) -> ServiceResult<Vec<TemplateSlot>> {
        requests
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let roles = Roles::parse_names(&slot.roles).map_err(|err| {
                    ServiceError::invalid_field(format!("slots[{index}].roles"), err.to_string())
                })?;
                let mut spec = SlotSpec::for_roles(roles)
                    .with_classes(slot.classes.iter().copied().map(ClassId::new))
                    .with_type(slot.slot_type);
                if slot.closed {
                    spec = spec.closed();
                }
                Ok(TemplateSlot {
                    id: self.ctx.generate_id(),
                    spec,
                })
            })
            .collect()
    }
}
