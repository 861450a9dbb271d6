//! Instance service

use raid_core::entities::Instance;
use raid_core::{DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateInstanceRequest, InstanceResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Instance service
pub struct InstanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InstanceService<'a> {
    /// Create a new InstanceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register an instance; its level range becomes the default for raids in it
    #[instrument(skip(self, request))]
    pub async fn create_instance(&self, request: CreateInstanceRequest) -> ServiceResult<InstanceResponse> {
        request.validate()?;
        if let (Some(min), Some(max)) = (request.min_level, request.max_level) {
            if min > max {
                return Err(DomainError::InvalidLevelRange { min, max }.into());
            }
        }

        let mut instance = Instance::new(self.ctx.generate_id(), request.name);
        instance.min_level = request.min_level;
        instance.max_level = request.max_level;
        self.ctx.instance_repo().create(&instance).await?;

        info!(instance_id = %instance.id, "Instance created");

        Ok(InstanceResponse::from(&instance))
    }

    #[instrument(skip(self))]
    pub async fn get_instance(&self, instance_id: Snowflake) -> ServiceResult<InstanceResponse> {
        let instance = self
            .ctx
            .instance_repo()
            .find_by_id(instance_id)
            .await?
            .ok_or(DomainError::InstanceNotFound(instance_id))?;
        Ok(InstanceResponse::from(&instance))
    }
}
