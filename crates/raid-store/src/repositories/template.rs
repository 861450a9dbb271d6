//! In-memory implementation of TemplateRepository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::instrument;

use raid_core::entities::Template;
use raid_core::traits::{RepoResult, TemplateRepository};
use raid_core::value_objects::Snowflake;

use super::error::{duplicate_id, template_not_found};

/// Template catalog
///
/// Read far more often than written, hence a single `RwLock` over the map.
#[derive(Clone, Default)]
pub struct MemTemplateRepository {
    templates: Arc<RwLock<HashMap<Snowflake, Template>>>,
}

impl MemTemplateRepository {
    /// Create an empty MemTemplateRepository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateRepository for MemTemplateRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Template>> {
        Ok(self.templates.read().get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Template>> {
        let mut templates: Vec<Template> = self.templates.read().values().cloned().collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(templates)
    }

    #[instrument(skip(self, template), fields(template_id = %template.id))]
    async fn create(&self, template: &Template) -> RepoResult<()> {
        let mut templates = self.templates.write();
        if templates.contains_key(&template.id) {
            return Err(duplicate_id(template.id));
        }
        templates.insert(template.id, template.clone());
        Ok(())
    }

    #[instrument(skip(self, template), fields(template_id = %template.id))]
    async fn update(&self, template: &Template) -> RepoResult<()> {
        let mut templates = self.templates.write();
        let stored = templates
            .get_mut(&template.id)
            .ok_or_else(|| template_not_found(template.id))?;
        *stored = template.clone();
        Ok(())
    }
}
