//! In-memory implementation of RaidRepository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::instrument;

use raid_core::entities::Raid;
use raid_core::traits::{RaidRepository, RepoResult};
use raid_core::value_objects::Snowflake;

use super::error::{duplicate_id, raid_not_found};

/// Raid aggregates keyed by id
///
/// Each aggregate is stored whole, so a save replaces slots and signups in
/// one step and readers never observe a half-written roster.
#[derive(Clone, Default)]
pub struct MemRaidRepository {
    raids: Arc<DashMap<Snowflake, Raid>>,
}

impl MemRaidRepository {
    /// Create an empty MemRaidRepository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored raids
    pub fn len(&self) -> usize {
        self.raids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raids.is_empty()
    }

    fn collect<F>(&self, keep: F) -> Vec<Raid>
    where
        F: Fn(&Raid) -> bool,
    {
        self.raids
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

// Raids on the same date keep a stable order by id
fn by_date(a: &Raid, b: &Raid) -> std::cmp::Ordering {
    a.date.cmp(&b.date).then(a.id.cmp(&b.id))
}

#[async_trait]
impl RaidRepository for MemRaidRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Raid>> {
        Ok(self.raids.get(&id).map(|raid| raid.value().clone()))
    }

    #[instrument(skip(self))]
    async fn find_upcoming(&self, since: DateTime<Utc>) -> RepoResult<Vec<Raid>> {
        let mut raids = self.collect(|raid| raid.date >= since);
        raids.sort_by(by_date);
        Ok(raids)
    }

    #[instrument(skip(self))]
    async fn find_before(&self, before: DateTime<Utc>) -> RepoResult<Vec<Raid>> {
        let mut raids = self.collect(|raid| raid.date < before);
        raids.sort_by(|a, b| by_date(b, a));
        Ok(raids)
    }

    #[instrument(skip(self))]
    async fn find_by_instance(&self, instance_id: Snowflake) -> RepoResult<Vec<Raid>> {
        let mut raids = self.collect(|raid| raid.instance_id == Some(instance_id));
        raids.sort_by(by_date);
        Ok(raids)
    }

    #[instrument(skip(self, raid), fields(raid_id = %raid.id))]
    async fn create(&self, raid: &Raid) -> RepoResult<()> {
        match self.raids.entry(raid.id) {
            Entry::Occupied(_) => Err(duplicate_id(raid.id)),
            Entry::Vacant(entry) => {
                entry.insert(raid.clone());
                Ok(())
            }
        }
    }

    #[instrument(skip(self, raid), fields(raid_id = %raid.id))]
    async fn save(&self, raid: &Raid) -> RepoResult<()> {
        let mut stored = self.raids.get_mut(&raid.id).ok_or_else(|| raid_not_found(raid.id))?;
        *stored = raid.clone();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.raids
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| raid_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use raid_core::DomainError;

    fn raid(id: i64, date: DateTime<Utc>) -> Raid {
        Raid::new(Snowflake::new(id), Snowflake::new(1), format!("Raid {id}"), date)
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, 18, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MemRaidRepository::new();
        let created = raid(10, at(5));
        repo.create(&created).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
        assert!(repo.find_by_id(Snowflake::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let repo = MemRaidRepository::new();
        repo.create(&raid(10, at(5))).await.unwrap();

        let err = repo.create(&raid(10, at(6))).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateId(id) if id == Snowflake::new(10)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_save_replaces_aggregate() {
        let repo = MemRaidRepository::new();
        let mut stored = raid(10, at(5));
        repo.create(&stored).await.unwrap();

        stored.set_name("Renamed".to_string());
        repo.save(&stored).await.unwrap();

        let found = repo.find_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Renamed");
    }

    #[tokio::test]
    async fn test_save_unknown_raid_fails() {
        let repo = MemRaidRepository::new();
        let err = repo.save(&raid(10, at(5))).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_upcoming_and_before_ordering() {
        let repo = MemRaidRepository::new();
        for (id, day) in [(1, 20), (2, 3), (3, 12), (4, 8)] {
            repo.create(&raid(id, at(day))).await.unwrap();
        }
        let cutoff = at(10) - Duration::hours(1);

        let upcoming: Vec<i64> = repo
            .find_upcoming(cutoff)
            .await
            .unwrap()
            .iter()
            .map(|raid| raid.id.into_inner())
            .collect();
        assert_eq!(upcoming, vec![3, 1]);

        let old: Vec<i64> = repo
            .find_before(cutoff)
            .await
            .unwrap()
            .iter()
            .map(|raid| raid.id.into_inner())
            .collect();
        assert_eq!(old, vec![4, 2]);
    }

    #[tokio::test]
    async fn test_find_by_instance() {
        let repo = MemRaidRepository::new();
        let instance_id = Snowflake::new(500);

        let mut inside = raid(1, at(9));
        inside.instance_id = Some(instance_id);
        repo.create(&inside).await.unwrap();
        repo.create(&raid(2, at(4))).await.unwrap();

        let found = repo.find_by_instance(instance_id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, inside.id);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = MemRaidRepository::new();
        repo.create(&raid(10, at(5))).await.unwrap();

        repo.delete(Snowflake::new(10)).await.unwrap();
        assert!(repo.is_empty());
        assert!(repo.delete(Snowflake::new(10)).await.unwrap_err().is_not_found());
    }
}
