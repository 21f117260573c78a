//! The material catalog store.
//!
//! [`MaterialStore`] is the only component that persists the collection. It
//! keeps the whole collection as one JSON array in a single [`SlotStore`]
//! slot and serialises every operation through one async mutex: each call
//! re-reads the slot, applies its change, and writes the full array back
//! before releasing the lock. No copy of the collection is cached between
//! calls; callers receive owned snapshots.

use ocm_types::{MaterialRecord, seed_materials};
use strum::{Display, EnumString};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::db::SlotStore;

/// What `insert` does when the incoming id is already in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DuplicateIdPolicy {
    /// Refuse the insert with [`StoreError::DuplicateId`].
    #[default]
    Reject,
    /// Prepend anyway; ids become caller-trusted.
    Allow,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The slot holds something that is not a JSON array of records.
    #[error("corrupt material collection: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("material id '{0}' already exists")]
    DuplicateId(String),
}

pub struct MaterialStore<S> {
    slots: S,
    key: String,
    policy: DuplicateIdPolicy,
    lock: Mutex<()>,
}

impl<S> std::fmt::Debug for MaterialStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialStore")
            .field("key", &self.key)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<S: SlotStore> MaterialStore<S> {
    pub fn new(slots: S, key: impl Into<String>, policy: DuplicateIdPolicy) -> Self {
        Self {
            slots,
            key: key.into(),
            policy,
            lock: Mutex::new(()),
        }
    }

    /// Slot key the collection lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The full collection, seeding the slot on first access.
    pub async fn load(&self) -> Result<Vec<MaterialRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Prepend `record` and return the new collection.
    pub async fn insert(&self, record: MaterialRecord) -> Result<Vec<MaterialRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut materials = self.read().await?;

        if self.policy == DuplicateIdPolicy::Reject && materials.iter().any(|m| m.id == record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }

        info!(id = %record.id, category = %record.category, "material added");
        materials.insert(0, record);
        self.write(&materials).await?;
        Ok(materials)
    }

    /// Remove every record with `id`. An unknown id is not an error.
    pub async fn delete(&self, id: &str) -> Result<Vec<MaterialRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut materials = self.read().await?;

        let before = materials.len();
        materials.retain(|m| m.id != id);
        debug!(id, removed = before - materials.len(), "material delete");

        self.write(&materials).await?;
        Ok(materials)
    }

    /// Bump the download counter of every record with `id`.
    pub async fn increment_downloads(&self, id: &str) -> Result<Vec<MaterialRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        let materials: Vec<MaterialRecord> = self
            .read()
            .await?
            .into_iter()
            .map(|m| if m.id == id { m.with_incremented_downloads() } else { m })
            .collect();

        self.write(&materials).await?;
        Ok(materials)
    }

    // Callers must hold `self.lock`.
    async fn read(&self) -> Result<Vec<MaterialRecord>, StoreError> {
        match self.slots.get_slot(&self.key).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => {
                let seed = seed_materials(chrono::Utc::now().timestamp_millis());
                self.write(&seed).await?;
                info!(key = %self.key, count = seed.len(), "seeded empty material collection");
                Ok(seed)
            }
        }
    }

    async fn write(&self, materials: &[MaterialRecord]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(materials)?;
        self.slots.put_slot(&self.key, &raw).await?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db::memory::MemoryStore;
    use ocm_types::{Category, NewMaterial};

    const KEY: &str = "oc_materials_db";

    fn store(policy: DuplicateIdPolicy) -> MaterialStore<MemoryStore> {
        MaterialStore::new(MemoryStore::new(), KEY, policy)
    }

    fn fresh(id: &str) -> MaterialRecord {
        MaterialRecord {
            id: id.into(),
            ..NewMaterial {
                title: "Halftone dots".into(),
                category: Category::Reference,
                author: "tester".into(),
                description: "screen tone".into(),
                ..NewMaterial::default()
            }
            .into_record(42)
        }
    }

    #[tokio::test]
    async fn first_load_seeds_three_records_once() {
        let store = store(DuplicateIdPolicy::Reject);
        let first = store.load().await.unwrap();
        assert_eq!(first.len(), 3);

        let second = store.load().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn insert_prepends() {
        let store = store(DuplicateIdPolicy::Reject);
        let before = store.load().await.unwrap();

        store.insert(fresh("100")).await.unwrap();
        let after = store.load().await.unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after[0], fresh("100"));
        assert_eq!(&after[1..], &before[..]);
    }

    #[tokio::test]
    async fn insert_into_unseeded_slot_seeds_first() {
        let store = store(DuplicateIdPolicy::Reject);
        let materials = store.insert(fresh("100")).await.unwrap();
        assert_eq!(materials.len(), 4);
        assert_eq!(materials[0].id, "100");
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected_by_default() {
        let store = store(DuplicateIdPolicy::Reject);
        let before = store.load().await.unwrap();

        let err = store.insert(fresh("2")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(ref id) if id == "2"));
        assert_eq!(store.load().await.unwrap(), before);
    }

    #[tokio::test]
    async fn duplicate_id_is_admitted_when_allowed() {
        let store = store(DuplicateIdPolicy::Allow);
        let materials = store.insert(fresh("2")).await.unwrap();
        assert_eq!(materials.iter().filter(|m| m.id == "2").count(), 2);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_changes_nothing() {
        let store = store(DuplicateIdPolicy::Reject);
        let before = store.load().await.unwrap();
        let after = store.delete("does-not-exist").await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn increment_twice_adds_two_and_touches_nothing_else() {
        let store = store(DuplicateIdPolicy::Reject);
        let before = store.load().await.unwrap();

        store.increment_downloads("3").await.unwrap();
        let after = store.increment_downloads("3").await.unwrap();

        for (old, new) in before.iter().zip(&after) {
            if old.id == "3" {
                assert_eq!(new.downloads, old.downloads + 2);
                assert_eq!(
                    MaterialRecord { downloads: old.downloads, ..new.clone() },
                    *old
                );
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[tokio::test]
    async fn increment_then_delete_end_to_end() {
        let store = store(DuplicateIdPolicy::Reject);
        let seed = store.load().await.unwrap();
        let target = seed.iter().find(|m| m.downloads == 89).unwrap().id.clone();

        let bumped = store.increment_downloads(&target).await.unwrap();
        let counts: Vec<u64> = bumped.iter().map(|m| m.downloads).collect();
        assert_eq!(counts, vec![124, 90, 342]);

        let remaining = store.delete(&target).await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|m| m.id != target));
        assert_eq!(store.load().await.unwrap(), remaining);
    }

    #[tokio::test]
    async fn concurrent_increments_are_all_counted() {
        let store = std::sync::Arc::new(store(DuplicateIdPolicy::Reject));
        store.load().await.unwrap();

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..10 {
            let store = store.clone();
            tasks.spawn(async move { store.increment_downloads("1").await.map(|_| ()) });
        }
        while let Some(res) = tasks.join_next().await {
            res.unwrap().unwrap();
        }

        let first = &store.load().await.unwrap()[0];
        assert_eq!(first.downloads, 134);
    }

    #[tokio::test]
    async fn corrupt_slot_is_reported_not_reseeded() {
        let slots = MemoryStore::new();
        slots.put_slot(KEY, "{not json").await.unwrap();
        let store = MaterialStore::new(slots, KEY, DuplicateIdPolicy::Reject);

        assert!(matches!(store.load().await, Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn policy_parses_from_env_values() {
        assert_eq!("reject".parse::<DuplicateIdPolicy>().unwrap(), DuplicateIdPolicy::Reject);
        assert_eq!("ALLOW".parse::<DuplicateIdPolicy>().unwrap(), DuplicateIdPolicy::Allow);
        assert!("sometimes".parse::<DuplicateIdPolicy>().is_err());
    }
}
