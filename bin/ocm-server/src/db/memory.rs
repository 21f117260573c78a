//! In-process [`SlotStore`] backed by a map. Nothing survives a restart.

use std::collections::HashMap;

use tokio::sync::Mutex;

use super::SlotStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemoryStore {
    async fn get_slot(&self, key: &str) -> Result<Option<String>, sqlx::Error> {
        Ok(self.slots.lock().await.get(key).cloned())
    }

    async fn put_slot(&self, key: &str, value: &str) -> Result<(), sqlx::Error> {
        self.slots
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn unwritten_slot_is_none_and_put_overwrites() {
        let store = MemoryStore::new();
        assert_eq!(store.get_slot("k").await.unwrap(), None);

        store.put_slot("k", "[1]").await.unwrap();
        store.put_slot("k", "[2]").await.unwrap();
        assert_eq!(store.get_slot("k").await.unwrap().as_deref(), Some("[2]"));
        assert_eq!(store.get_slot("other").await.unwrap(), None);
    }
}
