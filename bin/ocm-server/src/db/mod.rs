//! Durable key-value slots.
//!
//! [`SlotStore`] is the whole persistence contract: read a named slot, or
//! replace it wholesale. The default implementation is
//! [`sqlite::SqliteStore`]; [`memory::MemoryStore`] keeps slots in a map for
//! tests. To move the catalog elsewhere, implement
//! [`SlotStore`] for the new backend and change the concrete type in
//! [`crate::state::AppState`].

#[cfg(test)]
pub mod memory;
pub mod sqlite;

use std::future::Future;

pub trait SlotStore: Send + Sync + 'static {
    /// Current value of `key`, or `None` if the slot was never written.
    fn get_slot(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, sqlx::Error>> + Send;

    /// Replace the value of `key`, creating the slot if needed.
    fn put_slot(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}
