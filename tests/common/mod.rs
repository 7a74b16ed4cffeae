//! The parent of the other tests.
//!
//! Mostly to import the setup stuff below.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use lookbook::{
    store::{StoreError, TagRow, TagStore},
    types::{Category, UserId},
};
use uuid::Uuid;

/// call this at the top of any new test func! :)
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn setup() {
    // tests share one process, so don't panic when a second test also
    // wants logging
    _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// The user doing the composing in these tests.
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn me() -> UserId {
    Uuid::from_u128(0xBEEF)
}

/// An in-memory stand-in for the hosted tag store.
///
/// Rows live behind a mutex so tests can script failures and then poke at
/// what actually got written. Catalogs borrow it (`&MemoryStore` is the
/// `TagStore`) for the same reason.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<TagRow>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

#[allow(dead_code, reason = "different tests use different helpers")]
impl MemoryStore {
    pub fn with_rows(rows: Vec<TagRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Sneaks a row in behind the catalog's back, like another device
    /// would.
    pub fn sneak_in(&self, row: TagRow) {
        self.rows.lock().expect("rows lock").push(row);
    }

    /// Drops a row behind the catalog's back.
    pub fn purge(&self, name: &str) {
        self.rows.lock().expect("rows lock").retain(|r| r.name != name);
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().expect("rows lock").len()
    }

    pub fn row_names(&self, owner: Option<UserId>) -> Vec<String> {
        self.rows
            .lock()
            .expect("rows lock")
            .iter()
            .filter(|r| r.owner_id == owner)
            .map(|r| r.name.clone())
            .collect()
    }
}

impl TagStore for &MemoryStore {
    async fn fetch_tags(
        &self,
        category: &Category,
        owner: Option<UserId>,
    ) -> Result<Vec<TagRow>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unreachable(String::from(
                "scripted read failure",
            )));
        }

        Ok(self
            .rows
            .lock()
            .expect("rows lock")
            .iter()
            .filter(|r| r.category == category.as_str() && r.owner_id == owner)
            .cloned()
            .collect())
    }

    async fn insert_tag(
        &self,
        category: &Category,
        owner: UserId,
        name: &str,
    ) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unreachable(String::from(
                "scripted write failure",
            )));
        }

        let mut rows = self.rows.lock().expect("rows lock");

        // the (category, owner, name) uniqueness constraint
        if rows
            .iter()
            .any(|r| r.category == category.as_str() && r.owner_id == Some(owner) && r.name == name)
        {
            return Err(StoreError::AlreadyExists);
        }

        rows.push(custom_row(category, owner, name));
        Ok(())
    }

    async fn delete_tag(
        &self,
        category: &Category,
        owner: UserId,
        name: &str,
    ) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unreachable(String::from(
                "scripted write failure",
            )));
        }

        self.rows.lock().expect("rows lock").retain(|r| {
            !(r.category == category.as_str() && r.owner_id == Some(owner) && r.name == name)
        });
        Ok(())
    }
}

/// A shared (global) row, like the seeded catalog rows in production.
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn global_row(category: &Category, name: &str) -> TagRow {
    TagRow {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: category.as_str().to_string(),
        owner_id: None,
        created_at: None,
    }
}

/// A custom row owned by `owner`.
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn custom_row(category: &Category, owner: UserId, name: &str) -> TagRow {
    TagRow {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: category.as_str().to_string(),
        owner_id: Some(owner),
        created_at: None,
    }
}
