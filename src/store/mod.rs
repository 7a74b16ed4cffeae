//! The remote tag store boundary.
//!
//! The hosted backend keeps every tag as one row in a `tags` table:
//! global rows have no owner, custom rows carry the id of the user who made
//! them. This module pins down the shape of those rows ([`TagRow`]), the
//! operations the rest of the crate may run against them ([`TagStore`]),
//! and the mapping from a raw row into a checked [`Tag`].
//!
//! Rows come off the wire duck-typed, so everything passes through
//! [`TagRow::into_tag`] before the catalog ever sees it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Category, Tag, TagOrigin, UserId};

pub mod error;
pub mod http;

pub use error::StoreError;
pub use http::HttpTagStore;

/// A remote store holding tag rows.
///
/// The catalog is generic over this, so tests can swap in an in-memory
/// double and screens can share one HTTP-backed store.
#[allow(async_fn_in_trait)]
pub trait TagStore {
    /// Fetches all rows for `category`. An `owner` of `None` selects the
    /// shared (global) rows; `Some` selects that user's custom rows.
    async fn fetch_tags(
        &self,
        category: &Category,
        owner: Option<UserId>,
    ) -> Result<Vec<TagRow>, StoreError>;

    /// Inserts one custom row for `owner`.
    async fn insert_tag(
        &self,
        category: &Category,
        owner: UserId,
        name: &str,
    ) -> Result<(), StoreError>;

    /// Deletes `owner`'s custom row with this exact name.
    async fn delete_tag(
        &self,
        category: &Category,
        owner: UserId,
        name: &str,
    ) -> Result<(), StoreError>;
}

/// One tag row, exactly as the backend returns it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagRow {
    /// Row id. We never address rows by it, but the backend always sends it.
    pub id: Uuid,

    /// The display string of the tag.
    pub name: String,

    /// The category string, echoed back from the request filter.
    pub category: String,

    /// `None` for global rows.
    pub owner_id: Option<Uuid>,

    /// When the row was created. Older deployments didn't set this.
    pub created_at: Option<DateTime<Utc>>,
}

impl TagRow {
    /// Checks this row against the request that produced it, then maps it
    /// into a [`Tag`].
    ///
    /// Rows with a blank name, or from the wrong category, never make it
    /// past here.
    pub fn into_tag(self, requested: &Category) -> Result<Tag, StoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(StoreError::MalformedRow(format!(
                "row `{}` has a blank name",
                self.id
            )));
        }

        if self.category != requested.as_str() {
            return Err(StoreError::MalformedRow(format!(
                "asked for `{requested}` rows, but row `{}` says it's `{}`",
                self.id, self.category
            )));
        }

        let origin = match self.owner_id {
            Some(owner) => TagOrigin::Custom { owner },
            None => TagOrigin::Global,
        };

        Ok(Tag::new(name, requested.clone(), origin))
    }
}
