//! The tag catalog: one category's worth of tags, reconciled for a
//! composing session.
//!
//! A catalog merges the shared (global) tag list with the user's own
//! (custom) tags, deduplicates them case-insensitively, and tracks which
//! ones are picked for the post being written. Custom-tag changes are
//! write-through: the remote row lands first, local state only moves on
//! confirmed success. Selection never leaves the phone - the post-save
//! flow snapshots it onto the post record when the user hits share.

mod rank;

use futures::try_join;

use crate::{
    error::CatalogError,
    store::{StoreError, TagStore},
    types::{normalized, Category, Tag, TagOrigin, UserId},
};

/// Where a catalog is in its lifecycle.
///
/// Screens use this to decide between a spinner, a retry affordance, and
/// the real list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogPhase {
    Unloaded,
    Loading,
    Ready,
}

/// Reconciled session state. Only exists while the catalog is `Ready`.
#[derive(Clone, Debug, Default)]
struct Reconciled {
    /// The deduplicated set, in fetch order: globals first, then customs.
    tags: Vec<Tag>,

    /// Normalized keys of the selected tags, in the order they were picked.
    selected: Vec<String>,
}

impl Reconciled {
    fn contains(&self, key: &str) -> bool {
        self.tags.iter().any(|t| t.key() == key)
    }

    fn find(&self, key: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.key() == key)
    }

    fn select(&mut self, key: String) {
        if !self.selected.contains(&key) {
            self.selected.push(key);
        }
    }

    /// Drops a tag from membership and selection in one go, so no caller
    /// can ever observe it in one but not the other.
    fn remove(&mut self, key: &str) {
        self.tags.retain(|t| t.key() != key);
        self.selected.retain(|k| k != key);
    }
}

/// The reconciled, ranked tag list for one category and one composing user.
///
/// One catalog belongs to one composing flow on one device. It's plain
/// owned state - no locks, no background tasks - so clone-free sharing
/// across screens means handing out `&mut` like any other Rust value.
pub struct TagCatalog<S> {
    store: S,
    category: Category,
    user: UserId,
    state: State,
}

enum State {
    Unloaded,
    Loading,
    Ready(Reconciled),
}

impl<S: TagStore> TagCatalog<S> {
    /// A fresh, unloaded catalog. Call [`TagCatalog::load`] before anything
    /// else.
    pub fn new(store: S, category: Category, user: UserId) -> Self {
        Self {
            store,
            category,
            user,
            state: State::Unloaded,
        }
    }

    pub fn phase(&self) -> CatalogPhase {
        match self.state {
            State::Unloaded => CatalogPhase::Unloaded,
            State::Loading => CatalogPhase::Loading,
            State::Ready(_) => CatalogPhase::Ready,
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Loads (or reloads) the catalog from the remote store.
    ///
    /// The global and custom reads run concurrently; there's no ordering
    /// dependency between them, but both have to land before the catalog
    /// turns `Ready`. Either one failing drops the catalog back to
    /// `Unloaded` and reports [`CatalogError::RemoteUnavailable`] - the
    /// screen decides whether to retry or show an empty list.
    ///
    /// On a reload, the current selection survives for whichever tags
    /// still exist in the refreshed set.
    #[tracing::instrument(skip(self), fields(category = %self.category))]
    pub async fn load(&mut self) -> Result<(), CatalogError> {
        let previous_selection = match std::mem::replace(&mut self.state, State::Loading) {
            State::Ready(reconciled) => reconciled.selected,
            _ => Vec::new(),
        };

        let fetched = try_join!(
            self.store.fetch_tags(&self.category, None),
            self.store.fetch_tags(&self.category, Some(self.user)),
        );

        let (global_rows, custom_rows) = match fetched {
            Ok(rows) => rows,
            Err(e) => {
                self.state = State::Unloaded;
                tracing::warn!("couldn't load the tag catalog. err: {e}");
                return Err(CatalogError::RemoteUnavailable(e));
            }
        };

        let mut reconciled = Reconciled::default();

        for row in global_rows.into_iter().chain(custom_rows) {
            let tag = match row.into_tag(&self.category) {
                Ok(tag) => tag,
                Err(e) => {
                    tracing::warn!("dropping a malformed tag row. err: {e}");
                    continue;
                }
            };

            // globals were chained in first, so on a collision the shared
            // tag wins and the user's duplicate stays hidden this session
            if reconciled.contains(&tag.key()) {
                tracing::debug!(name = tag.name(), "dropping duplicate tag row");
                continue;
            }

            reconciled.tags.push(tag);
        }

        reconciled.selected = previous_selection
            .into_iter()
            .filter(|key| reconciled.contains(key))
            .collect();

        tracing::debug!(tag_ct = reconciled.tags.len(), "tag catalog ready");
        self.state = State::Ready(reconciled);
        Ok(())
    }

    /// Case-insensitive substring search over the reconciled set, ranked
    /// for display: selected tags first, then the user's own, then the
    /// shared catalog, stable by fetch order within each group.
    ///
    /// Never fails. An empty query matches everything, and a catalog that
    /// isn't `Ready` has nothing to offer.
    pub fn search(&self, query: &str) -> Vec<Tag> {
        let State::Ready(reconciled) = &self.state else {
            return Vec::new();
        };

        let needle = normalized(query);

        let mut hits: Vec<&Tag> = reconciled
            .tags
            .iter()
            .filter(|t| t.key().contains(&needle))
            .collect();

        hits.sort_by_key(|t| rank::bucket(t, &reconciled.selected));

        hits.into_iter().cloned().collect()
    }

    /// True iff `query` (trimmed) is non-empty and doesn't match any
    /// existing tag case-insensitively. The screen uses this to decide
    /// whether to offer the "add new tag" row.
    pub fn is_new_entry(&self, query: &str) -> bool {
        let key = normalized(query);
        if key.is_empty() {
            return false;
        }

        match &self.state {
            State::Ready(reconciled) => !reconciled.contains(&key),
            // with nothing loaded we can't promise the name is free
            _ => false,
        }
    }

    pub fn is_selected(&self, tag: &Tag) -> bool {
        match &self.state {
            State::Ready(reconciled) => reconciled.selected.contains(&tag.key()),
            _ => false,
        }
    }

    /// Creates a custom tag named `query` for the composing user, then
    /// selects it - someone who just typed a brand-new tag means to apply
    /// it.
    ///
    /// The remote row is written first; nothing changes locally unless the
    /// store confirms ([`CatalogError::PersistFailed`] otherwise). If the
    /// name turns out to already exist - caught by the re-check here, or
    /// by the store's uniqueness constraint - the existing tag is selected
    /// instead, and that's a success.
    #[tracing::instrument(skip(self))]
    pub async fn add_custom_tag(&mut self, query: &str) -> Result<Tag, CatalogError> {
        let name = query.trim().to_string();
        if name.is_empty() {
            return Err(CatalogError::InvalidOperation(String::from(
                "can't add a tag with an empty name",
            )));
        }

        if !matches!(self.state, State::Ready(_)) {
            return Err(CatalogError::InvalidOperation(String::from(
                "the catalog isn't loaded yet",
            )));
        }

        // re-check right before the write. the caller saw `is_new_entry`
        // come back true at some point, but the catalog may have moved
        // since (the remaining check-to-write window is the store's
        // constraint's problem, handled below)
        if !self.is_new_entry(&name) {
            tracing::debug!(name = %name, "tag already exists. selecting it instead");
            return self.select_existing(&normalized(&name));
        }

        let inserted = self
            .store
            .insert_tag(&self.category, self.user, &name)
            .await;

        match inserted {
            Ok(()) => {}
            Err(StoreError::AlreadyExists) => {
                // another device of ours won the race. the row is there
                // with this exact name, so adopt it as if we'd loaded it
                tracing::debug!(name = %name, "remote already has this tag. adopting it");
            }
            Err(e) => {
                tracing::warn!("couldn't persist the new tag. err: {e}");
                return Err(CatalogError::PersistFailed(e));
            }
        }

        let tag = Tag::new(
            name,
            self.category.clone(),
            TagOrigin::Custom { owner: self.user },
        );

        let State::Ready(reconciled) = &mut self.state else {
            // checked above, and we hold `&mut self` across the await
            return Err(CatalogError::InvalidOperation(String::from(
                "the catalog isn't loaded yet",
            )));
        };

        reconciled.tags.push(tag.clone());
        reconciled.select(tag.key());

        Ok(tag)
    }

    /// Deletes one of the composing user's custom tags, remotely and then
    /// locally. A selected tag also leaves the selection - no dangling
    /// picks.
    ///
    /// Shared tags and other users' tags are off limits
    /// ([`CatalogError::InvalidOperation`]); a failed remote delete leaves
    /// everything untouched ([`CatalogError::PersistFailed`]).
    #[tracing::instrument(skip(self, tag), fields(name = tag.name()))]
    pub async fn delete_custom_tag(&mut self, tag: &Tag) -> Result<(), CatalogError> {
        let key = tag.key();

        // resolve against our own state. the caller's copy might be stale
        let name = {
            let State::Ready(reconciled) = &self.state else {
                return Err(CatalogError::InvalidOperation(String::from(
                    "the catalog isn't loaded yet",
                )));
            };

            let Some(existing) = reconciled.find(&key) else {
                return Err(CatalogError::InvalidOperation(format!(
                    "no tag named `{}` in this catalog",
                    tag.name()
                )));
            };

            match existing.origin() {
                TagOrigin::Global => {
                    return Err(CatalogError::InvalidOperation(format!(
                        "`{}` is a shared tag. it can't be deleted from here",
                        existing.name()
                    )));
                }
                TagOrigin::Custom { owner } if *owner != self.user => {
                    return Err(CatalogError::InvalidOperation(format!(
                        "`{}` belongs to another user",
                        existing.name()
                    )));
                }
                TagOrigin::Custom { .. } => {}
            }

            existing.name().to_string()
        };

        self.store
            .delete_tag(&self.category, self.user, &name)
            .await
            .inspect_err(|e| tracing::warn!("couldn't delete the tag remotely. err: {e}"))
            .map_err(CatalogError::PersistFailed)?;

        if let State::Ready(reconciled) = &mut self.state {
            reconciled.remove(&key);
        }

        Ok(())
    }

    /// Idempotent selection flip. Picked tags get unpicked and vice versa.
    ///
    /// Selection is session-local, so this never touches the store and
    /// never fails. Toggling a tag the catalog doesn't know (or toggling
    /// before a load) is a no-op - the selection only ever references
    /// tags that exist.
    pub fn toggle_selection(&mut self, tag: &Tag) {
        let State::Ready(reconciled) = &mut self.state else {
            tracing::trace!("toggle on an unloaded catalog. ignoring");
            return;
        };

        let key = tag.key();

        if !reconciled.contains(&key) {
            tracing::trace!(name = tag.name(), "toggle for an unknown tag. ignoring");
            return;
        }

        if let Some(pos) = reconciled.selected.iter().position(|k| *k == key) {
            reconciled.selected.remove(pos);
        } else {
            reconciled.selected.push(key);
        }
    }

    /// Pre-seeds the selection from a post being edited.
    ///
    /// Names that no longer match a catalog tag are skipped - the tag may
    /// have been deleted since the post was written.
    pub fn seed_selection<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) {
        let State::Ready(reconciled) = &mut self.state else {
            tracing::trace!("seed on an unloaded catalog. ignoring");
            return;
        };

        for name in names {
            let key = normalized(name);

            if reconciled.contains(&key) {
                reconciled.select(key);
            } else {
                tracing::debug!(name, "seeded tag isn't in the catalog anymore. skipping");
            }
        }
    }

    /// The display strings of every selected tag, in the order they were
    /// picked. This is the value the post-save flow writes onto the post
    /// record, verbatim.
    pub fn snapshot_selected(&self) -> Vec<String> {
        match &self.state {
            State::Ready(reconciled) => reconciled
                .selected
                .iter()
                .filter_map(|key| reconciled.find(key))
                .map(|t| t.name().to_string())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Selects the tag matching `key` and hands back a copy of it.
    fn select_existing(&mut self, key: &str) -> Result<Tag, CatalogError> {
        let State::Ready(reconciled) = &mut self.state else {
            return Err(CatalogError::InvalidOperation(String::from(
                "the catalog isn't loaded yet",
            )));
        };

        let Some(tag) = reconciled.find(key).cloned() else {
            return Err(CatalogError::InvalidOperation(format!(
                "no tag with key `{key}` in this catalog"
            )));
        };

        reconciled.select(tag.key());
        Ok(tag)
    }
}
