//! Represents tags in all their glory.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's unique identifier, as handed out by the backend's auth session.
pub type UserId = Uuid;

/// A namespace for tags. Brands and occasions live in different worlds, so
/// they get different categories and never mix in one catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category(String);

impl Category {
    /// The brand namespace ("Nike", "Zara", ...).
    pub fn brand() -> Self {
        Self(String::from("brand"))
    }

    /// The occasion namespace ("Wedding", "Hiking", ...).
    pub fn occasion() -> Self {
        Self(String::from("occasion"))
    }

    /// Any other namespace. New screens can bring their own.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a tag came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagOrigin {
    /// Shared across every user. Nobody owns it, and nobody can delete it
    /// from a phone.
    Global,

    /// Created by exactly one user, visible only to them.
    Custom { owner: UserId },
}

/// A display string scoped to a [`Category`].
///
/// The name keeps whatever casing the user typed, but two tags are "the
/// same" whenever their names match case-insensitively. Use [`Tag::key`]
/// for comparisons - never compare `name` directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    name: String,
    category: Category,
    origin: TagOrigin,
}

impl Tag {
    pub(crate) fn new(name: impl Into<String>, category: Category, origin: TagOrigin) -> Self {
        Self {
            name: name.into(),
            category,
            origin,
        }
    }

    /// The display string, casing preserved.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn origin(&self) -> &TagOrigin {
        &self.origin
    }

    /// The owning user, if this is a custom tag.
    pub fn owner(&self) -> Option<UserId> {
        match self.origin {
            TagOrigin::Global => None,
            TagOrigin::Custom { owner } => Some(owner),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.origin, TagOrigin::Custom { .. })
    }

    /// The tag's identity for equality and search purposes.
    pub fn key(&self) -> String {
        normalized(&self.name)
    }
}

/// Folds a raw string down to the form tags are compared in.
pub fn normalized(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_trims_and_lowercases() {
        assert_eq!(normalized("Nike "), "nike");
        assert_eq!(normalized("  MY brand"), "my brand");
        assert_eq!(normalized(""), "");
        assert_eq!(normalized("   "), "");
    }

    #[test]
    fn keys_match_across_casing() {
        let a = Tag::new("Nike", Category::brand(), TagOrigin::Global);
        let b = Tag::new(
            "NIKE",
            Category::brand(),
            TagOrigin::Custom {
                owner: Uuid::from_u128(1),
            },
        );

        assert_eq!(a.key(), b.key());
        assert_ne!(a.name(), b.name(), "display casing is preserved");
    }
}
