//! The search screen's recent-queries list.

use crate::types::normalized;

/// Recently-run search queries, most recent first.
///
/// Repeat searches move to the front instead of showing up twice (compared
/// case-insensitively, like tags), and the list never grows past its
/// capacity. This lives and dies with the session.
#[derive(Clone, Debug)]
pub struct RecentSearches {
    entries: Vec<String>,
    capacity: usize,
}

impl RecentSearches {
    /// How many entries the search screen shows.
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Records a query the user just ran.
    pub fn push(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            tracing::trace!("ignoring an empty search query");
            return;
        }

        let key = normalized(query);
        self.entries.retain(|e| normalized(e) != key);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.capacity);
    }

    /// Most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for RecentSearches {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_recent_comes_first() {
        let mut recents = RecentSearches::default();
        recents.push("nike");
        recents.push("wedding");

        assert_eq!(recents.entries(), ["wedding", "nike"]);
    }

    #[test]
    fn repeats_move_to_front_without_duplicating() {
        let mut recents = RecentSearches::default();
        recents.push("nike");
        recents.push("zara");
        recents.push("NIKE ");

        // the fresh casing wins, the old entry is gone
        assert_eq!(recents.entries(), ["NIKE", "zara"]);
    }

    #[test]
    fn empty_queries_are_ignored() {
        let mut recents = RecentSearches::default();
        recents.push("   ");
        recents.push("");

        assert!(recents.entries().is_empty());
    }

    #[test]
    fn capacity_is_enforced() {
        let mut recents = RecentSearches::new(3);
        for q in ["a", "b", "c", "d"] {
            recents.push(q);
        }

        assert_eq!(recents.entries(), ["d", "c", "b"]);
    }
}
