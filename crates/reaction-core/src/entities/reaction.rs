//! Reaction set - emoji counts, target, and per-user history of one reaction post

use serde::Serialize;

use super::history::PerUserHistory;
use super::target::Target;
use crate::value_objects::UserId;

/// One emoji and how many times it was used
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionEntry {
    pub emoji: String,
    pub count: u32,
}

impl ReactionEntry {
    /// Create a new ReactionEntry
    pub fn new(emoji: impl Into<String>, count: u32) -> Self {
        Self {
            emoji: emoji.into(),
            count,
        }
    }

    /// Button label: the bare emoji for a single use, `"<count> <emoji>"` otherwise
    pub fn label(&self) -> String {
        if self.count > 1 {
            format!("{} {}", self.count, self.emoji)
        } else {
            self.emoji.clone()
        }
    }
}

/// Result of one toggle call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Tokens counted as new contributions, in input order
    pub added: Vec<String>,
    /// Tokens counted as undos, in input order
    pub removed: Vec<String>,
}

impl ToggleOutcome {
    #[inline]
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    #[inline]
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Notifications fire only when something was added
    #[inline]
    pub fn should_notify(&self) -> bool {
        !self.added.is_empty()
    }
}

/// All state carried by one reaction post
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReactionSet {
    entries: Vec<ReactionEntry>,
    pub target: Target,
    pub history: PerUserHistory,
}

impl ReactionSet {
    /// Create an empty set anchored at a target
    pub fn new(target: Target) -> Self {
        Self {
            entries: Vec::new(),
            target,
            history: PerUserHistory::new(),
        }
    }

    /// Assemble a set from decoded parts. Duplicate emoji are merged into the
    /// first occurrence and zero counts are dropped.
    pub fn from_parts(entries: Vec<ReactionEntry>, target: Target, history: PerUserHistory) -> Self {
        let mut set = Self::new(target);
        set.history = history;
        for entry in entries {
            if entry.count == 0 {
                continue;
            }
            match set.position(&entry.emoji) {
                Some(i) => set.entries[i].count = set.entries[i].count.saturating_add(entry.count),
                None => set.entries.push(entry),
            }
        }
        set
    }

    /// Entries in display order
    pub fn entries(&self) -> &[ReactionEntry] {
        &self.entries
    }

    /// Count for an emoji (0 when absent)
    pub fn count_of(&self, emoji: &str) -> u32 {
        self.position(emoji).map_or(0, |i| self.entries[i].count)
    }

    /// Sum of all entry counts
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.count)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that counts and history agree. Fails legitimately once history
    /// has been evicted to fit the size budget.
    pub fn is_consistent(&self) -> bool {
        self.total() == self.history.total()
    }

    /// Apply a user's reaction tokens.
    ///
    /// Each token reads the state left by the previous ones: a token the user
    /// already contributed is withdrawn, any other token is added. The same
    /// emoji twice in one call therefore cancels out.
    pub fn add_or_remove<I, S>(&mut self, user: UserId, tokens: I) -> ToggleOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outcome = ToggleOutcome::default();

        for token in tokens {
            let emoji = token.as_ref();
            if emoji.is_empty() {
                continue;
            }

            if self.history.get(user, emoji) > 0 {
                self.history.remove(user, emoji);
                self.decrement(emoji);
                outcome.removed.push(emoji.to_string());
            } else {
                self.history.add(user, emoji);
                self.increment(emoji);
                outcome.added.push(emoji.to_string());
            }
        }

        outcome
    }

    fn position(&self, emoji: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.emoji == emoji)
    }

    fn increment(&mut self, emoji: &str) {
        match self.position(emoji) {
            Some(i) => self.entries[i].count = self.entries[i].count.saturating_add(1),
            None => self.entries.push(ReactionEntry::new(emoji, 1)),
        }
    }

    fn decrement(&mut self, emoji: &str) {
        if let Some(i) = self.position(emoji) {
            let entry = &mut self.entries[i];
            entry.count = entry.count.saturating_sub(1);
            if entry.count == 0 {
                self.entries.remove(i);
            }
        }
    }
}
