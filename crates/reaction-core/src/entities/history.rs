//! Per-user contribution history
//!
//! Records how many times each user contributed each emoji, so a repeated
//! reaction can be recognized as an undo.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::value_objects::UserId;

/// user -> emoji -> contribution count
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PerUserHistory {
    counts: BTreeMap<UserId, BTreeMap<String, u32>>,
}

impl PerUserHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contribution count of `emoji` by `user`
    pub fn get(&self, user: UserId, emoji: &str) -> u32 {
        self.counts
            .get(&user)
            .and_then(|emoji_counts| emoji_counts.get(emoji))
            .copied()
            .unwrap_or(0)
    }

    /// Record one contribution
    pub fn add(&mut self, user: UserId, emoji: &str) {
        *self
            .counts
            .entry(user)
            .or_default()
            .entry(emoji.to_string())
            .or_insert(0) += 1;
    }

    /// Withdraw one contribution. Records reaching zero are deleted, as are
    /// users left without records.
    pub fn remove(&mut self, user: UserId, emoji: &str) {
        let Some(emoji_counts) = self.counts.get_mut(&user) else {
            return;
        };
        if let Some(count) = emoji_counts.get_mut(emoji) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                emoji_counts.remove(emoji);
            }
        }
        if emoji_counts.is_empty() {
            self.counts.remove(&user);
        }
    }

    /// Set a raw record, used when decoding. Zero counts are not stored.
    pub fn insert(&mut self, user: UserId, emoji: String, count: u32) {
        if count == 0 {
            return;
        }
        self.counts.entry(user).or_default().insert(emoji, count);
    }

    /// Drop one user's whole history. Returns the evicted user.
    pub fn evict_one(&mut self) -> Option<UserId> {
        self.counts.pop_first().map(|(user, _)| user)
    }

    /// Number of users with recorded contributions
    pub fn user_count(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all contribution counts
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .flat_map(BTreeMap::values)
            .map(|&count| u64::from(count))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over users and their per-emoji counts
    pub fn iter(&self) -> impl Iterator<Item = (&UserId, &BTreeMap<String, u32>)> {
        self.counts.iter()
    }
}
