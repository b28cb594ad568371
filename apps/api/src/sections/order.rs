//! Section Order — one canonical sequence over every section key.
//!
//! The same sequence serves two purposes: document order in single-column mode, and the
//! within-region order in two-region mode (via [`SectionOrder::project`]). There are no
//! per-region order lists to drift out of sync.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sections::key::SectionKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionOrder(Vec<SectionKey>);

impl SectionOrder {
    #[cfg(test)]
    pub fn new(keys: Vec<SectionKey>) -> Self {
        Self(keys)
    }

    pub fn keys(&self) -> &[SectionKey] {
        &self.0
    }

    pub fn position(&self, key: &SectionKey) -> Option<usize> {
        self.0.iter().position(|k| k == key)
    }

    pub fn contains(&self, key: &SectionKey) -> bool {
        self.0.contains(key)
    }

    pub(crate) fn push(&mut self, key: SectionKey) {
        if !self.contains(&key) {
            self.0.push(key);
        }
    }

    pub(crate) fn remove(&mut self, key: &SectionKey) -> bool {
        let before = self.0.len();
        self.0.retain(|k| k != key);
        before != self.0.len()
    }

    /// Keeps only keys accepted by `keep`, preserving relative order.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&SectionKey) -> bool) -> Vec<SectionKey> {
        let mut dropped = Vec::new();
        self.0.retain(|k| {
            let kept = keep(k);
            if !kept {
                dropped.push(k.clone());
            }
            kept
        });
        dropped
    }

    /// Drops repeated keys, keeping the first occurrence. Returns the duplicates removed.
    pub(crate) fn dedup(&mut self) -> Vec<SectionKey> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        self.0.retain(|k| {
            if seen.insert(k.clone()) {
                true
            } else {
                duplicates.push(k.clone());
                false
            }
        });
        duplicates
    }

    /// Swaps `key` with its neighbour in `direction`.
    ///
    /// Moving the first key up, the last key down, or a key that is not in the order
    /// leaves the sequence unchanged. Returns whether a swap happened.
    pub fn swap_adjacent(&mut self, key: &SectionKey, direction: Direction) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };
        let neighbour = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < self.0.len() => index + 1,
            _ => return false,
        };
        self.0.swap(index, neighbour);
        true
    }

    /// The subsequence of keys accepted by `member`, in order.
    /// Used to derive a region's rendering sequence from its membership set.
    pub fn project<'a>(
        &'a self,
        member: impl Fn(&SectionKey) -> bool + 'a,
    ) -> impl Iterator<Item = &'a SectionKey> + 'a {
        self.0.iter().filter(move |k| member(k))
    }
}

impl FromIterator<SectionKey> for SectionOrder {
    fn from_iter<T: IntoIterator<Item = SectionKey>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
