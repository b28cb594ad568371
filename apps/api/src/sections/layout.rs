//! Layout Assignment — partitions the section registry into named regions.
//!
//! # Invariant
//! Every key of the current registry sits in exactly one region. In single mode the
//! sidebar is empty and `main` holds every key; the last two-region split is kept in
//! `stashed_sidebar` so toggling modes does not lose the user's arrangement.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sections::key::SectionKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Sidebar,
    Main,
}

impl Region {
    /// Scan order for every region-wide pass. A key found in an earlier region wins.
    pub const ALL: [Region; 2] = [Region::Sidebar, Region::Main];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Sidebar => "sidebar",
            Region::Main => "main",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionMode {
    Single,
    TwoRegion,
}

/// Result of [`LayoutAssignment::move_between_regions`]. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved,
    /// The key was not in the claimed source region. Nothing changed.
    Stale,
    /// Source and target are the same region. Nothing changed.
    SameRegion,
}

/// Keys touched while restoring the partition invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRepair {
    pub added: Vec<SectionKey>,
    pub dropped: Vec<SectionKey>,
    pub duplicates: Vec<SectionKey>,
    pub folded: Vec<SectionKey>,
}

impl LayoutRepair {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.dropped.is_empty()
            && self.duplicates.is_empty()
            && self.folded.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LayoutWire", rename_all = "camelCase")]
pub struct LayoutAssignment {
    sidebar: Vec<SectionKey>,
    main: Vec<SectionKey>,
    mode: RegionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    stashed_sidebar: Option<Vec<SectionKey>>,
}

/// Stored layouts predate `mode`; an empty sidebar used to mean single column.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutWire {
    #[serde(default)]
    sidebar: Vec<SectionKey>,
    #[serde(default)]
    main: Vec<SectionKey>,
    #[serde(default)]
    mode: Option<RegionMode>,
    #[serde(default)]
    stashed_sidebar: Option<Vec<SectionKey>>,
}

impl From<LayoutWire> for LayoutAssignment {
    fn from(wire: LayoutWire) -> Self {
        let mode = wire.mode.unwrap_or(if wire.sidebar.is_empty() && !wire.main.is_empty() {
            RegionMode::Single
        } else {
            RegionMode::TwoRegion
        });
        Self {
            sidebar: wire.sidebar,
            main: wire.main,
            mode,
            stashed_sidebar: wire.stashed_sidebar,
        }
    }
}

impl LayoutAssignment {
    /// Two-region layout with the default split for `known`.
    pub fn default_for(known: &[SectionKey]) -> Self {
        let (sidebar, main): (Vec<SectionKey>, Vec<SectionKey>) =
            known.iter().cloned().partition(|k| k.default_in_sidebar());
        Self {
            sidebar,
            main,
            mode: RegionMode::TwoRegion,
            stashed_sidebar: None,
        }
    }

    #[cfg(test)]
    pub fn from_regions(sidebar: Vec<SectionKey>, main: Vec<SectionKey>) -> Self {
        LayoutWire {
            sidebar,
            main,
            mode: None,
            stashed_sidebar: None,
        }
        .into()
    }

    pub fn mode(&self) -> RegionMode {
        self.mode
    }

    pub fn members(&self, region: Region) -> &[SectionKey] {
        match region {
            Region::Sidebar => &self.sidebar,
            Region::Main => &self.main,
        }
    }

    fn members_mut(&mut self, region: Region) -> &mut Vec<SectionKey> {
        match region {
            Region::Sidebar => &mut self.sidebar,
            Region::Main => &mut self.main,
        }
    }

    pub fn region_of(&self, key: &SectionKey) -> Option<Region> {
        Region::ALL
            .into_iter()
            .find(|r| self.members(*r).contains(key))
    }

    #[cfg(test)]
    pub fn stashed_sidebar(&self) -> Option<&[SectionKey]> {
        self.stashed_sidebar.as_deref()
    }

    /// Moves `key` from `from` to `to`.
    ///
    /// A key that is not in `from` is left alone: a UI may issue a move after the
    /// section was removed elsewhere. In single mode the move is recorded against the
    /// stashed split and takes effect when the layout returns to two regions.
    pub fn move_between_regions(
        &mut self,
        key: &SectionKey,
        from: Region,
        to: Region,
    ) -> MoveOutcome {
        if from == to {
            return MoveOutcome::SameRegion;
        }
        match self.mode {
            RegionMode::TwoRegion => {
                let source = self.members_mut(from);
                let before = source.len();
                source.retain(|k| k != key);
                if source.len() == before {
                    return MoveOutcome::Stale;
                }
                let target = self.members_mut(to);
                if !target.contains(key) {
                    target.push(key.clone());
                }
                MoveOutcome::Moved
            }
            RegionMode::Single => {
                if !self.main.contains(key) {
                    return MoveOutcome::Stale;
                }
                let main = &self.main;
                let stash = self.stashed_sidebar.get_or_insert_with(|| {
                    main.iter().filter(|k| k.default_in_sidebar()).cloned().collect()
                });
                let in_sidebar = stash.contains(key);
                match (from, in_sidebar) {
                    (Region::Sidebar, true) => {
                        stash.retain(|k| k != key);
                        MoveOutcome::Moved
                    }
                    (Region::Main, false) => {
                        stash.push(key.clone());
                        MoveOutcome::Moved
                    }
                    _ => MoveOutcome::Stale,
                }
            }
        }
    }

    /// Switches between single and two-region topologies without losing the split.
    pub fn set_region_mode(&mut self, mode: RegionMode) -> bool {
        if self.mode == mode {
            return false;
        }
        match mode {
            RegionMode::Single => {
                let sidebar = std::mem::take(&mut self.sidebar);
                for key in &sidebar {
                    if !self.main.contains(key) {
                        self.main.push(key.clone());
                    }
                }
                self.stashed_sidebar = Some(sidebar);
            }
            RegionMode::TwoRegion => {
                let sidebar: Vec<SectionKey> = match self.stashed_sidebar.take() {
                    Some(stash) => stash.into_iter().filter(|k| self.main.contains(k)).collect(),
                    None => self
                        .main
                        .iter()
                        .filter(|k| k.default_in_sidebar())
                        .cloned()
                        .collect(),
                };
                self.main.retain(|k| !sidebar.contains(k));
                self.sidebar = sidebar;
            }
        }
        self.mode = mode;
        true
    }

    pub(crate) fn insert(&mut self, key: SectionKey, region: Region) {
        if self.region_of(&key).is_none() {
            let region = match self.mode {
                RegionMode::Single => Region::Main,
                RegionMode::TwoRegion => region,
            };
            self.members_mut(region).push(key);
        }
    }

    pub(crate) fn remove(&mut self, key: &SectionKey) {
        for region in Region::ALL {
            self.members_mut(region).retain(|k| k != key);
        }
        if let Some(stash) = self.stashed_sidebar.as_mut() {
            stash.retain(|k| k != key);
        }
    }

    /// Restores the partition invariant against `known`.
    ///
    /// Keys placed in more than one region keep their first placement; unknown keys are
    /// dropped; missing keys are appended to `main`. Running it twice changes nothing.
    pub(crate) fn repair(&mut self, known: &[SectionKey]) -> LayoutRepair {
        let mut repair = LayoutRepair::default();
        let known_set: HashSet<&SectionKey> = known.iter().collect();

        if self.mode == RegionMode::Single && !self.sidebar.is_empty() {
            for key in std::mem::take(&mut self.sidebar) {
                self.main.push(key.clone());
                repair.folded.push(key);
            }
        }

        let mut seen: HashSet<SectionKey> = HashSet::new();
        for region in Region::ALL {
            self.members_mut(region).retain(|k| {
                if !known_set.contains(k) {
                    repair.dropped.push(k.clone());
                    false
                } else if !seen.insert(k.clone()) {
                    repair.duplicates.push(k.clone());
                    false
                } else {
                    true
                }
            });
        }

        for key in known {
            if !seen.contains(key) {
                self.main.push(key.clone());
                repair.added.push(key.clone());
            }
        }

        if let Some(stash) = self.stashed_sidebar.as_mut() {
            let mut stash_seen = HashSet::new();
            stash.retain(|k| known_set.contains(k) && stash_seen.insert(k.clone()));
        }

        repair
    }

    /// True when every known key is placed exactly once and nothing else is placed.
    pub fn is_partition_of(&self, known: &[SectionKey]) -> bool {
        let placed: Vec<&SectionKey> = Region::ALL
            .into_iter()
            .flat_map(|r| self.members(r).iter())
            .collect();
        let unique: HashSet<&SectionKey> = placed.iter().copied().collect();
        let known_set: HashSet<&SectionKey> = known.iter().collect();
        placed.len() == unique.len() && unique == known_set
    }
}
