//! Editing operations over a reconciled resume.
//!
//! Every operation is total: out-of-range swaps, stale moves and unknown ids are
//! no-ops. Operations that change the section set (custom sections, optional
//! built-ins) update the registry, layout and order together.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::resume::CustomSection;
use crate::sections::key::{BuiltinSection, CustomSectionId, SectionKey};
use crate::sections::layout::{MoveOutcome, Region, RegionMode};
use crate::sections::order::Direction;
use crate::sections::reconcile::ReconciledResume;

pub const DEFAULT_CUSTOM_TITLE: &str = "New Section";

/// A single user edit, as sent by the editing UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    MoveSection {
        key: SectionKey,
        from: Region,
        to: Region,
    },
    SwapSection {
        key: SectionKey,
        direction: Direction,
    },
    SetRegionMode {
        mode: RegionMode,
    },
    AddCustomSection {
        #[serde(default)]
        title: Option<String>,
    },
    UpdateCustomSection {
        id: CustomSectionId,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        content: Option<String>,
    },
    RemoveCustomSection {
        id: CustomSectionId,
    },
    EnableSection {
        section: BuiltinSection,
    },
    DisableSection {
        section: BuiltinSection,
    },
}

/// Summary of a batch of edits, returned to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditReport {
    pub applied: usize,
    pub noops: usize,
    /// Moves whose key was no longer in the claimed source region.
    pub stale_moves: usize,
    pub created_sections: Vec<CustomSectionId>,
}

impl ReconciledResume {
    pub fn move_between_regions(
        &mut self,
        key: &SectionKey,
        from: Region,
        to: Region,
    ) -> MoveOutcome {
        let outcome = self.layout.move_between_regions(key, from, to);
        if outcome == MoveOutcome::Stale {
            warn!(
                key = %key,
                from = from.as_str(),
                to = to.as_str(),
                "Ignoring move of section not in its claimed source region"
            );
        }
        outcome
    }

    pub fn set_region_mode(&mut self, mode: RegionMode) -> bool {
        self.layout.set_region_mode(mode)
    }

    pub fn swap_adjacent(&mut self, key: &SectionKey, direction: Direction) -> bool {
        self.order.swap_adjacent(key, direction)
    }

    /// Creates a custom section at the end of the order, in `main`.
    pub fn add_custom_section(&mut self, title: Option<String>) -> CustomSectionId {
        let id = CustomSectionId::generate();
        self.content.custom_sections.push(CustomSection {
            id: id.clone(),
            title: title.unwrap_or_else(|| DEFAULT_CUSTOM_TITLE.to_string()),
            content: String::new(),
        });
        let key = SectionKey::Custom(id.clone());
        self.known.push(key.clone());
        self.layout.insert(key.clone(), Region::Main);
        self.order.push(key);
        id
    }

    /// Edits title and/or content. Placement is untouched.
    pub fn update_custom_section(
        &mut self,
        id: &CustomSectionId,
        title: Option<String>,
        content: Option<String>,
    ) -> bool {
        let Some(section) = self.content.custom_section_mut(id) else {
            return false;
        };
        if let Some(title) = title {
            section.title = title;
        }
        if let Some(content) = content {
            section.content = content;
        }
        true
    }

    /// Deletes a custom section and its key from layout and order.
    pub fn remove_custom_section(&mut self, id: &CustomSectionId) -> bool {
        let before = self.content.custom_sections.len();
        self.content.custom_sections.retain(|s| &s.id != id);
        if self.content.custom_sections.len() == before {
            return false;
        }
        let key = SectionKey::Custom(id.clone());
        self.known.retain(|k| k != &key);
        self.layout.remove(&key);
        self.order.remove(&key);
        true
    }

    /// Opts into an optional built-in. It joins `main` and the end of the order.
    pub fn enable_section(&mut self, section: BuiltinSection) -> bool {
        self.set_section_enabled(section, true)
    }

    pub fn disable_section(&mut self, section: BuiltinSection) -> bool {
        self.set_section_enabled(section, false)
    }

    fn set_section_enabled(&mut self, section: BuiltinSection, enabled: bool) -> bool {
        if !section.is_optional() {
            return false;
        }
        let flags = self.content.enabled_sections.get_or_insert_with(Vec::new);
        if flags.contains(&section) == enabled {
            return false;
        }
        if enabled {
            flags.push(section);
            // Declaration order is canonical order.
            flags.sort_unstable();
        } else {
            flags.retain(|b| *b != section);
        }
        self.refresh();
        true
    }

    /// Applies one command. Returns whether anything changed.
    pub fn apply(&mut self, command: EditCommand, report: &mut EditReport) -> bool {
        let changed = match command {
            EditCommand::MoveSection { key, from, to } => {
                let outcome = self.move_between_regions(&key, from, to);
                if outcome == MoveOutcome::Stale {
                    report.stale_moves += 1;
                }
                outcome == MoveOutcome::Moved
            }
            EditCommand::SwapSection { key, direction } => self.swap_adjacent(&key, direction),
            EditCommand::SetRegionMode { mode } => self.set_region_mode(mode),
            EditCommand::AddCustomSection { title } => {
                let id = self.add_custom_section(title);
                report.created_sections.push(id);
                true
            }
            EditCommand::UpdateCustomSection { id, title, content } => {
                self.update_custom_section(&id, title, content)
            }
            EditCommand::RemoveCustomSection { id } => self.remove_custom_section(&id),
            EditCommand::EnableSection { section } => self.enable_section(section),
            EditCommand::DisableSection { section } => self.disable_section(section),
        };
        if changed {
            report.applied += 1;
        } else {
            report.noops += 1;
        }
        changed
    }

    /// Applies commands in order.
    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = EditCommand>) -> EditReport {
        let mut report = EditReport::default();
        for command in commands {
            self.apply(command, &mut report);
        }
        report
    }
}
