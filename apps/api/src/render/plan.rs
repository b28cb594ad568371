//! Render plans — which sections each region shows, and in what sequence.
//!
//! A plan is what a template renderer consumes. It only ever contains keys from the
//! current registry. Sections without content are left out of the plan but stay in
//! the layout and order.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::resume::ResumeDocument;
use crate::models::template::{ColumnLayout, CustomTemplate};
use crate::render::descriptor::{descriptor, Placement, TemplateStyle};
use crate::sections::key::{BuiltinSection, SectionKey};
use crate::sections::layout::{Region, RegionMode};
use crate::sections::reconcile::ReconciledResume;

const UNTITLED: &str = "Untitled Section";

const FIXED_SPLIT_NOTICE: &str =
    "This template uses its own column split; sidebar and main customisations are not shown.";

const CUSTOM_COLUMNS_NOTICE: &str =
    "This template uses the columns from your template builder; sidebar and main customisations are not shown.";

/// A column on the rendered page. Shared layouts and two-column templates use
/// `Sidebar` and `Main`; three-column custom templates use `Left`, `Center` and `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanRegion {
    Sidebar,
    Main,
    Left,
    Center,
    Right,
}

impl From<Region> for PlanRegion {
    fn from(region: Region) -> Self {
        match region {
            Region::Sidebar => PlanRegion::Sidebar,
            Region::Main => PlanRegion::Main,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedSection {
    pub key: SectionKey,
    pub title: String,
    /// Rendered ahead of the ordered sections by the template itself.
    pub pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedRegion {
    pub region: PlanRegion,
    pub sections: Vec<PlannedSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub template: TemplateStyle,
    pub honors_shared_layout: bool,
    pub regions: Vec<PlannedRegion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

#[cfg(test)]
impl RenderPlan {
    pub fn region(&self, region: impl Into<PlanRegion>) -> Option<&PlannedRegion> {
        let region = region.into();
        self.regions.iter().find(|r| r.region == region)
    }

    /// Keys of `region` in render sequence. Empty when the region is not rendered.
    pub fn keys(&self, region: impl Into<PlanRegion>) -> Vec<&str> {
        self.region(region)
            .map(|r| r.sections.iter().map(|s| s.key.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Display title for any key. Custom keys fall back to a placeholder when the
/// section has no title.
pub fn section_title(doc: &ResumeDocument, key: &SectionKey) -> String {
    match key {
        SectionKey::Builtin(b) => b.title().to_string(),
        SectionKey::Custom(id) => doc
            .custom_section(id)
            .map(|s| s.title.trim())
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
            .to_string(),
    }
}

/// Whether `key` has anything to show.
pub fn has_content(doc: &ResumeDocument, key: &SectionKey) -> bool {
    let info = &doc.personal_info;
    match key {
        SectionKey::Builtin(BuiltinSection::Contact) => [
            &info.name,
            &info.email,
            &info.phone,
            &info.website,
            &info.linkedin,
            &info.github,
        ]
        .iter()
        .any(|f| !f.trim().is_empty()),
        SectionKey::Builtin(BuiltinSection::Summary) => !info.summary.trim().is_empty(),
        SectionKey::Builtin(BuiltinSection::Skills) => !doc.skills.is_empty(),
        SectionKey::Builtin(BuiltinSection::Experience) => !doc.experience.is_empty(),
        SectionKey::Builtin(BuiltinSection::Education) => !doc.education.is_empty(),
        SectionKey::Builtin(BuiltinSection::Projects) => !doc.projects.is_empty(),
        SectionKey::Builtin(BuiltinSection::Certifications) => !doc.certifications.is_empty(),
        SectionKey::Custom(id) => doc
            .custom_section(id)
            .is_some_and(|s| !s.title.trim().is_empty() && !s.content.trim().is_empty()),
    }
}

/// Plans `resume` for the template named in its personal info.
pub fn plan_for_document(resume: &ReconciledResume) -> RenderPlan {
    plan_render(resume, resume.content().personal_info.template)
}

pub fn plan_render(resume: &ReconciledResume, style: TemplateStyle) -> RenderPlan {
    let template = descriptor(style);

    let (regions, notice) = match template.placement {
        Placement::SingleColumn { lead } => {
            let sequence = resume.order().keys().iter().collect();
            (vec![arrange(resume, PlanRegion::Main, sequence, lead)], None)
        }
        Placement::SharedLayout { header, main_lead } => {
            (shared_layout(resume, header, main_lead), None)
        }
        Placement::FixedSplit { sidebar, main } => {
            (fixed_split(resume, sidebar, main), Some(FIXED_SPLIT_NOTICE))
        }
        Placement::CustomColumns => match &resume.content().custom_template {
            Some(custom) => (custom_columns(resume, custom), Some(CUSTOM_COLUMNS_NOTICE)),
            None => (shared_layout(resume, &[], &[]), None),
        },
    };

    RenderPlan {
        template: style,
        honors_shared_layout: template.honors_shared_layout && notice.is_none(),
        regions,
        notice,
    }
}

fn shared_layout(
    resume: &ReconciledResume,
    header: &[BuiltinSection],
    main_lead: &[BuiltinSection],
) -> Vec<PlannedRegion> {
    let order = resume.order();
    let layout = resume.layout();

    match layout.mode() {
        RegionMode::Single => {
            let sequence = order.keys().iter().collect();
            vec![arrange(resume, PlanRegion::Main, sequence, header)]
        }
        RegionMode::TwoRegion => Region::ALL
            .into_iter()
            .map(|region| {
                let lead: Vec<BuiltinSection> = match region {
                    Region::Main => header.iter().chain(main_lead).copied().collect(),
                    Region::Sidebar => header.to_vec(),
                };
                let members = layout.members(region);
                let sequence = order.project(|k| members.contains(k)).collect();
                arrange(resume, region.into(), sequence, &lead)
            })
            .collect(),
    }
}

fn fixed_split(
    resume: &ReconciledResume,
    sidebar: &[BuiltinSection],
    main: &[BuiltinSection],
) -> Vec<PlannedRegion> {
    let fixed = |list: &[BuiltinSection]| -> Vec<SectionKey> {
        list.iter().map(|b| SectionKey::Builtin(*b)).collect()
    };
    let sidebar_keys = fixed(sidebar);
    let mut main_keys = fixed(main);
    let unlisted: Vec<SectionKey> = resume
        .order()
        .keys()
        .iter()
        .filter(|k| !sidebar_keys.contains(*k) && !main_keys.contains(*k))
        .cloned()
        .collect();
    main_keys.extend(unlisted);
    vec![
        arrange(resume, PlanRegion::Sidebar, sidebar_keys.iter().collect(), &[]),
        arrange(resume, PlanRegion::Main, main_keys.iter().collect(), &[]),
    ]
}

/// Regions from a custom template's column lists.
///
/// A two- or three-column layout without a column configuration renders the shared
/// order in one column. A key listed in several columns appears in the first. Registry
/// keys no column lists follow the shared order at the end of the widest column.
fn custom_columns(resume: &ReconciledResume, custom: &CustomTemplate) -> Vec<PlannedRegion> {
    let shared = resume.order().keys();
    let (columns, overflow): (Vec<(PlanRegion, &[SectionKey])>, PlanRegion) =
        match (custom.layout, &custom.column_config) {
            (ColumnLayout::Single, _) => {
                (vec![(PlanRegion::Main, &custom.section_order[..])], PlanRegion::Main)
            }
            (ColumnLayout::TwoColumn, Some(config)) => (
                vec![
                    (PlanRegion::Sidebar, &config.left_column[..]),
                    (PlanRegion::Main, &config.right_column[..]),
                ],
                PlanRegion::Main,
            ),
            (ColumnLayout::ThreeColumn, Some(config)) => (
                vec![
                    (PlanRegion::Left, &config.left_column[..]),
                    (PlanRegion::Center, config.center_column.as_deref().unwrap_or(&[])),
                    (PlanRegion::Right, &config.right_column[..]),
                ],
                PlanRegion::Center,
            ),
            (_, None) => (vec![(PlanRegion::Main, shared)], PlanRegion::Main),
        };

    let known = resume.known();
    let mut placed: HashSet<&SectionKey> = HashSet::new();
    let mut sequences: Vec<(PlanRegion, Vec<&SectionKey>)> = columns
        .into_iter()
        .map(|(region, listed)| {
            let sequence = listed
                .iter()
                .filter(|k| known.contains(k) && placed.insert(*k))
                .collect();
            (region, sequence)
        })
        .collect();

    let unlisted: Vec<&SectionKey> = shared.iter().filter(|k| !placed.contains(k)).collect();
    if let Some((_, sequence)) = sequences.iter_mut().find(|(r, _)| *r == overflow) {
        sequence.extend(unlisted);
    }

    sequences
        .into_iter()
        .map(|(region, sequence)| arrange(resume, region, sequence, &[]))
        .collect()
}

/// Lead sections present in `sequence` first, then the rest of `sequence`. Keys outside
/// the registry and sections without content are skipped.
fn arrange(
    resume: &ReconciledResume,
    region: PlanRegion,
    sequence: Vec<&SectionKey>,
    lead: &[BuiltinSection],
) -> PlannedRegion {
    let doc = resume.content();
    let is_lead = |k: &SectionKey| k.builtin().is_some_and(|b| lead.contains(&b));

    let pinned = lead
        .iter()
        .map(|b| SectionKey::Builtin(*b))
        .filter(|k| sequence.iter().any(|s| *s == k))
        .map(|k| (k, true));
    let rest = sequence
        .iter()
        .filter(|k| !is_lead(**k))
        .map(|k| ((*k).clone(), false));

    let sections = pinned
        .chain(rest)
        .filter(|(k, _)| resume.known().contains(k) && has_content(doc, k))
        .map(|(key, pinned)| PlannedSection {
            title: section_title(doc, &key),
            key,
            pinned,
        })
        .collect();

    PlannedRegion { region, sections }
}
