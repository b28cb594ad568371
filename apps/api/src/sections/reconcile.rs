//! Reconciliation — repairs drift between a document's stored layout/order and its
//! current section registry.
//!
//! Runs on every load and before every render or edit. It never fails: it only adds
//! keys that appeared (new built-ins, custom sections created elsewhere) and drops keys
//! that no longer exist. Running it on its own output changes nothing.

use serde::Serialize;
use tracing::debug;

use crate::models::resume::ResumeDocument;
use crate::sections::key::SectionKey;
use crate::sections::layout::{LayoutAssignment, LayoutRepair};
use crate::sections::order::SectionOrder;
use crate::sections::registry::{current_sections, enabled_optional_sections};

/// What reconciliation changed. Drift is repaired silently; this is for logs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    /// Optional-section flags were inferred or put back into canonical order.
    pub normalized_flags: bool,
    pub initialized_layout: bool,
    pub initialized_order: bool,
    pub layout: LayoutRepair,
    pub order_added: Vec<SectionKey>,
    pub order_dropped: Vec<SectionKey>,
    pub order_duplicates: Vec<SectionKey>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        !self.normalized_flags
            && !self.initialized_layout
            && !self.initialized_order
            && self.layout.is_empty()
            && self.order_added.is_empty()
            && self.order_dropped.is_empty()
            && self.order_duplicates.is_empty()
    }
}

/// A document whose layout is a partition of, and whose order is a permutation of,
/// its current registry.
///
/// Only [`reconcile`] builds one, so renderers and editing operations can rely on the
/// invariants without checking them. Layout and order are held outside the document
/// content and put back by [`ReconciledResume::into_document`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledResume {
    pub(crate) content: ResumeDocument,
    pub(crate) known: Vec<SectionKey>,
    pub(crate) layout: LayoutAssignment,
    pub(crate) order: SectionOrder,
}

impl ReconciledResume {
    /// Document content. Its `layout` and `section_order` fields are empty while the
    /// resume is held here; use [`Self::layout`] and [`Self::order`].
    pub fn content(&self) -> &ResumeDocument {
        &self.content
    }

    /// Current registry, in canonical order.
    pub fn known(&self) -> &[SectionKey] {
        &self.known
    }

    pub fn layout(&self) -> &LayoutAssignment {
        &self.layout
    }

    pub fn order(&self) -> &SectionOrder {
        &self.order
    }

    pub fn into_document(self) -> ResumeDocument {
        ResumeDocument {
            layout: Some(self.layout),
            section_order: Some(self.order),
            ..self.content
        }
    }

    #[cfg(test)]
    pub fn to_document(&self) -> ResumeDocument {
        self.clone().into_document()
    }

    /// Re-derives the registry after a change to the document's section set and
    /// repairs layout and order against it.
    pub(crate) fn refresh(&mut self) -> ReconcileReport {
        self.known = current_sections(&self.content);
        let mut report = ReconcileReport {
            layout: self.layout.repair(&self.known),
            ..Default::default()
        };
        repair_order(&mut self.order, &self.known, &mut report);
        debug_assert!(self.layout.is_partition_of(&self.known));
        report
    }
}

/// Reconciles `doc` and reports the drift that was repaired.
pub fn reconcile_with_report(mut doc: ResumeDocument) -> (ReconciledResume, ReconcileReport) {
    let enabled = enabled_optional_sections(&doc);
    let mut report = ReconcileReport {
        normalized_flags: doc.enabled_sections.as_ref() != Some(&enabled),
        ..Default::default()
    };
    doc.enabled_sections = Some(enabled);
    let known = current_sections(&doc);

    let mut layout = doc.layout.take().unwrap_or_else(|| {
        report.initialized_layout = true;
        LayoutAssignment::default_for(&known)
    });
    report.layout = layout.repair(&known);

    let mut order = doc.section_order.take().unwrap_or_else(|| {
        report.initialized_order = true;
        known.iter().cloned().collect()
    });
    repair_order(&mut order, &known, &mut report);
    debug_assert!(layout.is_partition_of(&known));

    let resume = ReconciledResume {
        content: doc,
        known,
        layout,
        order,
    };
    (resume, report)
}

/// Reconciles `doc`, logging any drift at debug level.
pub fn reconcile(doc: ResumeDocument) -> ReconciledResume {
    let (resume, report) = reconcile_with_report(doc);
    if !report.is_clean() {
        debug!(
            added = ?report.order_added,
            dropped = ?report.order_dropped,
            layout = ?report.layout,
            "Repaired section layout drift"
        );
    }
    resume
}

fn repair_order(order: &mut SectionOrder, known: &[SectionKey], report: &mut ReconcileReport) {
    report.order_duplicates = order.dedup();
    report.order_dropped = order.retain(|k| known.contains(k));
    for key in known {
        if !order.contains(key) {
            order.push(key.clone());
            report.order_added.push(key.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::CustomSection;
    use crate::sections::key::{BuiltinSection, CustomSectionId};
    use crate::sections::layout::{Region, RegionMode};

    fn names(keys: &[SectionKey]) -> Vec<&str> {
        keys.iter().map(|k| k.as_str()).collect()
    }

    fn keys(names: &[&str]) -> Vec<SectionKey> {
        names.iter().map(|n| SectionKey::from(*n)).collect()
    }

    fn custom(id: &str) -> CustomSection {
        CustomSection {
            id: CustomSectionId::new(id),
            title: "Talks".to_string(),
            content: "RustConf".to_string(),
        }
    }

    fn assert_invariants(resume: &ReconciledResume) {
        let known = resume.known();
        assert!(resume.layout().is_partition_of(known), "layout must partition registry");

        let mut ordered = resume.order().keys().to_vec();
        let mut expected = known.to_vec();
        ordered.sort();
        expected.sort();
        assert_eq!(ordered, expected, "order must be a permutation of registry");
    }

    // ── defaults ────────────────────────────────────────────────────────────

    #[test]
    fn test_new_document_gets_default_layout_and_order() {
        let (resume, report) = reconcile_with_report(ResumeDocument::default());

        assert!(report.initialized_layout);
        assert!(report.initialized_order);
        assert_eq!(
            names(resume.layout().members(Region::Sidebar)),
            vec!["skills", "education", "certifications"]
        );
        assert_eq!(
            names(resume.layout().members(Region::Main)),
            vec!["experience", "projects"]
        );
        assert_eq!(
            names(resume.order().keys()),
            vec!["skills", "experience", "education", "projects", "certifications"]
        );
    }

    #[test]
    fn test_new_document_with_contact_and_summary_defaults() {
        let doc = ResumeDocument {
            enabled_sections: Some(vec![BuiltinSection::Contact, BuiltinSection::Summary]),
            ..Default::default()
        };
        let resume = reconcile(doc);
        assert_eq!(
            names(resume.layout().members(Region::Sidebar)),
            vec!["contact", "skills", "education", "certifications"]
        );
        assert_eq!(
            names(resume.layout().members(Region::Main)),
            vec!["summary", "experience", "projects"]
        );
        assert_eq!(resume.order().keys()[0].as_str(), "contact");
        assert_invariants(&resume);
    }

    // ── drift repair ────────────────────────────────────────────────────────

    #[test]
    fn test_custom_section_added_outside_editor_lands_in_main_and_last() {
        let mut doc = reconcile(ResumeDocument::default()).into_document();
        doc.custom_sections.push(custom("custom_1"));

        let resume = reconcile(doc);
        let key = SectionKey::from("custom_1");

        assert_eq!(resume.layout().region_of(&key), Some(Region::Main));
        assert_eq!(resume.order().keys().last(), Some(&key));
        assert_invariants(&resume);
    }

    #[test]
    fn test_removed_sidebar_section_disappears_without_reordering_others() {
        let mut doc = ResumeDocument {
            custom_sections: vec![custom("custom_a"), custom("custom_b")],
            ..Default::default()
        };
        let mut resume = reconcile(doc.clone());
        let a = SectionKey::from("custom_a");
        resume.layout.move_between_regions(&a, Region::Main, Region::Sidebar);
        doc = resume.into_document();
        let before: Vec<SectionKey> = doc
            .section_order
            .as_ref()
            .map(|o| o.keys().iter().filter(|k| **k != a).cloned().collect())
            .unwrap_or_default();

        doc.custom_sections.retain(|s| s.id.as_str() != "custom_a");
        let (resume, report) = reconcile_with_report(doc);

        assert_eq!(names(&report.order_dropped), vec!["custom_a"]);
        assert!(!resume.layout().members(Region::Sidebar).contains(&a));
        assert!(!resume.order().contains(&a));
        assert_eq!(resume.order().keys(), before.as_slice());
        assert_invariants(&resume);
    }

    #[test]
    fn test_missing_key_in_stored_order_is_appended() {
        let doc = ResumeDocument {
            section_order: Some(SectionOrder::new(keys(&[
                "certifications",
                "skills",
                "experience",
                "education",
            ]))),
            layout: Some(LayoutAssignment::default_for(&keys(&[
                "skills",
                "experience",
                "education",
                "projects",
                "certifications",
            ]))),
            ..Default::default()
        };

        let (resume, report) = reconcile_with_report(doc);

        assert_eq!(
            names(resume.order().keys()),
            vec!["certifications", "skills", "experience", "education", "projects"]
        );
        assert_eq!(names(&report.order_added), vec!["projects"]);
        assert!(report.layout.is_empty());
    }

    #[test]
    fn test_foreign_and_duplicate_keys_are_removed() {
        let doc = ResumeDocument {
            section_order: Some(SectionOrder::new(keys(&[
                "skills",
                "custom_ghost",
                "skills",
                "experience",
            ]))),
            layout: Some(LayoutAssignment::from_regions(
                keys(&["skills", "custom_ghost"]),
                keys(&["experience", "skills"]),
            )),
            ..Default::default()
        };

        let resume = reconcile(doc);

        assert_eq!(
            names(resume.order().keys()),
            vec!["skills", "experience", "education", "projects", "certifications"]
        );
        assert_eq!(
            resume.layout().region_of(&"skills".into()),
            Some(Region::Sidebar)
        );
        assert_invariants(&resume);
    }

    #[test]
    fn test_legacy_single_column_layout_is_kept_single() {
        let doc = ResumeDocument {
            layout: Some(LayoutAssignment::from_regions(
                vec![],
                keys(&["skills", "experience", "education", "projects", "certifications"]),
            )),
            ..Default::default()
        };
        let resume = reconcile(doc);
        assert_eq!(resume.layout().mode(), RegionMode::Single);
        assert!(resume.layout().members(Region::Sidebar).is_empty());
        assert_invariants(&resume);
    }

    #[test]
    fn test_legacy_contact_in_order_is_kept() {
        let doc = ResumeDocument {
            section_order: Some(SectionOrder::new(keys(&[
                "contact",
                "skills",
                "experience",
                "education",
                "projects",
                "certifications",
            ]))),
            ..Default::default()
        };
        let resume = reconcile(doc);
        assert_eq!(
            resume.content().enabled_sections,
            Some(vec![BuiltinSection::Contact])
        );
        assert_eq!(resume.order().keys()[0].as_str(), "contact");
        assert_invariants(&resume);
    }

    #[test]
    fn test_out_of_order_flags_are_normalized_and_reported() {
        let doc = reconcile(ResumeDocument::default()).into_document();
        let doc = ResumeDocument {
            enabled_sections: Some(vec![BuiltinSection::Summary, BuiltinSection::Contact]),
            ..doc
        };

        let (resume, report) = reconcile_with_report(doc);
        assert!(report.normalized_flags);
        assert!(!report.is_clean());
        assert_eq!(
            resume.content().enabled_sections,
            Some(vec![BuiltinSection::Contact, BuiltinSection::Summary])
        );

        let (_, second) = reconcile_with_report(resume.into_document());
        assert!(second.is_clean());
    }

    // ── idempotence ─────────────────────────────────────────────────────────

    #[test]
    fn test_reconcile_is_idempotent() {
        let doc = ResumeDocument {
            custom_sections: vec![custom("custom_a")],
            section_order: Some(SectionOrder::new(keys(&[
                "custom_ghost",
                "projects",
                "projects",
                "skills",
            ]))),
            layout: Some(LayoutAssignment::from_regions(
                keys(&["projects", "custom_ghost"]),
                keys(&["skills", "projects"]),
            )),
            ..Default::default()
        };

        let once = reconcile(doc).into_document();
        let (twice, report) = reconcile_with_report(once.clone());

        assert!(report.is_clean());
        assert_eq!(twice.into_document(), once);
    }

    #[test]
    fn test_reconciled_document_round_trips_through_json() {
        let once = reconcile(ResumeDocument {
            custom_sections: vec![custom("custom_a")],
            ..Default::default()
        })
        .into_document();

        let json = serde_json::to_value(&once).unwrap();
        let back: ResumeDocument = serde_json::from_value(json).unwrap();
        let (again, report) = reconcile_with_report(back);

        assert!(report.is_clean());
        assert_eq!(again.into_document(), once);
    }
}
