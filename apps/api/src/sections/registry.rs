//! The universe of valid section keys for a document.

use std::collections::HashSet;

use crate::models::resume::ResumeDocument;
use crate::sections::key::{BuiltinSection, SectionKey};
use crate::sections::layout::Region;

/// Optional built-ins the document has opted into.
///
/// Documents stored before `enabledSections` existed carry no flags; for those an
/// optional built-in counts as enabled when the stored order or layout mentions it.
pub fn enabled_optional_sections(doc: &ResumeDocument) -> Vec<BuiltinSection> {
    let optional = BuiltinSection::CANONICAL
        .into_iter()
        .filter(BuiltinSection::is_optional);

    match &doc.enabled_sections {
        Some(flags) => optional.filter(|b| flags.contains(b)).collect(),
        None => {
            let mentioned = stored_keys(doc);
            optional
                .filter(|b| mentioned.contains(&SectionKey::Builtin(*b)))
                .collect()
        }
    }
}

fn stored_keys(doc: &ResumeDocument) -> HashSet<SectionKey> {
    let mut keys = HashSet::new();
    if let Some(order) = &doc.section_order {
        keys.extend(order.keys().iter().cloned());
    }
    if let Some(layout) = &doc.layout {
        for region in Region::ALL {
            keys.extend(layout.members(region).iter().cloned());
        }
    }
    keys
}

/// Every section key currently valid for `doc`, in canonical order: built-ins first,
/// then custom sections in the order the document lists them.
///
/// Total and side-effect free. Custom sections sharing an id are listed once; a custom
/// id that collides with a built-in name is not a section key at all.
pub fn current_sections(doc: &ResumeDocument) -> Vec<SectionKey> {
    let optional = enabled_optional_sections(doc);
    let mut seen = HashSet::new();

    BuiltinSection::CANONICAL
        .into_iter()
        .filter(|b| !b.is_optional() || optional.contains(b))
        .map(SectionKey::Builtin)
        .chain(
            doc.custom_sections
                .iter()
                .filter(|s| BuiltinSection::parse(s.id.as_str()).is_none())
                .map(|s| SectionKey::Custom(s.id.clone())),
        )
        .filter(|k| seen.insert(k.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::CustomSection;
    use crate::sections::key::CustomSectionId;
    use crate::sections::order::SectionOrder;

    fn names(keys: &[SectionKey]) -> Vec<&str> {
        keys.iter().map(|k| k.as_str()).collect()
    }

    fn custom(id: &str) -> CustomSection {
        CustomSection {
            id: CustomSectionId::new(id),
            title: "Volunteering".to_string(),
            content: String::new(),
        }
    }

    #[test]
    fn test_empty_document_has_core_builtins_only() {
        let doc = ResumeDocument::default();
        assert_eq!(
            names(&current_sections(&doc)),
            vec!["skills", "experience", "education", "projects", "certifications"]
        );
    }

    #[test]
    fn test_enabled_optional_sections_follow_canonical_order() {
        let doc = ResumeDocument {
            enabled_sections: Some(vec![BuiltinSection::Summary, BuiltinSection::Contact]),
            ..Default::default()
        };
        let keys = current_sections(&doc);
        assert_eq!(names(&keys[..3]), vec!["contact", "summary", "skills"]);
    }

    #[test]
    fn test_non_optional_flags_are_ignored() {
        let doc = ResumeDocument {
            enabled_sections: Some(vec![BuiltinSection::Skills]),
            ..Default::default()
        };
        assert_eq!(current_sections(&doc).len(), 5);
    }

    #[test]
    fn test_legacy_document_infers_contact_from_stored_order() {
        let doc = ResumeDocument {
            section_order: Some(SectionOrder::new(vec!["contact".into(), "skills".into()])),
            ..Default::default()
        };
        assert_eq!(enabled_optional_sections(&doc), vec![BuiltinSection::Contact]);
        assert_eq!(current_sections(&doc)[0].as_str(), "contact");
    }

    #[test]
    fn test_explicit_flags_override_stored_mentions() {
        let doc = ResumeDocument {
            enabled_sections: Some(vec![]),
            section_order: Some(SectionOrder::new(vec!["contact".into()])),
            ..Default::default()
        };
        assert!(enabled_optional_sections(&doc).is_empty());
    }

    #[test]
    fn test_custom_sections_follow_builtins_and_dedupe() {
        let doc = ResumeDocument {
            custom_sections: vec![custom("custom_a"), custom("custom_b"), custom("custom_a")],
            ..Default::default()
        };
        let keys = current_sections(&doc);
        assert_eq!(names(&keys[5..]), vec!["custom_a", "custom_b"]);
    }

    #[test]
    fn test_custom_id_shadowing_builtin_is_ignored() {
        let doc = ResumeDocument {
            custom_sections: vec![custom("summary")],
            ..Default::default()
        };
        let keys = current_sections(&doc);
        assert_eq!(keys.len(), 5);
        assert!(!keys.iter().any(|k| k.as_str() == "summary"));
    }
}
