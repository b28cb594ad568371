//! Property tests: layout and order invariants over arbitrary stored documents and
//! arbitrary edit sequences.

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use proptest::sample::select;
use serde_json::{json, Value};

use crate::models::resume::{CustomSection, ResumeDocument};
use crate::sections::editor::{EditCommand, EditReport};
use crate::sections::key::{BuiltinSection, CustomSectionId, SectionKey};
use crate::sections::layout::{LayoutAssignment, MoveOutcome, Region, RegionMode};
use crate::sections::order::{Direction, SectionOrder};
use crate::sections::reconcile::{reconcile, reconcile_with_report, ReconciledResume};

/// Built-ins, custom ids that may or may not exist, and one that never does.
const KEY_POOL: &[&str] = &[
    "contact",
    "summary",
    "skills",
    "experience",
    "education",
    "projects",
    "certifications",
    "custom_a",
    "custom_b",
    "custom_c",
    "custom_ghost",
];

/// `skills` here is a custom section whose id shadows a built-in.
const CUSTOM_IDS: &[&str] = &["custom_a", "custom_b", "custom_c", "skills"];

fn key() -> impl Strategy<Value = SectionKey> {
    select(KEY_POOL).prop_map(SectionKey::from)
}

fn builtin() -> impl Strategy<Value = BuiltinSection> {
    select(BuiltinSection::CANONICAL.to_vec())
}

fn region() -> impl Strategy<Value = Region> {
    prop_oneof![Just(Region::Sidebar), Just(Region::Main)]
}

fn region_mode() -> impl Strategy<Value = RegionMode> {
    prop_oneof![Just(RegionMode::Single), Just(RegionMode::TwoRegion)]
}

fn custom_id() -> impl Strategy<Value = CustomSectionId> {
    select(CUSTOM_IDS).prop_map(CustomSectionId::new)
}

/// Stored layouts as they appear at rest, with or without `mode` and a stash.
fn stored_layout() -> impl Strategy<Value = LayoutAssignment> {
    (
        vec(key(), 0..8),
        vec(key(), 0..8),
        option::of(region_mode()),
        option::of(vec(key(), 0..5)),
    )
        .prop_map(|(sidebar, main, mode, stash)| {
            let mut wire = json!({ "sidebar": sidebar, "main": main });
            if let Some(mode) = mode {
                wire["mode"] = json!(mode);
            }
            if let Some(stash) = stash {
                wire["stashedSidebar"] = json!(stash);
            }
            serde_json::from_value(wire).unwrap()
        })
}

fn document() -> impl Strategy<Value = ResumeDocument> {
    (
        option::of(vec(builtin(), 0..4)),
        vec((select(CUSTOM_IDS), "[a-z ]{0,6}", "[a-z ]{0,6}"), 0..4),
        option::of(vec(key(), 0..12)),
        option::of(stored_layout()),
    )
        .prop_map(|(flags, customs, order, layout)| ResumeDocument {
            enabled_sections: flags,
            custom_sections: customs
                .into_iter()
                .map(|(id, title, content)| CustomSection {
                    id: CustomSectionId::new(id),
                    title,
                    content,
                })
                .collect(),
            section_order: order.map(SectionOrder::new),
            layout,
            ..Default::default()
        })
}

fn command() -> impl Strategy<Value = EditCommand> {
    let direction = prop_oneof![Just(Direction::Up), Just(Direction::Down)];
    prop_oneof![
        (key(), region(), region())
            .prop_map(|(key, from, to)| EditCommand::MoveSection { key, from, to }),
        (key(), direction).prop_map(|(key, direction)| EditCommand::SwapSection { key, direction }),
        region_mode().prop_map(|mode| EditCommand::SetRegionMode { mode }),
        option::of("[A-Za-z]{0,8}").prop_map(|title| EditCommand::AddCustomSection { title }),
        (custom_id(), option::of("[a-z]{0,4}"), option::of("[a-z]{0,4}")).prop_map(
            |(id, title, content)| EditCommand::UpdateCustomSection { id, title, content }
        ),
        custom_id().prop_map(|id| EditCommand::RemoveCustomSection { id }),
        builtin().prop_map(|section| EditCommand::EnableSection { section }),
        builtin().prop_map(|section| EditCommand::DisableSection { section }),
    ]
}

fn check_invariants(resume: &ReconciledResume) -> Result<(), TestCaseError> {
    let known = resume.known();
    prop_assert!(
        resume.layout().is_partition_of(known),
        "layout {:?} does not partition {:?}",
        resume.layout(),
        known
    );

    let mut ordered = resume.order().keys().to_vec();
    let mut expected = known.to_vec();
    ordered.sort();
    expected.sort();
    prop_assert_eq!(ordered, expected);
    Ok(())
}

/// Reconciling `doc` again, directly and after a JSON round trip, changes nothing.
fn check_stable(doc: &ResumeDocument) -> Result<(), TestCaseError> {
    let (again, report) = reconcile_with_report(doc.clone());
    prop_assert!(report.is_clean(), "second pass repaired {:?}", report);
    prop_assert_eq!(&again.into_document(), doc);

    let wire: Value = serde_json::to_value(doc).unwrap();
    let back: ResumeDocument = serde_json::from_value(wire).unwrap();
    let (again, report) = reconcile_with_report(back);
    prop_assert!(report.is_clean(), "wire round trip repaired {:?}", report);
    prop_assert_eq!(&again.into_document(), doc);
    Ok(())
}

proptest! {
    #[test]
    fn reconciled_documents_partition_and_permute_the_registry(doc in document()) {
        check_invariants(&reconcile(doc))?;
    }

    #[test]
    fn reconcile_is_idempotent_and_survives_the_wire(doc in document()) {
        let once = reconcile(doc).into_document();
        check_stable(&once)?;
    }

    #[test]
    fn edit_sequences_keep_every_invariant(
        doc in document(),
        commands in vec(command(), 0..12),
    ) {
        let mut resume = reconcile(doc);
        let mut report = EditReport::default();
        for command in commands {
            resume.apply(command, &mut report);
            check_invariants(&resume)?;
        }
        check_stable(&resume.into_document())?;
    }

    #[test]
    fn moved_key_leaves_source_and_joins_target(
        doc in document(),
        key in key(),
        from in region(),
        to in region(),
    ) {
        let mut resume = reconcile(doc);
        prop_assume!(resume.layout().mode() == RegionMode::TwoRegion);

        if resume.move_between_regions(&key, from, to) == MoveOutcome::Moved {
            prop_assert!(resume.layout().members(to).contains(&key));
            prop_assert!(!resume.layout().members(from).contains(&key));
        }
        check_invariants(&resume)?;
    }

    #[test]
    fn swap_exchanges_at_most_one_adjacent_pair(
        doc in document(),
        key in key(),
        up in any::<bool>(),
    ) {
        let mut resume = reconcile(doc);
        let before = resume.order().clone();
        let direction = if up { Direction::Up } else { Direction::Down };
        resume.swap_adjacent(&key, direction);

        let after = resume.order().keys();
        let changed: Vec<usize> = (0..after.len())
            .filter(|&i| before.keys()[i] != after[i])
            .collect();
        match changed.as_slice() {
            [] => {}
            [i, j] => prop_assert_eq!(*i + 1, *j),
            other => prop_assert!(false, "swap changed positions {:?}", other),
        }
        check_invariants(&resume)?;
    }
}
