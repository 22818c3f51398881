//! Integration tests: document → sheet → topic edits, checked against the
//! structural invariants after every mutation.

use pretty_assertions::assert_eq;
use xmind_core::{
    MindMapConfig, MindMapError, PdfExporter, Placement, PngExporter, Sheet,
    StructuralViolation, Topic, TopicId, TopicDefaults, XMind, check_document, check_sheet,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_clean(doc: &XMind) {
    let violations = check_document(doc);
    assert!(violations.is_empty(), "invariant violations: {violations:#?}");
}

/// Give `parent` `n` fresh children and return them.
fn grow(sheet: &mut Sheet, parent: TopicId, n: usize) -> Vec<TopicId> {
    (0..n)
        .map(|i| {
            let mut topic = Topic::default();
            topic.change_text(format!("child {i}"));
            let id = sheet.insert_topic(topic);
            sheet.add_child(parent, id).unwrap();
            id
        })
        .collect()
}

// ─── Document ────────────────────────────────────────────────────────────

#[test]
fn fresh_document_has_one_sheet_with_four_main_topics() {
    init_logging();
    let doc = XMind::new();
    assert_eq!(doc.sheet_count(), 1);
    let sheet = doc.first_sheet();
    assert_eq!(sheet.children(sheet.root()).len(), 4);
    assert_clean(&doc);
}

#[test]
fn add_sheet_grows_by_one_and_leaves_others_alone() {
    init_logging();
    let mut doc = XMind::new();
    let before = doc.first_sheet().outline();

    doc.add_sheet();

    assert_eq!(doc.sheet_count(), 2);
    assert_eq!(doc.first_sheet().outline(), before);
    assert_clean(&doc);
}

#[test]
fn inserted_sheet_can_be_removed_again() {
    let mut doc = XMind::new();
    let sheet = Sheet::default();
    let id = sheet.id();

    doc.insert_sheet(sheet);
    assert!(doc.sheet(id).is_some());
    assert_eq!(doc.remove_sheet(id), Ok(true));
    assert!(doc.sheet(id).is_none());
    assert_clean(&doc);
}

#[test]
fn export_names_follow_sheet_name() {
    let mut doc = XMind::new();
    let id = doc.first_sheet().id();
    doc.first_sheet_mut().rename_sheet("Sheet 1");

    assert_eq!(doc.export_sheet(id, &PngExporter), Ok("Sheet 1.png".to_string()));
    assert_eq!(doc.export_sheet(id, &PdfExporter), Ok("Sheet 1.pdf".to_string()));
    assert_eq!(doc.first_sheet().name(), "Sheet 1");
}

// ─── duplicate_sheet ─────────────────────────────────────────────────────

#[test]
fn duplicated_sheet_mirrors_shape_with_new_identities() {
    init_logging();
    let mut doc = XMind::new();
    let sheet = doc.first_sheet_mut();
    let root = sheet.root();
    let main = sheet.children(root);
    let kids = grow(sheet, main[0], 2);
    grow(sheet, kids[1], 3);
    sheet.add_floating_node();
    let original_id = sheet.id();

    let copy_id = doc.duplicate_sheet(original_id).unwrap();

    let original = doc.sheet(original_id).unwrap();
    let copy = doc.sheet(copy_id).unwrap();
    assert_eq!(copy.name(), "Mind Map - Copy");
    assert_eq!(
        copy.children(copy.root()).len(),
        original.children(original.root()).len()
    );
    assert_eq!(copy.descendants(copy.root()).len(), 4 + 2 + 3);
    assert_eq!(copy.floating().len(), 1);
    for id in copy.topic_ids() {
        assert!(!original.contains(id), "copy aliases topic {id}");
    }
    assert_clean(&doc);
}

#[test]
fn duplicated_sheet_attributes_are_isolated() {
    let mut doc = XMind::new();
    let original_id = doc.first_sheet().id();
    let copy_id = doc.duplicate_sheet(original_id).unwrap();

    let copy = doc.sheet_mut(copy_id).unwrap();
    let copy_root = copy.root();
    let copy_first = copy.children(copy_root)[0];
    copy.topic_mut(copy_root).unwrap().change_text("changed");
    copy.topic_mut(copy_first).unwrap().change_color("Magenta");
    copy.rename_sheet("Renamed");

    let original = doc.sheet(original_id).unwrap();
    let root = original.root();
    assert_eq!(original.topic(root).unwrap().text.content, "Central Topic");
    let first = original.children(root)[0];
    assert_eq!(original.topic(first).unwrap().color.name, "Blue");
    assert_eq!(original.name(), "Mind Map");
}

#[test]
fn duplicated_sheet_relationships_point_at_clones() {
    init_logging();
    let mut doc = XMind::new();
    let sheet = doc.first_sheet_mut();
    let root = sheet.root();
    let main = sheet.children(root);
    let floating = sheet.add_floating_node();
    let rel = sheet.add_relationship(main[0], main[3]).unwrap();
    sheet.relationship_mut(rel).unwrap().change_text("depends on");
    sheet.add_relationship(floating, root).unwrap();
    let original_id = sheet.id();

    let copy_id = doc.duplicate_sheet(original_id).unwrap();

    let original = doc.sheet(original_id).unwrap();
    let copy = doc.sheet(copy_id).unwrap();
    let copy_root = copy.root();
    let copy_main = copy.children(copy_root);
    let rels = copy.relationships();
    assert_eq!(rels.len(), 2);

    assert_eq!((rels[0].from(), rels[0].to()), (copy_main[0], copy_main[3]));
    assert_eq!(rels[0].text.content, "depends on");
    assert_ne!(rels[0].id(), rel);
    assert_eq!((rels[1].from(), rels[1].to()), (copy.floating()[0], copy_root));
    for r in rels {
        assert!(!original.contains(r.from()));
        assert!(!original.contains(r.to()));
    }

    // Edits to the copy's relationships leave the original alone.
    let copy_rel = rels[0].id();
    doc.sheet_mut(copy_id)
        .unwrap()
        .relationship_mut(copy_rel)
        .unwrap()
        .change_text("blocks");
    let original = doc.sheet(original_id).unwrap();
    assert_eq!(original.relationship(rel).unwrap().text.content, "depends on");
    assert_clean(&doc);
}

#[test]
fn duplicated_sheet_keeps_relationships_into_detached_topics() {
    init_logging();
    let mut doc = XMind::new();
    let sheet = doc.first_sheet_mut();
    let root = sheet.root();
    let main = sheet.children(root);
    sheet.add_relationship(main[0], main[1]).unwrap();
    sheet.add_relationship(main[2], root).unwrap();
    sheet.remove_child(root, main[0]);
    let original_id = sheet.id();

    let copy_id = doc.duplicate_sheet(original_id).unwrap();

    let original = doc.sheet(original_id).unwrap();
    let copy = doc.sheet(copy_id).unwrap();
    assert_eq!(copy.relationships().len(), original.relationships().len());
    assert_eq!(copy.topic_count(), original.topic_count());
    assert_eq!(copy.children(copy.root()).len(), 3);

    let detached = copy.relationships()[0].from();
    assert!(!original.contains(detached));
    assert_eq!(copy.placement(detached), Some(Placement::Detached));
    assert_eq!(copy.topic(detached).unwrap().text.content, "Main Topic 1");
    assert_clean(&doc);
}

// ─── Topic structure ─────────────────────────────────────────────────────

#[test]
fn duplicate_topic_adds_sibling_and_mirrors_grandchildren() {
    init_logging();
    let mut doc = XMind::new();
    let sheet = doc.first_sheet_mut();
    let root = sheet.root();
    let main = sheet.children(root)[0];
    let kids = grow(sheet, main, 1);
    grow(sheet, kids[0], 2);

    let copy = sheet.duplicate(main).unwrap();

    let siblings = sheet.children(root);
    assert_eq!(siblings.len(), 5);
    assert!(siblings.contains(&main) && siblings.contains(&copy));
    assert_eq!(sheet.parent(copy), Some(root));
    let copy_kids = sheet.children(copy);
    assert_eq!(copy_kids.len(), 1);
    assert_eq!(sheet.children(copy_kids[0]).len(), 2);
    let texts: Vec<String> = sheet
        .children(copy_kids[0])
        .iter()
        .map(|id| sheet.topic(*id).unwrap().text.content.clone())
        .collect();
    assert_eq!(texts, vec!["child 0", "child 1"]);
    assert_clean(&doc);
}

#[test]
fn reparent_moves_grandchild_to_root() {
    let mut doc = XMind::new();
    let sheet = doc.first_sheet_mut();
    let root = sheet.root();
    let main = sheet.children(root)[0];
    let node = sheet.insert_topic(Topic::default());
    sheet.add_child(main, node).unwrap();

    sheet.change_parent(node, Some(root)).unwrap();

    assert_eq!(sheet.parent(node), Some(root));
    assert!(sheet.children(root).contains(&node));
    assert_eq!(sheet.children(root).len(), 5);
    assert!(sheet.children(main).is_empty());
    assert_clean(&doc);
}

#[test]
fn reparent_under_own_descendant_fails_cleanly() {
    init_logging();
    let mut doc = XMind::new();
    let sheet = doc.first_sheet_mut();
    let root = sheet.root();
    let main = sheet.children(root)[1];
    let kids = grow(sheet, main, 2);
    let deep = grow(sheet, kids[0], 1)[0];
    let before = sheet.outline();

    for target in [deep, kids[0], kids[1]] {
        let err = sheet.change_parent(main, Some(target)).unwrap_err();
        assert_eq!(
            err,
            MindMapError::Structural(StructuralViolation::DescendantParent {
                topic: main,
                parent: target,
            })
        );
    }
    assert_eq!(
        sheet.change_parent(root, Some(main)),
        Err(MindMapError::Structural(StructuralViolation::RootReparent(root)))
    );

    assert_eq!(sheet.outline(), before);
    assert!(!sheet.is_ancestor_of(main, main));
    assert_clean(&doc);
}

#[test]
fn remove_first_main_topic() {
    let mut doc = XMind::new();
    let sheet = doc.first_sheet_mut();
    let root = sheet.root();
    let first = sheet.children(root)[0];

    assert!(sheet.remove_child(root, first));

    assert_eq!(sheet.children(root).len(), 3);
    assert_eq!(sheet.parent(first), None);
    assert_clean(&doc);
}

#[test]
fn attribute_mutators_on_root() {
    let mut doc = XMind::new();
    let sheet = doc.first_sheet_mut();
    let root = sheet.root();
    let topic = sheet.topic_mut(root).unwrap();
    topic.change_text("xMind");
    topic.change_color("red");
    topic.change_shape("Triangle");
    topic.change_text_size(20.0);

    let topic = sheet.topic(root).unwrap();
    assert_eq!(topic.text.content, "xMind");
    assert_eq!(topic.color.name, "red");
    assert_eq!(topic.shape.name, "Triangle");
    assert_eq!(topic.text.size, 20.0);
}

// ─── Floating topics & relationships ─────────────────────────────────────

#[test]
fn floating_node_add_then_remove() {
    let mut doc = XMind::new();
    let sheet = doc.first_sheet_mut();
    let node = sheet.add_floating_node();
    assert_eq!(sheet.floating().len(), 1);

    sheet.remove_floating_node(node);

    assert_eq!(sheet.floating().len(), 0);
    assert_eq!(sheet.placement(node), Some(Placement::Detached));
    assert_eq!(sheet.purge_detached(), 1);
    assert_clean(&doc);
}

#[test]
fn relationship_add_remove_round_trip() {
    let mut doc = XMind::new();
    let sheet = doc.first_sheet_mut();
    let root = sheet.root();
    let main = sheet.children(root)[0];
    let before = sheet.relationships().to_vec();

    sheet.add_relationship(main, root).unwrap();
    assert_eq!(sheet.relationships().len(), 1);
    assert_eq!(sheet.relationships()[0].text.content, "Relationship");
    sheet.remove_relationship(main, root);

    assert_eq!(sheet.relationships(), before.as_slice());
}

#[test]
fn deleting_an_endpoint_cascades_to_relationships() {
    let mut doc = XMind::new();
    let sheet = doc.first_sheet_mut();
    let root = sheet.root();
    let main = sheet.children(root);
    let floating = sheet.add_floating_node();
    sheet.add_relationship(floating, main[0]).unwrap();
    sheet.add_relationship(main[1], main[2]).unwrap();

    assert_eq!(sheet.delete_topic(floating), Ok(1));

    assert!(sheet.floating().is_empty());
    assert_eq!(sheet.relationships().len(), 1);
    assert_clean(&doc);
}

// ─── Step-by-step consistency ────────────────────────────────────────────

#[test]
fn every_step_of_an_editing_session_stays_consistent() {
    init_logging();
    let mut doc = XMind::new();
    assert_clean(&doc);

    let sheet_id = doc.first_sheet().id();
    let root = doc.first_sheet().root();
    let main = doc.first_sheet().children(root);

    let grandchildren = grow(doc.sheet_mut(sheet_id).unwrap(), main[0], 2);
    assert_clean(&doc);

    let sheet = doc.sheet_mut(sheet_id).unwrap();
    let branch_copy = sheet.duplicate(main[0]).unwrap();
    assert_clean(&doc);

    let sheet = doc.sheet_mut(sheet_id).unwrap();
    sheet.change_parent(grandchildren[1], Some(main[3])).unwrap();
    assert_clean(&doc);

    let sheet = doc.sheet_mut(sheet_id).unwrap();
    let floating = sheet.add_floating_node();
    assert_clean(&doc);

    let sheet = doc.sheet_mut(sheet_id).unwrap();
    sheet.add_child(floating, main[2]).unwrap();
    assert_clean(&doc);

    let sheet = doc.sheet_mut(sheet_id).unwrap();
    let rel = sheet.add_relationship(main[2], branch_copy).unwrap();
    assert_clean(&doc);

    let sheet = doc.sheet_mut(sheet_id).unwrap();
    assert!(sheet.change_parent(floating, Some(main[2])).is_err());
    assert_clean(&doc);

    let sheet = doc.sheet_mut(sheet_id).unwrap();
    assert!(sheet.remove_child(root, main[1]));
    assert_clean(&doc);

    let copy_id = doc.duplicate_sheet(sheet_id).unwrap();
    assert_clean(&doc);

    let sheet = doc.sheet_mut(sheet_id).unwrap();
    assert!(sheet.remove_floating_node(floating));
    assert_clean(&doc);

    let sheet = doc.sheet_mut(sheet_id).unwrap();
    assert_eq!(sheet.purge_detached(), 3);
    assert!(sheet.relationship(rel).is_none());
    assert_clean(&doc);

    let sheet = doc.sheet_mut(sheet_id).unwrap();
    assert_eq!(sheet.delete_topic(branch_copy).unwrap(), 3);
    assert_clean(&doc);

    assert_eq!(doc.remove_sheet(copy_id), Ok(true));
    assert_clean(&doc);

    let sheet = doc.first_sheet();
    assert_eq!(sheet.children(root), vec![main[0], main[3]]);
    assert_eq!(sheet.children(main[3]), vec![grandchildren[1]]);
    assert!(sheet.floating().is_empty());
}

// ─── Config ──────────────────────────────────────────────────────────────

#[test]
fn substituted_defaults_are_deterministic() {
    let config = MindMapConfig {
        main_topics: vec![
            TopicDefaults::new("Teal", "Goals", 18.0, "Inter"),
            TopicDefaults::new("Coral", "Risks", 18.0, "Inter"),
        ],
        ..MindMapConfig::default()
    };
    let doc = XMind::with_config(config);
    let sheet = doc.first_sheet();
    let texts: Vec<&str> = sheet
        .children(sheet.root())
        .into_iter()
        .map(|id| sheet.topic(id).unwrap().text.content.as_str())
        .collect();
    assert_eq!(texts, vec!["Goals", "Risks"]);
    assert!(check_sheet(sheet).is_empty());
}
