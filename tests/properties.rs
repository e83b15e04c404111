//! Property tests: random edit sequences keep the document well formed, used
//! domains are never removed, and the parser never panics.

mod common;

use std::collections::HashSet;

use cdmodel::document::Document;
use cdmodel::tag::Tag;
use cdmodel::{Cardinality, ModelDocument, Rect};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    CreateEntity,
    CreateAttribute(usize),
    AddIdentifier(usize, usize, bool),
    RemoveIdentifier(usize, usize),
    RemoveAttribute(usize, usize),
    CreateRelationship(usize, usize, usize),
    DeleteRelationship(usize),
    DeleteEntity(usize),
    MoveEntity(usize, i32, i32),
    CreateDomain(usize, u32),
    AssignDomain(usize, usize),
    SetDataType(usize, usize, u32),
    RemoveDomain(usize),
}

const TYPE_CODES: [&str; 5] = ["VA", "I", "DC", "MN", "TXT"];

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::CreateEntity),
        any::<usize>().prop_map(Step::CreateAttribute),
        (any::<usize>(), any::<usize>(), any::<bool>()).prop_map(|(e, a, p)| Step::AddIdentifier(e, a, p)),
        (any::<usize>(), any::<usize>()).prop_map(|(e, i)| Step::RemoveIdentifier(e, i)),
        (any::<usize>(), any::<usize>()).prop_map(|(e, a)| Step::RemoveAttribute(e, a)),
        (any::<usize>(), any::<usize>(), any::<usize>()).prop_map(|(a, b, c)| Step::CreateRelationship(a, b, c)),
        any::<usize>().prop_map(Step::DeleteRelationship),
        any::<usize>().prop_map(Step::DeleteEntity),
        (any::<usize>(), -50000..50000i32, -50000..50000i32).prop_map(|(e, x, y)| Step::MoveEntity(e, x, y)),
        (any::<usize>(), 0..300u32).prop_map(|(c, len)| Step::CreateDomain(c, len)),
        (any::<usize>(), any::<usize>()).prop_map(|(i, d)| Step::AssignDomain(i, d)),
        (any::<usize>(), any::<usize>(), 0..300u32).prop_map(|(i, c, len)| Step::SetDataType(i, c, len)),
        any::<usize>().prop_map(Step::RemoveDomain),
    ]
}

fn pick<T>(items: &[T], index: usize) -> Option<&T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[index % items.len()])
    }
}

/// Apply one step against whatever currently exists. Steps that have nothing
/// to act on are skipped; every step that runs must succeed.
fn apply(doc: &mut ModelDocument, step: &Step) -> Option<()> {
    let model = doc.snapshot().unwrap();
    match *step {
        Step::CreateEntity => {
            doc.create_entity("GENERATED").unwrap();
        }
        Step::CreateAttribute(e) => {
            let entity = pick(&model.entities, e)?;
            doc.create_attribute(&entity.id, "field", "VA", 20).unwrap();
        }
        Step::AddIdentifier(e, a, primary) => {
            let entity = pick(&model.entities, e)?;
            let attribute = pick(&entity.attributes, a)?;
            doc.add_identifier(&entity.id, &attribute.id, primary).unwrap();
        }
        Step::RemoveIdentifier(e, i) => {
            let entity = pick(&model.entities, e)?;
            let attribute_id = pick(&entity.identifiers, i)?.attribute_id.as_deref()?;
            doc.remove_identifier(&entity.id, attribute_id).unwrap();
        }
        Step::RemoveAttribute(e, a) => {
            let entity = pick(&model.entities, e)?;
            let attribute = pick(&entity.attributes, a)?;
            doc.remove_attribute(&entity.id, &attribute.id).unwrap();
        }
        Step::CreateRelationship(from, to, c) => {
            let from = pick(&model.entities, from)?;
            let to = pick(&model.entities, to)?;
            let cardinality = Cardinality::ALL[c % Cardinality::ALL.len()];
            doc.create_relationship(&from.id, &to.id, "link", cardinality).unwrap();
        }
        Step::DeleteRelationship(r) => {
            let relation = pick(&model.relations, r)?;
            doc.delete_relationship(&relation.id).unwrap();
        }
        Step::DeleteEntity(e) => {
            let entity = pick(&model.entities, e)?;
            doc.delete_entity(&entity.id).unwrap();
        }
        Step::MoveEntity(e, x, y) => {
            let entity = pick(&model.entities, e)?;
            let rect = Rect::new(x.into(), (y + 3000).into(), (x + 5000).into(), y.into());
            doc.move_entity(&entity.id, rect).unwrap();
        }
        Step::CreateDomain(c, length) => {
            doc.create_domain("DOMAIN", TYPE_CODES[c % TYPE_CODES.len()], length).unwrap();
        }
        Step::AssignDomain(i, d) => {
            let data_items: Vec<&String> = model.data_items.keys().collect();
            let domains: Vec<&String> = model.domains.keys().collect();
            let data_item = pick(&data_items, i)?;
            let domain = pick(&domains, d)?;
            doc.assign_domain(data_item, domain).unwrap();
        }
        Step::SetDataType(i, c, length) => {
            let data_items: Vec<&String> = model.data_items.keys().collect();
            let data_item = pick(&data_items, i)?;
            doc.set_data_type_and_length(data_item, TYPE_CODES[c % TYPE_CODES.len()], length).unwrap();
        }
        Step::RemoveDomain(d) => {
            let domains: Vec<&String> = model.domains.keys().collect();
            let domain = pick(&domains, d)?.to_string();
            let in_use = doc.document().usage_count(&domain) > 0;
            let before = doc.to_xml();

            let removed = doc.remove_domain(&domain).unwrap();
            assert_eq!(removed, !in_use, "domain {domain} in use: {in_use}");
            if in_use {
                assert_eq!(doc.to_xml(), before);
            } else {
                assert!(!doc.snapshot().unwrap().domains.contains_key(&domain));
            }
        }
    }
    Some(())
}

fn elements(doc: &Document) -> Vec<cdmodel::NodeId> {
    doc.descendants(doc.root()).collect()
}

fn assert_ids_unique(doc: &Document) {
    let mut seen = HashSet::new();
    for node in elements(doc) {
        if let Some(id) = doc.element(node).id() {
            assert!(seen.insert(id.to_string()), "duplicate id {id}");
        }
    }
}

fn assert_references_resolve(doc: &Document) {
    let ids: HashSet<&str> = elements(doc).into_iter().filter_map(|n| doc.element(n).id()).collect();
    for node in elements(doc) {
        if let Some(reference) = doc.element(node).reference() {
            assert!(ids.contains(reference), "dangling reference {reference}");
        }
    }
}

fn assert_entities_consistent(doc: &Document) {
    let Ok(entities) = doc.find_path(&[Tag::Entities]) else {
        return;
    };
    for entity in doc.children(entities) {
        for collection in [Tag::Attributes, Tag::Identifiers] {
            if let Some(node) = doc.child(entity, collection) {
                assert!(doc.has_children(node), "empty {collection}");
            }
        }

        let wrappers = doc.children(entity).filter(|&n| doc.element(n).is(Tag::PrimaryIdentifier)).count();
        assert!(wrappers <= 1);
        if let Some(primary) = doc.reference_at(entity, &[Tag::PrimaryIdentifier, Tag::Identifier]) {
            let identifiers = doc.child(entity, Tag::Identifiers).unwrap();
            assert!(doc.child_by_id(identifiers, Tag::Identifier, primary).is_some());
        } else {
            assert_eq!(wrappers, 0);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn edits_keep_document_consistent(steps in prop::collection::vec(step(), 1..40)) {
        let mut doc = common::shop();
        for step in &steps {
            apply(&mut doc, step);
        }

        assert_ids_unique(doc.document());
        assert_references_resolve(doc.document());
        assert_entities_consistent(doc.document());

        let model = doc.snapshot().unwrap();
        for entity in &model.entities {
            prop_assert!(entity.identifiers.iter().filter(|i| i.is_primary).count() <= 1);
        }
    }

    #[test]
    fn domain_links_follow_edits(steps in prop::collection::vec(step(), 1..40)) {
        let mut doc = common::shop();
        for step in &steps {
            apply(&mut doc, step);
        }

        let model = doc.snapshot().unwrap();
        for (id, data_item) in &model.data_items {
            if let Some(domain) = &data_item.domain_id {
                prop_assert!(model.domains.contains_key(domain), "{id} uses missing domain {domain}");
            }
        }
        for id in model.domains.keys() {
            let users = model.data_items.values().filter(|d| d.domain_id.as_deref() == Some(id.as_str())).count();
            prop_assert_eq!(doc.document().usage_count(id), users);
        }
    }

    #[test]
    fn edits_serialize_stably(steps in prop::collection::vec(step(), 1..20)) {
        let mut doc = common::shop();
        for step in &steps {
            apply(&mut doc, step);
        }

        let first = doc.to_xml();
        let reloaded = ModelDocument::load(&first).unwrap();
        prop_assert_eq!(reloaded.to_xml(), first);
        prop_assert_eq!(reloaded.snapshot().unwrap(), doc.snapshot().unwrap());
    }

    #[test]
    fn allocated_ids_are_fresh(count in 1..20usize) {
        let mut doc = common::shop();
        let mut last = doc.document().last_id();
        for _ in 0..count {
            let created = doc.create_entity("E").unwrap();
            let id: u64 = created.entity_id.trim_start_matches('o').parse().unwrap();
            prop_assert!(id > last);
            last = doc.document().last_id();
        }
    }
}

/// Canonical element trees: double-quoted attributes, `<x/>` for empty
/// elements, non-empty text.
fn xml_tree() -> impl Strategy<Value = String> {
    let name = "[a-c]:[A-Z][a-zA-Z]{0,6}";
    let text = "[a-zA-Z0-9 ,.;&]{1,12}";
    let leaf = prop_oneof![
        (name, "[a-z0-9 ]{0,6}").prop_map(|(n, v)| format!("<{n} Id=\"{v}\"/>")),
        (name, text).prop_map(|(n, t)| format!("<{n}>{t}</{n}>")),
    ];
    leaf.prop_recursive(4, 40, 5, move |inner| {
        (name, prop::collection::vec(inner, 1..5))
            .prop_map(|(n, children)| format!("<{n}>\n{}\n</{n}>", children.join("\n")))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn load_never_panics(input in prop::collection::vec(any::<char>(), 0..500)) {
        let input: String = input.into_iter().collect();
        let _ = Document::load(&input);
    }

    #[test]
    fn markup_like_input_never_panics(parts in prop::collection::vec(
        prop_oneof![
            Just("<".to_string()),
            Just(">".to_string()),
            Just("</".to_string()),
            Just("/>".to_string()),
            Just("<!--".to_string()),
            Just("-->".to_string()),
            Just("<?".to_string()),
            Just("?>".to_string()),
            Just("<![CDATA[".to_string()),
            Just("]]>".to_string()),
            Just("\"".to_string()),
            Just("=".to_string()),
            Just("&amp;".to_string()),
            "[a-z:]{1,6}".prop_map(String::from),
            " ".prop_map(String::from),
        ],
        0..60,
    )) {
        let input = parts.join("");
        if let Ok(doc) = Document::load(&input) {
            let _ = doc.to_xml();
        }
    }

    #[test]
    fn canonical_trees_round_trip(body in xml_tree()) {
        let doc = Document::load(&body).unwrap();
        let xml = doc.to_xml();
        prop_assert_eq!(&xml, &format!("{}{}", cdmodel::serializer::DEFAULT_PREAMBLE, body));
        prop_assert_eq!(Document::load(&xml).unwrap().to_xml(), xml);
    }
}
