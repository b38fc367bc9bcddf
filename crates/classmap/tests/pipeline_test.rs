//! Integration tests for the Pipeline and view API
//!
//! These tests build diagrams the way source parsers do, run the passes
//! and check what emitters would receive.

use classmap::{
    Pipeline,
    config::{AppConfig, AssociationConfig, DocConfig, PassConfig},
    diagram::Diagram,
    doc::{DocComment, DocTag},
    member::{ClassMember, Visibility},
    object::DiagramObject,
    package::build_package_tree,
    passes,
    relation::{ArrowHead, Endpoint, ObjectRef, Relation},
    types::Type,
    view::DiagramView,
};
use classmap_core::error::ErrorCode;

fn package(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|s| s.to_string()).collect()
}

fn class_with(name: &str, attributes: &[(&str, Type)]) -> DiagramObject {
    let mut object = DiagramObject::class(name, vec![]);
    for (attribute, ty) in attributes {
        object
            .add_member(ClassMember::attribute(
                *attribute,
                Visibility::Private,
                ty.clone(),
            ))
            .expect("classes hold attributes");
    }
    object
}

fn association_config(merge: bool, max_roles: i64) -> AppConfig {
    AppConfig::new(
        AssociationConfig::new(merge, max_roles),
        PassConfig::default(),
        DocConfig::default(),
    )
}

fn role_b(relation: &Relation) -> &str {
    relation.association().map_or("", |a| a.role_b.as_str())
}

#[test]
fn test_attribute_reference_becomes_association() {
    let mut diagram = Diagram::new();
    let a = diagram
        .add_object(class_with("A", &[("myAttribute", Type::named("B"))]))
        .unwrap();
    let b = diagram.add_object(class_with("B", &[])).unwrap();

    let diagnostics = Pipeline::default().run(&mut diagram).unwrap();
    assert!(diagnostics.is_empty());

    let relations = diagram.relations();
    assert_eq!(relations.len(), 1);
    assert_eq!(relations[0].a(), &Endpoint::Resolved(a));
    assert_eq!(relations[0].b(), &Endpoint::Resolved(b));

    let association = relations[0].association().unwrap();
    assert_eq!(association.role_b, "myAttribute");
    assert_eq!(association.role_a, "");
    assert_eq!(association.name, "");
}

#[test]
fn test_assoc_annotation_end_to_end() {
    let pipeline = Pipeline::default();
    let doc = pipeline
        .read_doc(
            "/**\n * Owner of B.\n * @assoc 1 roleA relName *-> 0..* roleB $flat B\n */",
        )
        .unwrap()
        .expect("documentation block");

    let mut diagram = Diagram::new();
    diagram
        .add_object(DiagramObject::class("A", vec![]).with_doc(doc))
        .unwrap();
    diagram.add_object(class_with("B", &[])).unwrap();

    pipeline.run(&mut diagram).unwrap();

    let relations = diagram.relations();
    assert_eq!(relations.len(), 1);
    assert_eq!(diagram.endpoint_name(relations[0].a()), Some("A"));
    assert_eq!(diagram.endpoint_name(relations[0].b()), Some("B"));

    let association = relations[0].association().unwrap();
    assert_eq!(association.multiplicity_a, "1");
    assert_eq!(association.role_a, "roleA");
    assert_eq!(association.name, "relName");
    assert_eq!(association.head_a, ArrowHead::Composition);
    assert_eq!(association.head_b, ArrowHead::Directed);
    assert_eq!(association.multiplicity_b, "0..*");
    assert_eq!(association.role_b, "roleB");
    assert!(association.option("flat"));
}

#[test]
fn test_merge_boundary() {
    let build = || {
        let mut diagram = Diagram::new();
        diagram
            .add_object(class_with(
                "A",
                &[("roleX", Type::named("B")), ("roleY", Type::named("B"))],
            ))
            .unwrap();
        diagram.add_object(class_with("B", &[])).unwrap();
        diagram
    };

    let mut bounded = build();
    Pipeline::new(association_config(true, 1))
        .run(&mut bounded)
        .unwrap();
    assert_eq!(bounded.relations().len(), 1);
    assert_eq!(role_b(&bounded.relations()[0]), "");

    let mut unbounded = build();
    Pipeline::new(association_config(true, -1))
        .run(&mut unbounded)
        .unwrap();
    assert_eq!(unbounded.relations().len(), 1);
    assert_eq!(role_b(&unbounded.relations()[0]), "roleX, roleY");

    let mut split = build();
    Pipeline::new(association_config(false, -1))
        .run(&mut split)
        .unwrap();
    let roles: Vec<&str> = split.relations().iter().map(role_b).collect();
    assert_eq!(roles, ["roleX", "roleY"]);
}

#[test]
fn test_noassoc_keeps_explicit_relation() {
    let doc = DocComment::new(
        "",
        vec![
            DocTag::with_value("assoc", "- C"),
            DocTag::with_value("noassoc", ""),
        ],
    );
    let mut diagram = Diagram::new();
    diagram
        .add_object(class_with("A", &[("b", Type::named("B"))]).with_doc(doc))
        .unwrap();
    diagram.add_object(class_with("B", &[])).unwrap();
    diagram.add_object(class_with("C", &[])).unwrap();

    Pipeline::default().run(&mut diagram).unwrap();

    let targets: Vec<_> = diagram
        .relations()
        .iter()
        .map(|relation| diagram.endpoint_name(relation.b()))
        .collect();
    assert_eq!(targets, [Some("C")]);
}

#[test]
fn test_unresolved_endpoint_becomes_stub() {
    let mut diagram = Diagram::new();
    diagram.add_object(class_with("Child", &[])).unwrap();
    diagram.add_relation(Relation::inheritance("Child", "Parent"));
    diagram.add_relation(Relation::implements("Child", "Parent"));

    let diagnostics = Pipeline::default().run(&mut diagram).unwrap();

    assert!(passes::is_resolved(&diagram));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), Some(ErrorCode::E100));
    assert_eq!(
        diagnostics[0].message(),
        "unable to resolve object `Parent`"
    );

    for relation in diagram.relations() {
        let parent = relation.b().object_ref().unwrap();
        assert!(parent.is_stub());
        assert_eq!(diagram.object(parent).map(|o| o.name()), Some("Parent"));
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let mut diagram = Diagram::new();
    diagram.add_object(class_with("A", &[])).unwrap();
    diagram.add_object(class_with("B", &[])).unwrap();
    diagram.add_relation(Relation::inheritance("A", "B"));
    diagram.add_relation(Relation::inheritance("A", "Missing"));

    passes::resolve(&mut diagram);
    let relations = diagram.relations().to_vec();
    let reported = diagram.diagnostics().len();

    passes::resolve(&mut diagram);

    assert_eq!(diagram.relations(), relations.as_slice());
    assert_eq!(diagram.diagnostics().len(), reported);
}

#[test]
fn test_registered_placeholder_is_not_a_declaration() {
    let mut diagram = Diagram::new();
    let a = diagram.add_object(class_with("A", &[])).unwrap();
    diagram
        .add_object(DiagramObject::unresolved("B", vec![]))
        .unwrap();
    diagram.add_relation(Relation::inheritance("A", "B"));

    let diagnostics = Pipeline::default().run(&mut diagram).unwrap();

    let parent = diagram.relations()[0].b().object_ref().unwrap();
    assert!(parent.is_stub());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), Some(ErrorCode::E100));

    let plan = diagram.view_all().plan_render();
    assert_eq!(plan.object_refs().collect::<Vec<_>>(), [a]);

    let b = diagram.add_object(class_with("B", &[])).unwrap();
    assert_eq!(diagram.lookup_declared("B"), Some(b));
}

#[test]
fn test_running_twice_infers_associations_once() {
    let mut diagram = Diagram::new();
    diagram
        .add_object(class_with("A", &[("b", Type::named("B"))]))
        .unwrap();
    diagram.add_object(class_with("B", &[])).unwrap();

    let pipeline = Pipeline::default();
    pipeline.run(&mut diagram).unwrap();
    let second = pipeline.run(&mut diagram).unwrap();

    assert!(second.is_empty());
    assert_eq!(diagram.relations().len(), 1);
}

#[test]
fn test_inference_is_deterministic() {
    let build = || {
        let mut diagram = Diagram::new();
        diagram
            .add_object(class_with(
                "Order",
                &[
                    ("lines", Type::list(Type::named("Line"))),
                    ("buyer", Type::named("Customer")),
                    ("seller", Type::named("Customer")),
                    ("notes", Type::source_text("Map<Customer, Line>")),
                ],
            ))
            .unwrap();
        diagram
            .add_object(class_with("Line", &[("order", Type::named("Order"))]))
            .unwrap();
        diagram.add_object(class_with("Customer", &[])).unwrap();
        diagram
    };

    let config = association_config(true, 2);
    let mut first = build();
    let mut second = build();
    Pipeline::new(config.clone()).run(&mut first).unwrap();
    Pipeline::new(config).run(&mut second).unwrap();

    assert_eq!(first.relations(), second.relations());

    let summary: Vec<(Option<&str>, &str)> = first
        .relations()
        .iter()
        .map(|relation| (first.endpoint_name(relation.b()), role_b(relation)))
        .collect();
    assert_eq!(
        summary,
        [(Some("Line"), "lines, notes"), (Some("Customer"), ""), (Some("Order"), "order")]
    );
}

#[test]
fn test_optional_passes() {
    let important = DocComment::new("", vec![DocTag::with_value("important", "")]);
    let mut diagram = Diagram::new();
    let account = diagram
        .add_object(
            class_with("Account", &[("active", Type::primitive("boolean"))]).with_doc(important),
        )
        .unwrap();

    let config = AppConfig::new(
        AssociationConfig::default(),
        PassConfig::new(true, true),
        DocConfig::default(),
    );
    Pipeline::new(config).run(&mut diagram).unwrap();

    let account = diagram.object(account).unwrap();
    assert!(account.is_important());
    assert!(account.has_method("isActive"));

    let mut untouched = Diagram::new();
    let other = untouched
        .add_object(class_with("Other", &[("name", Type::named("String"))]))
        .unwrap();
    let config = AppConfig::new(
        AssociationConfig::default(),
        PassConfig::new(false, false),
        DocConfig::default(),
    );
    Pipeline::new(config).run(&mut untouched).unwrap();
    assert!(untouched.object(other).unwrap().methods().is_empty());
}

#[test]
fn test_strict_doc_policy_reports_malformed_block() {
    let strict = Pipeline::new(AppConfig::new(
        AssociationConfig::default(),
        PassConfig::default(),
        DocConfig::new(true),
    ));
    let raw = "/**\n * Fine line\n   broken line\n */";

    assert!(strict.read_doc(raw).is_err());
    assert!(Pipeline::default().read_doc(raw).unwrap().is_none());
}

#[test]
fn test_duplicate_object_is_fatal() {
    let mut diagram = Diagram::new();
    diagram.add_object(class_with("A", &[])).unwrap();

    let err = diagram.add_object(class_with("A", &[])).unwrap_err();
    let err: classmap::ClassmapError = err.into();
    assert!(matches!(err, classmap::ClassmapError::Model(_)));
}

#[test]
fn test_package_tree_view() {
    let mut diagram = Diagram::new();
    let a = diagram
        .add_object(DiagramObject::class("A", package(&["com", "a"])))
        .unwrap();
    let b = diagram
        .add_object(DiagramObject::class("B", package(&["com", "b"])))
        .unwrap();
    let x = diagram
        .add_object(DiagramObject::class("X", package(&["com", "a", "x"])))
        .unwrap();
    diagram.add_relation(Relation::inheritance(x, a));
    diagram.add_relation(Relation::inheritance(a, b));
    diagram.add_relation(Relation::inheritance(b, x));
    Pipeline::default().run(&mut diagram).unwrap();

    let tree = build_package_tree(&diagram);
    assert_eq!(tree.path(), ["com"]);

    let package_a = tree.get(&["a"]).unwrap();
    let closure: Vec<ObjectRef> = package_a.collect_objects().into_iter().collect();
    assert_eq!(closure, [a, x]);

    let plan = diagram.view([package_a]).plan_render();
    assert_eq!(plan.object_refs().collect::<Vec<_>>(), closure);
    assert_eq!(plan.relations(), [&diagram.relations()[0]]);

    let plan = diagram.view([package_a]).with_adjacent().plan_render();
    assert_eq!(plan.adjacent_refs().collect::<Vec<_>>(), [b]);
    assert_eq!(plan.relations().len(), 2);
}

#[test]
fn test_adjacency_asymmetry() {
    let mut diagram = Diagram::new();
    let a = diagram.add_object(class_with("A", &[])).unwrap();
    let b = diagram.add_object(class_with("B", &[])).unwrap();
    let x = diagram.add_object(class_with("X", &[])).unwrap();
    diagram.add_relation(Relation::inheritance(a, b));
    diagram.add_relation(Relation::inheritance(x, a));

    for adjacent in [false, true] {
        let view = diagram.view([a]);
        let view = if adjacent { view.with_adjacent() } else { view };
        let plan = view.plan_render();

        // x -> a never shows up, whatever the flag
        assert!(
            plan.relations()
                .iter()
                .all(|relation| relation.a() != &Endpoint::Resolved(x))
        );
        assert_eq!(plan.adjacent_refs().any(|r| r == b), adjacent);
        assert!(!plan.adjacent_refs().any(|r| r == x));
    }
}
