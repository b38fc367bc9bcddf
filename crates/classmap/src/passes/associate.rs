//! Association inference pass.
//!
//! Adds associative relations to the diagram, either written out by
//! authors with `@assoc` or inferred from the declared types of class
//! attributes. Runs after resolution, so every target can be looked up in
//! the object table.

use indexmap::IndexMap;
use log::{debug, info, warn};

use classmap_core::{
    diagram::Diagram,
    doc::DocComment,
    error::{Diagnostic, ErrorCode},
    object::DiagramObject,
    relation::{Association, ObjectRef, Relation},
};
use classmap_doc::{AssocError, parse_assoc};

use crate::config::AssociationConfig;

const ASSOC_TAG: &str = "assoc";
const NOASSOC_TAG: &str = "noassoc";

/// Relations and diagnostics found while scanning one object.
#[derive(Debug, Default)]
struct Findings {
    relations: Vec<Relation>,
    diagnostics: Vec<Diagnostic>,
}

impl Findings {
    /// Turn every `@assoc` tag of `doc` into a relation from `source`.
    ///
    /// `default_role_b` labels the B end when the annotation leaves it
    /// empty.
    fn explicit(
        &mut self,
        diagram: &Diagram,
        object: &DiagramObject,
        source: ObjectRef,
        doc: &DocComment,
        default_role_b: Option<&str>,
    ) {
        for tag in doc.tags_named(ASSOC_TAG) {
            let spec = match parse_assoc(tag.value()) {
                Ok(spec) => spec,
                Err(err) => {
                    self.malformed(object, tag.value(), &err);
                    continue;
                }
            };

            let (target_name, mut association) = spec.into_parts();
            let Some(target) = diagram.lookup_declared(&target_name) else {
                warn!(object = object.name(), to = target_name; "Unknown association target");
                self.diagnostics.push(
                    Diagnostic::warning(format!("unknown association target `{target_name}`"))
                        .with_code(ErrorCode::E201)
                        .with_object(object.name())
                        .with_help("the last token of `@assoc` must name a declared object"),
                );
                continue;
            };

            if association.role_b.is_empty() {
                if let Some(role) = default_role_b {
                    association.role_b = role.to_string();
                }
            }

            debug!(object = object.name(), to = target_name; "Explicit association");
            self.relations
                .push(Relation::associative(source, target, association));
        }
    }

    fn malformed(&mut self, object: &DiagramObject, value: &str, err: &AssocError) {
        warn!(object = object.name(), value, err:%; "Malformed association annotation");
        self.diagnostics.push(
            Diagnostic::warning(format!("malformed `@assoc {value}`: {err}"))
                .with_code(ErrorCode::E200)
                .with_object(object.name())
                .with_help("expected `[mult] [role] [name] <arrow> [mult] [role] [$option] Target`"),
        );
    }
}

/// Infer associations for every registered object, in object order.
///
/// Per object, explicit `@assoc` relations of the object come first,
/// followed by relations from attribute-level `@assoc` tags and inferred
/// relations grouped by target in first-reference order. Malformed
/// annotations and unknown targets are reported as diagnostics and
/// skipped. Placeholders that were never declared neither own nor
/// receive associations.
///
/// Inference runs once per diagram: a diagram already marked with
/// [`Diagram::associations_inferred`] is left unchanged.
pub fn associate(diagram: &mut Diagram, config: &AssociationConfig) {
    if diagram.associations_inferred() {
        debug!("Associations already inferred, skipping");
        return;
    }

    info!(
        objects = diagram.len(),
        merge = config.merge(),
        max_roles = config.max_roles();
        "Inferring associations"
    );

    let mut findings = Findings::default();
    for (source, object) in diagram.objects() {
        if object.is_unresolved() {
            continue;
        }
        findings.explicit(diagram, object, source, object.doc(), None);

        if object.doc().has_tag(NOASSOC_TAG) {
            debug!(object = object.name(); "Member inference disabled");
            continue;
        }

        let mut roles: IndexMap<ObjectRef, Vec<&str>> = IndexMap::new();
        for attribute in object.attributes() {
            let doc = attribute.doc();
            if doc.has_tag(ASSOC_TAG) {
                findings.explicit(diagram, object, source, doc, Some(attribute.name()));
                continue;
            }
            if doc.has_tag(NOASSOC_TAG) {
                continue;
            }

            let Some(ty) = attribute.attribute_type() else {
                continue;
            };
            for name in ty.collect_names() {
                if let Some(target) = diagram.lookup_declared(&name) {
                    roles.entry(target).or_default().push(attribute.name());
                }
            }
        }

        for (target, names) in roles {
            if config.merge() {
                let role_b = if config.allows_roles(names.len()) {
                    names.join(", ")
                } else {
                    String::new()
                };
                debug!(object = object.name(), roles = names.len(); "Merged association");
                findings.relations.push(Relation::associative(
                    source,
                    target,
                    Association::with_role_b(role_b),
                ));
            } else {
                findings.relations.extend(names.into_iter().map(|role| {
                    Relation::associative(source, target, Association::with_role_b(role))
                }));
            }
        }
    }

    let Findings {
        relations,
        diagnostics,
    } = findings;
    info!(relations = relations.len(), problems = diagnostics.len(); "Associations inferred");

    for relation in relations {
        diagram.add_relation(relation);
    }
    for diagnostic in diagnostics {
        diagram.push_diagnostic(diagnostic);
    }
    diagram.mark_associations_inferred();
}
