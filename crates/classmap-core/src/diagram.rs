//! The diagram: object tables, relations and collected diagnostics.
//!
//! A [`Diagram`] owns two tables keyed by name:
//! - registered objects, added by parsers through [`Diagram::add_object`]
//! - stubs, the permanent placeholders created for names that could not be
//!   resolved
//!
//! Both tables keep insertion order, so every iteration over a diagram is
//! deterministic. Relations are kept in the order they were added, which
//! is also the order emitters write them.
//!
//! Parsers may register a placeholder ([`DiagramObject::unresolved`]) for a
//! name they see before its declaration. The declaration completes the
//! placeholder in place. A placeholder that is never completed does not
//! count as declared: [`Diagram::lookup_declared`] skips it.

use indexmap::{IndexMap, map::Entry};
use log::{debug, trace};

use crate::{
    error::{Diagnostic, ModelError},
    object::DiagramObject,
    relation::{Endpoint, ObjectRef, Relation},
};

/// The complete model of one or more parsed source inputs.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    objects: IndexMap<String, DiagramObject>,
    stubs: IndexMap<String, DiagramObject>,
    relations: Vec<Relation>,
    diagnostics: Vec<Diagnostic>,
    associations_inferred: bool,
}

impl Diagram {
    /// Create an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object under its name.
    ///
    /// If the name is taken by a placeholder, or `object` is itself a
    /// placeholder, the two are merged (see [`DiagramObject::merge`]) and
    /// the existing reference is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateObject`] if the name is taken by
    /// another declared object. The diagram is left unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use classmap_core::{diagram::Diagram, object::DiagramObject};
    ///
    /// let mut diagram = Diagram::new();
    /// diagram.add_object(DiagramObject::class("Order", vec![])).unwrap();
    /// assert!(diagram.add_object(DiagramObject::class("Order", vec![])).is_err());
    /// ```
    pub fn add_object(&mut self, object: DiagramObject) -> Result<ObjectRef, ModelError> {
        match self.objects.entry(object.name().to_string()) {
            Entry::Occupied(mut entry) => {
                if !entry.get().is_unresolved() && !object.is_unresolved() {
                    return Err(ModelError::DuplicateObject(entry.key().clone()));
                }
                trace!(name = object.name(), kind = object.kind().name(); "Completing placeholder");
                entry.get_mut().merge(object)?;
                Ok(ObjectRef::Registered(entry.index()))
            }
            Entry::Vacant(entry) => {
                let index = entry.index();
                trace!(name = object.name(), kind = object.kind().name(); "Registering object");
                entry.insert(object);
                Ok(ObjectRef::Registered(index))
            }
        }
    }

    /// Append a relation. Endpoints may still be unresolved.
    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    /// Look up a registered object by name. Stubs are not considered.
    pub fn lookup(&self, name: &str) -> Option<ObjectRef> {
        self.objects.get_index_of(name).map(ObjectRef::Registered)
    }

    /// Look up a declared object by name.
    ///
    /// Like [`Diagram::lookup`], but placeholders that were registered and
    /// never completed are treated as missing.
    pub fn lookup_declared(&self, name: &str) -> Option<ObjectRef> {
        declared_index(&self.objects, name).map(ObjectRef::Registered)
    }

    /// Return the stub for `name`, creating it on first use.
    pub fn stub(&mut self, name: &str) -> ObjectRef {
        let entry = self.stubs.entry(name.to_string());
        let index = entry.index();
        entry.or_insert_with(|| DiagramObject::unresolved(name, Vec::new()));
        ObjectRef::Stub(index)
    }

    /// The object behind a reference.
    pub fn object(&self, object_ref: ObjectRef) -> Option<&DiagramObject> {
        match object_ref {
            ObjectRef::Registered(index) => self.objects.get_index(index).map(|(_, obj)| obj),
            ObjectRef::Stub(index) => self.stubs.get_index(index).map(|(_, obj)| obj),
        }
    }

    /// Mutable access to the object behind a reference.
    pub fn object_mut(&mut self, object_ref: ObjectRef) -> Option<&mut DiagramObject> {
        match object_ref {
            ObjectRef::Registered(index) => self.objects.get_index_mut(index).map(|(_, obj)| obj),
            ObjectRef::Stub(index) => self.stubs.get_index_mut(index).map(|(_, obj)| obj),
        }
    }

    /// Registered objects in registration order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectRef, &DiagramObject)> {
        self.objects
            .values()
            .enumerate()
            .map(|(index, obj)| (ObjectRef::Registered(index), obj))
    }

    /// Registered objects that are not uncompleted placeholders.
    pub fn declared_objects(&self) -> impl Iterator<Item = (ObjectRef, &DiagramObject)> {
        self.objects().filter(|(_, object)| !object.is_unresolved())
    }

    /// Mutable access to every registered object, in registration order.
    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut DiagramObject> {
        self.objects.values_mut()
    }

    /// Stub objects in creation order.
    pub fn stubs(&self) -> impl Iterator<Item = (ObjectRef, &DiagramObject)> {
        self.stubs
            .values()
            .enumerate()
            .map(|(index, obj)| (ObjectRef::Stub(index), obj))
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if no object is registered.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Relations in insertion order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Mutable access to the relations, for passes that resolve endpoints.
    pub fn relations_mut(&mut self) -> &mut [Relation] {
        &mut self.relations
    }

    /// Name an endpoint refers to, resolved or not.
    pub fn endpoint_name<'a>(&'a self, endpoint: &'a Endpoint) -> Option<&'a str> {
        match endpoint {
            Endpoint::Unresolved(name) => Some(name),
            Endpoint::Resolved(object_ref) => self.object(*object_ref).map(DiagramObject::name),
        }
    }

    /// Diagnostics collected by the passes run on this diagram so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Record a diagnostic.
    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        trace!(
            severity:% = diagnostic.severity(),
            kind = diagnostic.code().map_or("", |code| code.description()),
            message = diagnostic.message();
            "Recording diagnostic"
        );
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` once association inference has run on this diagram.
    pub fn associations_inferred(&self) -> bool {
        self.associations_inferred
    }

    /// Record that association inference has run. Inference skips
    /// diagrams carrying this mark, so its relations are added only once.
    pub fn mark_associations_inferred(&mut self) {
        self.associations_inferred = true;
    }

    /// Merge another diagram into this one.
    ///
    /// Objects are merged by name (see [`DiagramObject::merge`]) and
    /// relations appended. Resolved endpoints of `other` are re-targeted by
    /// name: registered objects map onto this diagram's table, stubs turn
    /// back into unresolved names for the next resolution pass. Stubs of
    /// this diagram whose name `other` registers are re-pointed at the new
    /// object.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::KindConflict`] when both diagrams define a
    /// name as different kinds of concrete object. The check runs before
    /// anything is merged, so the diagram is unchanged on error.
    pub fn fuse(&mut self, other: Diagram) -> Result<(), ModelError> {
        for (name, incoming) in &other.objects {
            if let Some(existing) = self.objects.get(name) {
                let both_concrete = !existing.is_unresolved() && !incoming.is_unresolved();
                if both_concrete && existing.kind().name() != incoming.kind().name() {
                    return Err(ModelError::KindConflict {
                        name: name.clone(),
                        existing: existing.kind().name(),
                        incoming: incoming.kind().name(),
                    });
                }
            }
        }

        debug!(
            objects = other.objects.len(),
            relations = other.relations.len();
            "Fusing diagram"
        );

        let Diagram {
            objects,
            stubs,
            relations,
            diagnostics,
            associations_inferred,
        } = other;

        let other_names: Vec<String> = objects.keys().cloned().collect();
        for (name, incoming) in objects {
            match self.objects.entry(name) {
                Entry::Occupied(mut entry) => entry.get_mut().merge(incoming)?,
                Entry::Vacant(entry) => {
                    entry.insert(incoming);
                }
            }
        }

        for relation in &mut self.relations {
            for endpoint in relation.endpoints_mut() {
                if let Endpoint::Resolved(ObjectRef::Stub(index)) = endpoint {
                    let registered = self
                        .stubs
                        .get_index(*index)
                        .and_then(|(name, _)| declared_index(&self.objects, name));
                    if let Some(registered) = registered {
                        *endpoint = Endpoint::Resolved(ObjectRef::Registered(registered));
                    }
                }
            }
        }

        for mut relation in relations {
            for endpoint in relation.endpoints_mut() {
                let name = match endpoint {
                    Endpoint::Unresolved(_) => continue,
                    Endpoint::Resolved(ObjectRef::Registered(index)) => other_names.get(*index),
                    Endpoint::Resolved(ObjectRef::Stub(index)) => {
                        stubs.get_index(*index).map(|(name, _)| name)
                    }
                };
                let Some(name) = name else {
                    continue;
                };
                *endpoint = match declared_index(&self.objects, name) {
                    Some(index) => Endpoint::Resolved(ObjectRef::Registered(index)),
                    None => Endpoint::Unresolved(name.clone()),
                };
            }
            self.relations.push(relation);
        }

        self.diagnostics.extend(diagnostics);
        self.associations_inferred |= associations_inferred;
        Ok(())
    }
}

/// Index of a registered object that is not an uncompleted placeholder.
fn declared_index(objects: &IndexMap<String, DiagramObject>, name: &str) -> Option<usize> {
    objects
        .get_full(name)
        .filter(|(_, _, object)| !object.is_unresolved())
        .map(|(index, _, _)| index)
}
