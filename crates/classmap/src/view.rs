//! Views over a diagram and the render plans computed from them.
//!
//! A [`View`] selects roots (objects or package tree nodes) of a
//! [`Diagram`]. [`View::plan_render`] turns the selection into a
//! [`RenderPlan`]: the objects to draw in full, the one-hop context
//! objects and the relations between them. Emitters consume the plan and
//! never look at the rest of the diagram.
//!
//! # Adjacency
//!
//! With [`View::with_adjacent`], a relation whose A end is rendered but
//! whose B end is not is still included, and its B end is added to the
//! adjacent set. The reverse direction is never followed.

use indexmap::IndexSet;
use log::{debug, trace};

use classmap_core::{
    diagram::Diagram,
    object::DiagramObject,
    relation::{ObjectRef, Relation},
};

use crate::package::PackageObject;

/// Something a view can be anchored at.
#[derive(Debug, Clone, Copy)]
pub enum ViewRoot<'d> {
    /// A single object.
    Object(ObjectRef),
    /// Every object below a package tree node.
    Package(&'d PackageObject),
}

impl ViewRoot<'_> {
    /// Objects rendered for this root.
    pub fn collect_objects(&self) -> IndexSet<ObjectRef> {
        match self {
            Self::Object(object_ref) => IndexSet::from([*object_ref]),
            Self::Package(package) => package.collect_objects(),
        }
    }
}

impl From<ObjectRef> for ViewRoot<'_> {
    fn from(object_ref: ObjectRef) -> Self {
        Self::Object(object_ref)
    }
}

impl<'d> From<&'d PackageObject> for ViewRoot<'d> {
    fn from(package: &'d PackageObject) -> Self {
        Self::Package(package)
    }
}

/// A selection of roots over a diagram.
#[derive(Debug, Clone)]
pub struct View<'d> {
    diagram: &'d Diagram,
    roots: Vec<ViewRoot<'d>>,
    adjacent: bool,
}

impl<'d> View<'d> {
    /// Create a view over `roots` of `diagram`.
    pub fn new<R>(diagram: &'d Diagram, roots: impl IntoIterator<Item = R>) -> Self
    where
        R: Into<ViewRoot<'d>>,
    {
        Self {
            diagram,
            roots: roots.into_iter().map(Into::into).collect(),
            adjacent: false,
        }
    }

    /// Include one-hop context along outgoing relations.
    pub fn with_adjacent(mut self) -> Self {
        self.adjacent = true;
        self
    }

    pub fn includes_adjacent(&self) -> bool {
        self.adjacent
    }

    pub fn roots(&self) -> &[ViewRoot<'d>] {
        &self.roots
    }

    pub fn diagram(&self) -> &'d Diagram {
        self.diagram
    }

    /// Compute the objects and relations to render.
    ///
    /// Rendered objects are the union of the roots' closures, in object
    /// table order. A relation is kept when both ends are rendered or,
    /// with adjacency enabled, when its A end is; its B end then joins the
    /// adjacent set. Relations with an unresolved end are never kept.
    pub fn plan_render(&self) -> RenderPlan<'d> {
        let mut rendered: Vec<ObjectRef> = self
            .roots
            .iter()
            .flat_map(ViewRoot::collect_objects)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();
        rendered.sort_unstable();
        let primary: IndexSet<ObjectRef> = rendered.iter().copied().collect();

        let mut adjacent: IndexSet<ObjectRef> = IndexSet::new();
        let mut relations: Vec<&'d Relation> = Vec::new();

        for relation in self.diagram.relations() {
            let (Some(a), Some(b)) = (relation.a().object_ref(), relation.b().object_ref()) else {
                trace!(kind = relation.kind().name(); "Skipping unresolved relation");
                continue;
            };

            if !primary.contains(&a) {
                continue;
            }
            if primary.contains(&b) {
                relations.push(relation);
            } else if self.adjacent {
                adjacent.insert(b);
                relations.push(relation);
            }
        }

        let plan = RenderPlan {
            objects: self.resolve_all(primary),
            adjacent: self.resolve_all(adjacent),
            relations,
        };
        debug!(
            objects = plan.objects.len(),
            adjacent = plan.adjacent.len(),
            relations = plan.relations.len();
            "Render plan computed"
        );
        plan
    }

    fn resolve_all(
        &self,
        refs: IndexSet<ObjectRef>,
    ) -> Vec<(ObjectRef, &'d DiagramObject)> {
        refs.into_iter()
            .filter_map(|object_ref| {
                self.diagram
                    .object(object_ref)
                    .map(|object| (object_ref, object))
            })
            .collect()
    }
}

/// The objects and relations a view renders.
#[derive(Debug, Clone, Default)]
pub struct RenderPlan<'d> {
    objects: Vec<(ObjectRef, &'d DiagramObject)>,
    adjacent: Vec<(ObjectRef, &'d DiagramObject)>,
    relations: Vec<&'d Relation>,
}

impl<'d> RenderPlan<'d> {
    /// Objects rendered in full.
    pub fn objects(&self) -> &[(ObjectRef, &'d DiagramObject)] {
        &self.objects
    }

    /// Context objects reached through an outgoing relation, never one of
    /// [`objects`](Self::objects).
    pub fn adjacent(&self) -> &[(ObjectRef, &'d DiagramObject)] {
        &self.adjacent
    }

    /// Relations to draw, in diagram order.
    pub fn relations(&self) -> &[&'d Relation] {
        &self.relations
    }

    /// References of the objects rendered in full.
    pub fn object_refs(&self) -> impl Iterator<Item = ObjectRef> + '_ {
        self.objects.iter().map(|(object_ref, _)| *object_ref)
    }

    /// References of the adjacent objects.
    pub fn adjacent_refs(&self) -> impl Iterator<Item = ObjectRef> + '_ {
        self.adjacent.iter().map(|(object_ref, _)| *object_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.adjacent.is_empty() && self.relations.is_empty()
    }
}

/// View construction on a [`Diagram`].
pub trait DiagramView {
    /// A view over every declared object.
    ///
    /// Placeholders that were registered but never completed are not
    /// roots.
    fn view_all(&self) -> View<'_>;

    /// A view over a single root.
    fn view_one<'d>(&'d self, root: impl Into<ViewRoot<'d>>) -> View<'d>;

    /// A view over the given roots.
    fn view<'d, R>(&'d self, roots: impl IntoIterator<Item = R>) -> View<'d>
    where
        R: Into<ViewRoot<'d>>;
}

impl DiagramView for Diagram {
    fn view_all(&self) -> View<'_> {
        View::new(self, self.declared_objects().map(|(object_ref, _)| object_ref))
    }

    fn view_one<'d>(&'d self, root: impl Into<ViewRoot<'d>>) -> View<'d> {
        View::new(self, [root.into()])
    }

    fn view<'d, R>(&'d self, roots: impl IntoIterator<Item = R>) -> View<'d>
    where
        R: Into<ViewRoot<'d>>,
    {
        View::new(self, roots)
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use classmap_core::relation::Association;

    // ===================
    // Strategies
    // ===================

    /// A diagram of `n` classes with random relations between them, plus a
    /// random subset of roots.
    fn scenario_strategy() -> impl Strategy<Value = (Diagram, Vec<ObjectRef>)> {
        (1usize..8)
            .prop_flat_map(|n| {
                (
                    Just(n),
                    prop::collection::vec((0..n, 0..n), 0..16),
                    prop::collection::vec(0..n, 0..n),
                )
            })
            .prop_map(|(n, edges, roots)| {
                let mut diagram = Diagram::new();
                for index in 0..n {
                    diagram
                        .add_object(DiagramObject::class(format!("C{index}"), vec![]))
                        .expect("generated names are unique");
                }
                for (a, b) in edges {
                    diagram.add_relation(Relation::associative(
                        ObjectRef::Registered(a),
                        ObjectRef::Registered(b),
                        Association::default(),
                    ));
                }
                let roots: Vec<ObjectRef> = roots.into_iter().map(ObjectRef::Registered).collect();
                (diagram, roots)
            })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Without adjacency, a relation is planned iff both ends are rendered.
    fn check_closure(diagram: &Diagram, roots: &[ObjectRef]) -> Result<(), TestCaseError> {
        let plan = diagram.view(roots.iter().copied()).plan_render();
        let rendered: IndexSet<ObjectRef> = plan.object_refs().collect();
        let expected: IndexSet<ObjectRef> = roots.iter().copied().collect();

        prop_assert_eq!(rendered.len(), expected.len());
        prop_assert!(rendered.iter().all(|r| expected.contains(r)));
        prop_assert!(plan.adjacent().is_empty());

        let planned = diagram
            .relations()
            .iter()
            .filter(|relation| {
                let a = relation.a().object_ref().expect("resolved");
                let b = relation.b().object_ref().expect("resolved");
                rendered.contains(&a) && rendered.contains(&b)
            })
            .count();
        prop_assert_eq!(plan.relations().len(), planned);
        Ok(())
    }

    /// With adjacency, every planned relation starts in the rendered set
    /// and the adjacent set never overlaps it.
    fn check_adjacency(diagram: &Diagram, roots: &[ObjectRef]) -> Result<(), TestCaseError> {
        let plan = diagram
            .view(roots.iter().copied())
            .with_adjacent()
            .plan_render();
        let rendered: IndexSet<ObjectRef> = plan.object_refs().collect();
        let adjacent: IndexSet<ObjectRef> = plan.adjacent_refs().collect();

        prop_assert!(rendered.is_disjoint(&adjacent));
        for relation in plan.relations() {
            let a = relation.a().object_ref().expect("resolved");
            let b = relation.b().object_ref().expect("resolved");
            prop_assert!(rendered.contains(&a));
            prop_assert!(rendered.contains(&b) || adjacent.contains(&b));
        }

        let outgoing = diagram
            .relations()
            .iter()
            .filter(|relation| {
                relation
                    .a()
                    .object_ref()
                    .is_some_and(|a| rendered.contains(&a))
            })
            .count();
        prop_assert_eq!(plan.relations().len(), outgoing);
        Ok(())
    }

    /// Planning twice gives the same plan.
    fn check_deterministic(diagram: &Diagram, roots: &[ObjectRef]) -> Result<(), TestCaseError> {
        let view = diagram.view(roots.iter().copied()).with_adjacent();
        let first = view.plan_render();
        let second = view.plan_render();

        prop_assert_eq!(
            first.object_refs().collect::<Vec<_>>(),
            second.object_refs().collect::<Vec<_>>()
        );
        prop_assert_eq!(
            first.adjacent_refs().collect::<Vec<_>>(),
            second.adjacent_refs().collect::<Vec<_>>()
        );
        prop_assert_eq!(first.relations(), second.relations());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn closure((diagram, roots) in scenario_strategy()) {
            check_closure(&diagram, &roots)?;
        }

        #[test]
        fn adjacency((diagram, roots) in scenario_strategy()) {
            check_adjacency(&diagram, &roots)?;
        }

        #[test]
        fn deterministic((diagram, roots) in scenario_strategy()) {
            check_deterministic(&diagram, &roots)?;
        }
    }
}
