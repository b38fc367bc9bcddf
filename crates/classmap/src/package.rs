//! Package tree builder.
//!
//! Groups the diagram's registered objects by package path. The tree is
//! rooted at the longest package prefix shared by every object, so a
//! diagram whose classes all live under `com.shop` gets a root labelled
//! `com.shop` with one child per distinct next segment.
//!
//! A [`PackageObject`] is a view anchor: handing one to
//! [`DiagramView::view`](crate::view::DiagramView::view) renders every
//! object below it.

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use classmap_core::{diagram::Diagram, relation::ObjectRef};

/// A node of the package tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageObject {
    name: String,
    path: Vec<String>,
    packages: IndexMap<String, PackageObject>,
    objects: Vec<ObjectRef>,
}

impl PackageObject {
    fn new(path: Vec<String>) -> Self {
        Self {
            name: path.join("."),
            path,
            ..Self::default()
        }
    }

    /// Dotted package name; the root of a diagram without shared prefix
    /// has an empty name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full package path from the outermost segment.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Child packages in first-seen order.
    pub fn packages(&self) -> impl Iterator<Item = &PackageObject> {
        self.packages.values()
    }

    /// Objects declared directly in this package.
    pub fn objects(&self) -> &[ObjectRef] {
        &self.objects
    }

    /// Returns `true` if neither objects nor child packages hang below.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.packages.is_empty()
    }

    /// Find a descendant by path segments relative to this node.
    ///
    /// An empty path returns this node.
    pub fn get<S: AsRef<str>>(&self, segments: &[S]) -> Option<&PackageObject> {
        segments.iter().try_fold(self, |package, segment| {
            package.packages.get(segment.as_ref())
        })
    }

    /// Every object transitively contained, direct objects first, then each
    /// child package in order.
    pub fn collect_objects(&self) -> IndexSet<ObjectRef> {
        let mut objects = IndexSet::new();
        self.collect_objects_into(&mut objects);
        objects
    }

    fn collect_objects_into(&self, objects: &mut IndexSet<ObjectRef>) {
        objects.extend(self.objects.iter().copied());
        for package in self.packages.values() {
            package.collect_objects_into(objects);
        }
    }

    /// Descend along `segments`, creating missing packages.
    fn descend(&mut self, segments: &[String]) -> &mut PackageObject {
        let mut node = self;
        for segment in segments {
            let mut path = node.path.clone();
            path.push(segment.clone());
            node = node
                .packages
                .entry(segment.clone())
                .or_insert_with(|| PackageObject::new(path));
        }
        node
    }
}

/// Longest package path shared by every declared object.
fn common_prefix(diagram: &Diagram) -> Vec<String> {
    let mut packages = diagram.declared_objects().map(|(_, object)| object.package());
    let Some(first) = packages.next() else {
        return Vec::new();
    };

    let len = packages.fold(first.len(), |len, package| {
        first
            .iter()
            .zip(package)
            .take(len)
            .take_while(|(a, b)| a == b)
            .count()
    });
    first[..len].to_vec()
}

/// Build the package tree of a diagram's declared objects.
///
/// Stubs and placeholders that were never completed are left out.
///
/// # Examples
///
/// ```
/// use classmap::package::build_package_tree;
/// use classmap_core::{diagram::Diagram, object::DiagramObject};
///
/// let package = |segments: &[&str]| -> Vec<String> {
///     segments.iter().map(|s| s.to_string()).collect()
/// };
/// let mut diagram = Diagram::new();
/// diagram.add_object(DiagramObject::class("Order", package(&["com", "shop"]))).unwrap();
/// diagram.add_object(DiagramObject::class("User", package(&["com", "auth"]))).unwrap();
///
/// let tree = build_package_tree(&diagram);
/// assert_eq!(tree.name(), "com");
/// assert_eq!(tree.get(&["shop"]).map(|p| p.objects().len()), Some(1));
/// ```
pub fn build_package_tree(diagram: &Diagram) -> PackageObject {
    let prefix = common_prefix(diagram);
    debug!(prefix = prefix.join("."), objects = diagram.len(); "Building package tree");

    let mut root = PackageObject::new(prefix);
    let depth = root.path.len();
    for (object_ref, object) in diagram.declared_objects() {
        let relative = object.package().get(depth..).unwrap_or_default();
        trace!(object = object.name(), package = relative.join("."); "Placing object");
        root.descend(relative).objects.push(object_ref);
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use classmap_core::object::DiagramObject;

    fn package(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    fn diagram(objects: &[(&str, &[&str])]) -> Diagram {
        let mut diagram = Diagram::new();
        for (name, segments) in objects {
            diagram
                .add_object(DiagramObject::class(*name, package(segments)))
                .unwrap();
        }
        diagram
    }

    #[test]
    fn test_common_prefix() {
        let diagram = diagram(&[
            ("A", &["com", "a"]),
            ("B", &["com", "b"]),
            ("X", &["com", "a", "x"]),
        ]);
        assert_eq!(common_prefix(&diagram), ["com"]);
    }

    #[test]
    fn test_common_prefix_edge_cases() {
        assert!(common_prefix(&Diagram::new()).is_empty());

        let single = diagram(&[("A", &["com", "a"])]);
        assert_eq!(common_prefix(&single), ["com", "a"]);

        let disjoint = diagram(&[("A", &["com"]), ("B", &["org"])]);
        assert!(common_prefix(&disjoint).is_empty());

        let nested = diagram(&[("A", &["com", "a", "x"]), ("B", &["com", "a"])]);
        assert_eq!(common_prefix(&nested), ["com", "a"]);
    }

    #[test]
    fn test_placeholders_are_left_out() {
        let mut diagram = diagram(&[("A", &["com", "a"])]);
        diagram
            .add_object(DiagramObject::unresolved("Ghost", package(&["org"])))
            .unwrap();

        let tree = build_package_tree(&diagram);

        assert_eq!(tree.path(), ["com", "a"]);
        assert_eq!(tree.collect_objects().len(), 1);
    }

    #[test]
    fn test_build_package_tree() {
        let diagram = diagram(&[
            ("A", &["com", "a"]),
            ("B", &["com", "b"]),
            ("X", &["com", "a", "x"]),
        ]);
        let tree = build_package_tree(&diagram);

        assert_eq!(tree.name(), "com");
        assert_eq!(tree.path(), ["com"]);
        assert!(tree.objects().is_empty());

        let children: Vec<&str> = tree.packages().map(PackageObject::name).collect();
        assert_eq!(children, ["com.a", "com.b"]);

        let a = tree.get(&["a"]).unwrap();
        assert_eq!(a.objects(), [ObjectRef::Registered(0)]);

        let collected: Vec<ObjectRef> = a.collect_objects().into_iter().collect();
        assert_eq!(
            collected,
            [ObjectRef::Registered(0), ObjectRef::Registered(2)]
        );

        assert_eq!(
            tree.get(&["a", "x"]).map(PackageObject::path),
            Some(package(&["com", "a", "x"]).as_slice())
        );
        assert!(tree.get(&["c"]).is_none());
        assert_eq!(tree.get::<&str>(&[]), Some(&tree));
    }

    #[test]
    fn test_root_holds_objects_at_prefix() {
        let diagram = diagram(&[("Root", &["com"]), ("Leaf", &["com", "a"])]);
        let tree = build_package_tree(&diagram);

        assert_eq!(tree.objects(), [ObjectRef::Registered(0)]);
        assert_eq!(tree.collect_objects().len(), 2);
    }

    #[test]
    fn test_empty_diagram() {
        let tree = build_package_tree(&Diagram::new());
        assert!(tree.is_empty());
        assert_eq!(tree.name(), "");
        assert!(tree.collect_objects().is_empty());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use classmap_core::object::DiagramObject;

    // ===================
    // Strategies
    // ===================

    /// Strategy for package paths drawn from a small alphabet, so prefixes
    /// are often shared.
    fn package_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(prop_oneof![Just("com"), Just("a"), Just("b")], 0..4)
            .prop_map(|segments| segments.into_iter().map(str::to_string).collect())
    }

    fn diagram_strategy() -> impl Strategy<Value = Diagram> {
        prop::collection::vec(package_strategy(), 0..12).prop_map(|packages| {
            let mut diagram = Diagram::new();
            for (index, package) in packages.into_iter().enumerate() {
                diagram
                    .add_object(DiagramObject::class(format!("C{index}"), package))
                    .expect("generated names are unique");
            }
            diagram
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// The root closure holds every registered object exactly once.
    fn check_root_collects_everything(diagram: &Diagram) -> Result<(), TestCaseError> {
        let tree = build_package_tree(diagram);
        let collected = tree.collect_objects();

        prop_assert_eq!(collected.len(), diagram.len());
        for (object_ref, _) in diagram.objects() {
            prop_assert!(collected.contains(&object_ref));
        }
        Ok(())
    }

    /// Every object sits in the package node matching its full path.
    fn check_objects_placed_by_path(diagram: &Diagram) -> Result<(), TestCaseError> {
        let tree = build_package_tree(diagram);
        let depth = tree.path().len();

        for (object_ref, object) in diagram.objects() {
            prop_assert!(object.package().starts_with(tree.path()));
            let node = tree.get(&object.package()[depth..]);
            prop_assert!(node.is_some_and(|node| node.objects().contains(&object_ref)));
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn root_collects_everything(diagram in diagram_strategy()) {
            check_root_collects_everything(&diagram)?;
        }

        #[test]
        fn objects_placed_by_path(diagram in diagram_strategy()) {
            check_objects_placed_by_path(&diagram)?;
        }
    }
}
