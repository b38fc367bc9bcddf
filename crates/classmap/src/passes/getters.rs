//! Getter synthesis for private attributes.

use std::collections::HashSet;

use log::{debug, info};

use classmap_core::{
    diagram::Diagram,
    error::ModelError,
    member::{ClassMember, Visibility},
};

/// Stereotype carried by every synthesized method.
pub const GENERATED_STEREOTYPE: &str = "generated";

/// Accessor name for an attribute: `isX` for primitive booleans, `getX`
/// otherwise.
fn getter_name(attribute: &ClassMember) -> String {
    let prefix = match attribute.attribute_type() {
        Some(ty) if ty.is_boolean() => "is",
        _ => "get",
    };
    let mut chars = attribute.name().chars();
    match chars.next() {
        Some(first) => format!("{prefix}{}{}", first.to_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}

/// Add a public getter for every private, non-static attribute that has
/// no method of the same name yet.
///
/// Attributes whose accessor names collide, such as `url` and `Url`, get
/// one getter, for the first of them.
///
/// Returns the number of getters added.
///
/// # Errors
///
/// Propagates [`ModelError`] from adding a member; classes and enums
/// always accept methods, so this only fails on an inconsistent object.
pub fn synthesize_getters(diagram: &mut Diagram) -> Result<usize, ModelError> {
    info!(objects = diagram.len(); "Synthesizing getters");

    let mut added = 0;
    for object in diagram.objects_mut() {
        let mut synthesized: HashSet<String> = HashSet::new();
        let getters: Vec<ClassMember> = object
            .attributes()
            .iter()
            .filter(|attribute| {
                attribute.visibility() == Visibility::Private && !attribute.is_static()
            })
            .filter_map(|attribute| {
                let name = getter_name(attribute);
                if object.has_method(&name) || !synthesized.insert(name.clone()) {
                    return None;
                }
                let ty = attribute.attribute_type()?.clone();
                Some(
                    ClassMember::method(name, Visibility::Public, Vec::new(), ty)
                        .with_stereotype(GENERATED_STEREOTYPE),
                )
            })
            .collect();

        for getter in getters {
            debug!(object = object.name(), getter = getter.name(); "Adding getter");
            object.add_member(getter)?;
            added += 1;
        }
    }

    info!(added; "Getters synthesized");
    Ok(added)
}
