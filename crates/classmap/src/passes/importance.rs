//! Importance marking from `@important` tags.

use log::{debug, info};

use classmap_core::diagram::Diagram;

const IMPORTANT_TAG: &str = "important";

/// Flag objects and members whose documentation carries `@important`.
///
/// Returns the number of objects and members flagged.
pub fn mark_important(diagram: &mut Diagram) -> usize {
    info!(objects = diagram.len(); "Marking important elements");

    let mut marked = 0;
    for object in diagram.objects_mut() {
        if object.doc().has_tag(IMPORTANT_TAG) {
            debug!(object = object.name(); "Important object");
            object.set_important(true);
            marked += 1;
        }
        for member in object.members_mut() {
            if member.doc().has_tag(IMPORTANT_TAG) {
                member.set_important(true);
                marked += 1;
            }
        }
    }

    marked
}
