//! Resolution pass: turns unresolved relation endpoints into object links.
//!
//! Parsers create relations while walking one source tree at a time, so an
//! endpoint may name an object that is only registered later. Once every
//! input has been registered, this pass looks each such name up. Names
//! that no registered object carries are linked to a stub object of the
//! same name and reported once with [`ErrorCode::E100`].

use std::collections::HashSet;

use log::{debug, info, warn};

use classmap_core::{
    diagram::Diagram,
    error::{Diagnostic, ErrorCode},
    relation::Endpoint,
};

/// Resolve every unresolved endpoint of the diagram's relations.
///
/// A registered placeholder that was never completed by a declaration
/// does not resolve a name; the endpoint gets a stub like any other
/// missing name. Must run after all objects are registered. Running it again on a
/// resolved diagram changes nothing and reports nothing.
pub fn resolve(diagram: &mut Diagram) {
    let pending: Vec<(usize, usize, String)> = diagram
        .relations()
        .iter()
        .enumerate()
        .flat_map(|(index, relation)| {
            [relation.a(), relation.b()]
                .into_iter()
                .enumerate()
                .filter_map(move |(side, endpoint)| match endpoint {
                    Endpoint::Unresolved(name) => Some((index, side, name.clone())),
                    Endpoint::Resolved(_) => None,
                })
        })
        .collect();

    info!(
        relations = diagram.relations().len(),
        pending = pending.len();
        "Resolving relation endpoints"
    );

    let mut reported: HashSet<String> = HashSet::new();
    let mut stubbed = 0usize;

    for (index, side, name) in pending {
        let target = match diagram.lookup_declared(&name) {
            Some(object_ref) => object_ref,
            None => {
                stubbed += 1;
                if reported.insert(name.clone()) {
                    warn!(name; "Unable to resolve object");
                    diagram.push_diagnostic(
                        Diagnostic::warning(format!("unable to resolve object `{name}`"))
                            .with_code(ErrorCode::E100)
                            .with_help(format!(
                                "declare `{name}` or include the source that defines it"
                            )),
                    );
                }
                diagram.stub(&name)
            }
        };

        debug!(name, stub = target.is_stub(); "Resolved endpoint");
        if let Some(relation) = diagram.relations_mut().get_mut(index) {
            let [a, b] = relation.endpoints_mut();
            let endpoint = if side == 0 { a } else { b };
            *endpoint = Endpoint::Resolved(target);
        }
    }

    if stubbed > 0 {
        info!(stubbed, stubs = reported.len(); "Linked unresolved endpoints to stubs");
    }
}

/// Returns `true` if no relation endpoint is left unresolved.
pub fn is_resolved(diagram: &Diagram) -> bool {
    diagram
        .relations()
        .iter()
        .all(|relation| relation.a().is_resolved() && relation.b().is_resolved())
}
