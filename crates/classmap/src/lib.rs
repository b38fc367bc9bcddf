//! Classmap - object models of class diagrams.
//!
//! Source parsers register classes, interfaces and enums in a
//! [`Diagram`](classmap_core::diagram::Diagram) together with tentative
//! relations. The [`Pipeline`] then resolves the relations, infers
//! associations and runs the optional refinement passes. Emitters select
//! what to draw through a [`View`](view::View) and its
//! [`RenderPlan`](view::RenderPlan).

pub mod config;
pub mod package;
pub mod passes;
pub mod view;

mod error;

pub use classmap_core::{diagram, doc, member, object, relation, types};
pub use classmap_doc::{DocPolicy, parse_assoc, parse_description};

pub use error::ClassmapError;

use log::{debug, info};

use classmap_core::{diagram::Diagram, doc::DocComment, error::Diagnostic};

use config::AppConfig;

/// Runs the passes over populated diagrams.
///
/// # Examples
///
/// ```
/// use classmap::{
///     Pipeline,
///     config::AppConfig,
///     diagram::Diagram,
///     member::{ClassMember, Visibility},
///     object::DiagramObject,
///     types::Type,
///     view::DiagramView,
/// };
///
/// let mut order = DiagramObject::class("Order", vec![]);
/// order
///     .add_member(ClassMember::attribute("buyer", Visibility::Private, Type::named("Customer")))
///     .unwrap();
///
/// let mut diagram = Diagram::new();
/// diagram.add_object(order).unwrap();
/// diagram.add_object(DiagramObject::class("Customer", vec![])).unwrap();
///
/// let diagnostics = Pipeline::new(AppConfig::default()).run(&mut diagram).unwrap();
/// assert!(diagnostics.is_empty());
///
/// let plan = diagram.view_all().plan_render();
/// assert_eq!(plan.relations().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Pipeline {
    config: AppConfig,
}

impl Pipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read a `/** ... */` documentation block with the configured policy.
    ///
    /// # Errors
    ///
    /// Returns [`ClassmapError::Doc`] for a malformed block when the
    /// configuration asks for strict documentation.
    pub fn read_doc(&self, raw: &str) -> Result<Option<DocComment>, ClassmapError> {
        Ok(classmap_doc::parse_doc_block(raw, self.config.doc().policy())?)
    }

    /// Run every configured pass over a diagram whose objects are all
    /// registered.
    ///
    /// Returns the diagnostics produced by this run; they are also kept on
    /// the diagram.
    ///
    /// Running again is safe: resolution and getter synthesis only touch
    /// what is still missing, and associations are inferred once per
    /// diagram.
    ///
    /// # Errors
    ///
    /// Returns [`ClassmapError::Model`] if a pass cannot add a member.
    pub fn run(&self, diagram: &mut Diagram) -> Result<Vec<Diagnostic>, ClassmapError> {
        info!(
            objects = diagram.len(),
            relations = diagram.relations().len();
            "Running passes"
        );
        let already_reported = diagram.diagnostics().len();

        passes::resolve(diagram);
        passes::associate(diagram, self.config.association());

        if self.config.passes().getters() {
            let added = passes::synthesize_getters(diagram)?;
            debug!(added; "Getter synthesis finished");
        }
        if self.config.passes().importance() {
            let marked = passes::mark_important(diagram);
            debug!(marked; "Importance marking finished");
        }

        let diagnostics = diagram
            .diagnostics()
            .get(already_reported..)
            .unwrap_or_default()
            .to_vec();
        info!(
            relations = diagram.relations().len(),
            diagnostics = diagnostics.len();
            "Passes finished"
        );
        Ok(diagnostics)
    }
}
