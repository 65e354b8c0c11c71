use tracing::{debug, info};

use super::{Reroot, ResolveContainment, Specialize};
use crate::dispatch::{Selector, Session};
use crate::document::{NodeId, ShapeKind};
use crate::error::Result;
use crate::params::NestParams;
use crate::protocol::standard_registry;
use crate::surface::ShapeSurface;

/// Shapes taking part in nesting, in the order they are processed: paths
/// classed `real`, then polygons, then groups that parse as paragraphs.
///
/// Paragraph groups are tagged as a side effect of discovery.
///
/// # Errors
///
/// Returns an error if the tree cannot be walked.
pub fn discover_candidates(surface: &mut dyn ShapeSurface, root: NodeId) -> Result<Vec<NodeId>> {
    let mut order = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        order.push(id);
        stack.extend(surface.children_of(id)?.into_iter().rev());
    }

    let mut paths = Vec::new();
    let mut polygons = Vec::new();
    let mut groups = Vec::new();
    for &id in &order {
        match surface.kind_of(id)? {
            ShapeKind::Path if surface.has_class(id, "real")? => paths.push(id),
            ShapeKind::Polygon => polygons.push(id),
            ShapeKind::Group => groups.push(id),
            _ => {}
        }
    }

    let registry = standard_registry()?;
    let mut session = Session::new(surface, &registry, NestParams::default());
    let mut paragraphs = Vec::new();
    for g in groups {
        if session
            .send_unary(g, Selector::ParseAsParagraph)?
            .into_bool(Selector::ParseAsParagraph)?
        {
            paragraphs.push(g);
        }
    }

    debug!(
        paths = paths.len(),
        polygons = polygons.len(),
        paragraphs = paragraphs.len(),
        "discovered candidates"
    );
    paths.extend(polygons);
    paths.extend(paragraphs);
    Ok(paths)
}

/// Specializes every candidate, resolves containment among them and
/// re-parents the tree to match.
///
/// Returns the candidates' live handles, in input order. Specialization
/// replaces handles, so the input handles of specialized shapes are stale
/// afterwards.
///
/// # Errors
///
/// Returns an error on stale handles, missing geometry or a broken protocol.
/// The tree is left valid but partly rewritten.
pub fn run_specialization_and_containment(
    surface: &mut dyn ShapeSurface,
    candidates: &[NodeId],
    params: &NestParams,
) -> Result<Vec<NodeId>> {
    let registry = standard_registry()?;
    let mut session = Session::new(surface, &registry, *params);

    let mut shapes = Vec::with_capacity(candidates.len());
    for &candidate in candidates {
        shapes.push(Specialize::new(candidate).execute(&mut session)?.shape);
    }
    // Ids already in the tree must not be minted again.
    for &shape in &shapes {
        let existing = session.surface().attribute(shape, "id")?;
        if let Some(id) = existing.filter(|id| !id.is_empty()) {
            session.reserve_id(&id);
        }
    }
    for &shape in &shapes {
        session.id(shape)?;
    }

    let containment = ResolveContainment::new(&shapes).execute(&mut session)?;
    let moved = Reroot::new(&containment).execute(&mut session)?;
    info!(
        shapes = shapes.len(),
        contained = containment.len(),
        moved,
        "nesting complete"
    );
    Ok(shapes)
}

/// Discovers candidates under `root` and nests them.
///
/// # Errors
///
/// As for [`discover_candidates`] and [`run_specialization_and_containment`].
pub fn nest(surface: &mut dyn ShapeSurface, root: NodeId, params: &NestParams) -> Result<Vec<NodeId>> {
    let candidates = discover_candidates(surface, root)?;
    run_specialization_and_containment(surface, &candidates, params)
}
