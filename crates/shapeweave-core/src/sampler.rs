//! Turns shape descriptors into world-space point rings.

use crate::config::EngineConfig;
use crate::error::EngineWarning;
use crate::geometry::Ring;
use crate::path::MultiRingPath;
use crate::shapes::{Outline, PathShape, RectangleParams, ShapeDescriptor, ShapeKind};
use kurbo::Affine;

/// Rings sampled from one shape, plus anything worth reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sampled {
    pub rings: Vec<Ring>,
    pub warnings: Vec<EngineWarning>,
}

impl Sampled {
    /// Total points across all rings.
    pub fn point_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }
}

/// Sample a shape into closed rings in world space.
///
/// Orientation is not normalized here; path shapes pass their points through
/// in whatever winding they were authored.
pub fn sample(shape: &ShapeDescriptor, config: &EngineConfig) -> Sampled {
    let mut warnings = Vec::new();
    let local = match &shape.kind {
        ShapeKind::Path(path) => path_rings(path),
        ShapeKind::Unsupported => {
            log::warn!(
                "Shape '{}' has an unsupported kind, substituting a default rectangle",
                shape.name
            );
            warnings.push(EngineWarning::UnsupportedShapeKind {
                shape: shape.name.clone(),
            });
            RectangleParams::default().outline(config.curve_segments)
        }
        kind => outline_of(kind)
            .map(|o| o.outline(config.curve_segments))
            .unwrap_or_default(),
    };

    let affine = shape.transform.to_affine();
    Sampled {
        rings: transform_rings(local, affine),
        warnings,
    }
}

/// The boundary generator for a parametric kind.
fn outline_of(kind: &ShapeKind) -> Option<&dyn Outline> {
    let outline: &dyn Outline = match kind {
        ShapeKind::Rectangle(p) => p,
        ShapeKind::Circle(p) => p,
        ShapeKind::Triangle(p) => p,
        ShapeKind::Ellipse(p) => p,
        ShapeKind::RegularPolygon(p) => p,
        ShapeKind::Star(p) => p,
        ShapeKind::Arc(p) => p,
        ShapeKind::RoundedRectangle(p) => p,
        ShapeKind::ChamferRectangle(p) => p,
        ShapeKind::Arrow(p) => p,
        ShapeKind::Donut(p) => p,
        ShapeKind::Spiral(p) => p,
        ShapeKind::Cross(p) => p,
        ShapeKind::Wave(p) => p,
        ShapeKind::Slot(p) => p,
        ShapeKind::Gear(p) => p,
        ShapeKind::FingerJoint(p) => p,
        ShapeKind::Dovetail(p) => p,
        ShapeKind::Tenon(p) => p,
        ShapeKind::Path(_) | ShapeKind::Unsupported => return None,
    };
    Some(outline)
}

/// Whether a kind is sampled at curve density.
pub fn is_curved(kind: &ShapeKind) -> bool {
    outline_of(kind).is_some_and(|o| o.is_curved())
}

/// Literal points split on sentinels, or turtle strokes flattened into one ring.
fn path_rings(path: &PathShape) -> Vec<Ring> {
    if path.is_turtle() {
        let ring: Ring = path.turtle.iter().flatten().copied().collect();
        if ring.is_empty() { Vec::new() } else { vec![ring] }
    } else {
        MultiRingPath::decode(&path.points).rings
    }
}

fn transform_rings(rings: Vec<Ring>, affine: Affine) -> Vec<Ring> {
    if affine == Affine::IDENTITY {
        return rings;
    }
    rings
        .into_iter()
        .map(|ring| ring.into_iter().map(|p| affine * p).collect())
        .collect()
}
