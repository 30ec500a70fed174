//! Literal and turtle-drawn paths, including boolean results.

use crate::clip::BooleanOp;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A path shape.
///
/// `points` holds literal points in local space, with `None` separating
/// rings. `turtle` holds the sub-strokes of a turtle drawing; when present it
/// takes precedence over `points`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathShape {
    pub points: Vec<Option<Point>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub turtle: Vec<Vec<Point>>,
    /// Set on shapes produced by a boolean operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<BooleanOp>,
    pub has_holes: bool,
}

impl PathShape {
    /// A single closed ring of literal points.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().map(Some).collect(),
            ..Self::default()
        }
    }

    /// A multi-stroke turtle drawing.
    pub fn from_turtle(strokes: Vec<Vec<Point>>) -> Self {
        Self {
            turtle: strokes,
            ..Self::default()
        }
    }

    /// Check whether this path was drawn by the turtle.
    pub fn is_turtle(&self) -> bool {
        !self.turtle.is_empty()
    }

    /// Number of real (non-sentinel) points.
    pub fn point_count(&self) -> usize {
        if self.is_turtle() {
            self.turtle.iter().map(Vec::len).sum()
        } else {
            self.points.iter().flatten().count()
        }
    }
}
