//! Shape descriptors produced by the interpreter.

mod basic;
mod color;
mod path;
mod profiles;

pub use basic::{
    ArcParams, ArrowParams, ChamferRectangleParams, CircleParams, CrossParams, DonutParams,
    EllipseParams, RectangleParams, RegularPolygonParams, RoundedRectangleParams, SlotParams,
    SpiralParams, StarParams, TriangleParams, WaveParams,
};
pub use color::{Color, ColorParseError};
pub use path::PathShape;
pub use profiles::{DovetailParams, FingerJointParams, GearParams, TenonParams};

use crate::geometry::Ring;
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Boundary generation shared by every parametric kind.
///
/// Outlines are produced in local space, centered on the origin, before the
/// shape's transform is applied.
pub trait Outline {
    /// Whether the boundary has curved parts that need dense sampling.
    fn is_curved(&self) -> bool {
        false
    }

    /// Produce the boundary rings. `segments` is the sample count for a full turn.
    fn outline(&self, segments: usize) -> Vec<Ring>;
}

/// Closed set of shape kinds, each with its typed parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle(RectangleParams),
    Circle(CircleParams),
    Triangle(TriangleParams),
    Ellipse(EllipseParams),
    RegularPolygon(RegularPolygonParams),
    Star(StarParams),
    Arc(ArcParams),
    RoundedRectangle(RoundedRectangleParams),
    ChamferRectangle(ChamferRectangleParams),
    Arrow(ArrowParams),
    Donut(DonutParams),
    Spiral(SpiralParams),
    Cross(CrossParams),
    Wave(WaveParams),
    Slot(SlotParams),
    Gear(GearParams),
    FingerJoint(FingerJointParams),
    Dovetail(DovetailParams),
    Tenon(TenonParams),
    Path(PathShape),
    /// A kind tag this engine does not know.
    #[serde(other)]
    Unsupported,
}

impl ShapeKind {
    /// Name of the kind as written in scene files.
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle(_) => "rectangle",
            ShapeKind::Circle(_) => "circle",
            ShapeKind::Triangle(_) => "triangle",
            ShapeKind::Ellipse(_) => "ellipse",
            ShapeKind::RegularPolygon(_) => "regular_polygon",
            ShapeKind::Star(_) => "star",
            ShapeKind::Arc(_) => "arc",
            ShapeKind::RoundedRectangle(_) => "rounded_rectangle",
            ShapeKind::ChamferRectangle(_) => "chamfer_rectangle",
            ShapeKind::Arrow(_) => "arrow",
            ShapeKind::Donut(_) => "donut",
            ShapeKind::Spiral(_) => "spiral",
            ShapeKind::Cross(_) => "cross",
            ShapeKind::Wave(_) => "wave",
            ShapeKind::Slot(_) => "slot",
            ShapeKind::Gear(_) => "gear",
            ShapeKind::FingerJoint(_) => "finger_joint",
            ShapeKind::Dovetail(_) => "dovetail",
            ShapeKind::Tenon(_) => "tenon",
            ShapeKind::Path(_) => "path",
            ShapeKind::Unsupported => "unsupported",
        }
    }

    /// Get the path data if this kind is a path.
    pub fn as_path(&self) -> Option<&PathShape> {
        match self {
            ShapeKind::Path(p) => Some(p),
            _ => None,
        }
    }
}

/// Affine placement of a shape: scale about the origin, then rotate, then translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Translation applied last.
    pub position: Vec2,
    /// Rotation in degrees, counter-clockwise with +y up.
    pub rotation: f64,
    /// Non-uniform scale about the local origin.
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform {
    /// The combined affine map.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.position)
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Check whether the transform leaves points unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Style fields as written by the user. `None` means not specified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    /// Generic color, used for fill and stroke unless a specific one is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// A named shape as registered by the interpreter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub kind: ShapeKind,
    #[serde(default, skip_serializing_if = "Transform::is_identity")]
    pub transform: Transform,
    #[serde(default)]
    pub style: ShapeStyle,
}

impl ShapeDescriptor {
    /// Create a shape with an identity transform and no explicit style.
    pub fn new(name: impl Into<String>, kind: ShapeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::default(),
            style: ShapeStyle::default(),
        }
    }

    /// Move the shape so its local origin sits at `(x, y)`.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.transform.position = Vec2::new(x, y);
        self
    }

    /// Set the rotation in degrees.
    pub fn rotated(mut self, degrees: f64) -> Self {
        self.transform.rotation = degrees;
        self
    }

    /// Set a non-uniform scale.
    pub fn scaled(mut self, sx: f64, sy: f64) -> Self {
        self.transform.scale = Vec2::new(sx, sy);
        self
    }

    /// Replace the style.
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }
}

/// Evenly spaced points on an elliptical arc, `count` samples from `start` to `end` inclusive.
pub(crate) fn arc_points(
    center: Point,
    rx: f64,
    ry: f64,
    start: f64,
    end: f64,
    count: usize,
) -> impl Iterator<Item = Point> {
    let count = count.max(1);
    (0..=count).map(move |i| {
        let a = start + (end - start) * i as f64 / count as f64;
        Point::new(center.x + rx * a.cos(), center.y + ry * a.sin())
    })
}

/// Evenly spaced points on a full ellipse, without repeating the start.
pub(crate) fn ellipse_ring(center: Point, rx: f64, ry: f64, count: usize) -> Ring {
    let count = count.max(3);
    let step = std::f64::consts::TAU / count as f64;
    (0..count)
        .map(|i| {
            let a = step * i as f64;
            Point::new(center.x + rx * a.cos(), center.y + ry * a.sin())
        })
        .collect()
}
