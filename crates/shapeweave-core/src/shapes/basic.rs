//! Parameters and outlines for the primitive shape kinds.

use super::{Outline, arc_points, ellipse_ring};
use crate::geometry::Ring;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Axis-aligned rectangle centered on the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleParams {
    pub width: f64,
    pub height: f64,
}

impl Default for RectangleParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
        }
    }
}

impl RectangleParams {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Counter-clockwise corners of a centered `w × h` rectangle.
pub(crate) fn rect_corners(w: f64, h: f64) -> Ring {
    let (hw, hh) = (w / 2.0, h / 2.0);
    vec![
        Point::new(-hw, -hh),
        Point::new(hw, -hh),
        Point::new(hw, hh),
        Point::new(-hw, hh),
    ]
}

impl Outline for RectangleParams {
    fn outline(&self, _segments: usize) -> Vec<Ring> {
        vec![rect_corners(self.width, self.height)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleParams {
    pub radius: f64,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self { radius: 50.0 }
    }
}

impl CircleParams {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Outline for CircleParams {
    fn is_curved(&self) -> bool {
        true
    }

    fn outline(&self, segments: usize) -> Vec<Ring> {
        vec![ellipse_ring(Point::ZERO, self.radius, self.radius, segments)]
    }
}

/// Isosceles triangle with its base along the bottom of its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangleParams {
    pub base: f64,
    pub height: f64,
}

impl Default for TriangleParams {
    fn default() -> Self {
        Self {
            base: 100.0,
            height: 100.0,
        }
    }
}

impl Outline for TriangleParams {
    fn outline(&self, _segments: usize) -> Vec<Ring> {
        let (hb, hh) = (self.base / 2.0, self.height / 2.0);
        vec![vec![
            Point::new(-hb, -hh),
            Point::new(hb, -hh),
            Point::new(0.0, hh),
        ]]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipseParams {
    pub radius_x: f64,
    pub radius_y: f64,
}

impl Default for EllipseParams {
    fn default() -> Self {
        Self {
            radius_x: 60.0,
            radius_y: 40.0,
        }
    }
}

impl Outline for EllipseParams {
    fn is_curved(&self) -> bool {
        true
    }

    fn outline(&self, segments: usize) -> Vec<Ring> {
        vec![ellipse_ring(Point::ZERO, self.radius_x, self.radius_y, segments)]
    }
}

/// Regular polygon with its first vertex pointing up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegularPolygonParams {
    pub radius: f64,
    pub sides: u32,
}

impl Default for RegularPolygonParams {
    fn default() -> Self {
        Self {
            radius: 50.0,
            sides: 6,
        }
    }
}

impl Outline for RegularPolygonParams {
    fn outline(&self, _segments: usize) -> Vec<Ring> {
        let sides = self.sides.max(3) as usize;
        let step = TAU / sides as f64;
        vec![
            (0..sides)
                .map(|i| {
                    let a = FRAC_PI_2 + step * i as f64;
                    Point::new(self.radius * a.cos(), self.radius * a.sin())
                })
                .collect(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarParams {
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub points: u32,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            outer_radius: 50.0,
            inner_radius: 20.0,
            points: 5,
        }
    }
}

impl Outline for StarParams {
    fn outline(&self, _segments: usize) -> Vec<Ring> {
        let tips = self.points.max(2) as usize;
        let step = PI / tips as f64;
        vec![
            (0..tips * 2)
                .map(|i| {
                    let r = if i % 2 == 0 {
                        self.outer_radius
                    } else {
                        self.inner_radius
                    };
                    let a = FRAC_PI_2 + step * i as f64;
                    Point::new(r * a.cos(), r * a.sin())
                })
                .collect(),
        ]
    }
}

/// Circular sector (pie slice) between two angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcParams {
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Default for ArcParams {
    fn default() -> Self {
        Self {
            radius: 50.0,
            start_angle: 0.0,
            end_angle: 90.0,
        }
    }
}

impl Outline for ArcParams {
    fn is_curved(&self) -> bool {
        true
    }

    fn outline(&self, segments: usize) -> Vec<Ring> {
        let (lo, hi) = if self.end_angle >= self.start_angle {
            (self.start_angle, self.end_angle)
        } else {
            (self.end_angle, self.start_angle)
        };
        let sweep = hi - lo;
        if sweep >= 360.0 {
            return CircleParams::new(self.radius).outline(segments);
        }
        let count = ((segments as f64 * sweep / 360.0).ceil() as usize).max(8);
        let mut ring = vec![Point::ZERO];
        ring.extend(arc_points(
            Point::ZERO,
            self.radius,
            self.radius,
            lo.to_radians(),
            hi.to_radians(),
            count,
        ));
        vec![ring]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundedRectangleParams {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl Default for RoundedRectangleParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 60.0,
            radius: 10.0,
        }
    }
}

impl Outline for RoundedRectangleParams {
    fn is_curved(&self) -> bool {
        true
    }

    fn outline(&self, segments: usize) -> Vec<Ring> {
        let r = self.radius.clamp(0.0, self.width.min(self.height) / 2.0);
        if r <= 0.0 {
            return vec![rect_corners(self.width, self.height)];
        }
        let (hw, hh) = (self.width / 2.0 - r, self.height / 2.0 - r);
        let per_corner = (segments / 4).max(2);
        // Corner centers in counter-clockwise order, starting bottom-right.
        let corners = [
            (Point::new(hw, -hh), -FRAC_PI_2),
            (Point::new(hw, hh), 0.0),
            (Point::new(-hw, hh), FRAC_PI_2),
            (Point::new(-hw, -hh), PI),
        ];
        let ring = corners
            .iter()
            .flat_map(|&(c, start)| arc_points(c, r, r, start, start + FRAC_PI_2, per_corner))
            .collect();
        vec![ring]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChamferRectangleParams {
    pub width: f64,
    pub height: f64,
    pub chamfer: f64,
}

impl Default for ChamferRectangleParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 60.0,
            chamfer: 10.0,
        }
    }
}

impl Outline for ChamferRectangleParams {
    fn outline(&self, _segments: usize) -> Vec<Ring> {
        let c = self.chamfer.clamp(0.0, self.width.min(self.height) / 2.0);
        if c <= 0.0 {
            return vec![rect_corners(self.width, self.height)];
        }
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        vec![vec![
            Point::new(-hw + c, -hh),
            Point::new(hw - c, -hh),
            Point::new(hw, -hh + c),
            Point::new(hw, hh - c),
            Point::new(hw - c, hh),
            Point::new(-hw + c, hh),
            Point::new(-hw, hh - c),
            Point::new(-hw, -hh + c),
        ]]
    }
}

/// Block arrow pointing along +x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowParams {
    pub length: f64,
    pub shaft_width: f64,
    pub head_width: f64,
    pub head_length: f64,
}

impl Default for ArrowParams {
    fn default() -> Self {
        Self {
            length: 100.0,
            shaft_width: 20.0,
            head_width: 40.0,
            head_length: 30.0,
        }
    }
}

impl Outline for ArrowParams {
    fn outline(&self, _segments: usize) -> Vec<Ring> {
        let half = self.length / 2.0;
        let head = self.head_length.clamp(0.0, self.length);
        let neck = half - head;
        let (sw, hw) = (self.shaft_width / 2.0, self.head_width.max(self.shaft_width) / 2.0);
        vec![vec![
            Point::new(-half, -sw),
            Point::new(neck, -sw),
            Point::new(neck, -hw),
            Point::new(half, 0.0),
            Point::new(neck, hw),
            Point::new(neck, sw),
            Point::new(-half, sw),
        ]]
    }
}

/// Ring-shaped disc; samples as an outer ring plus a hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonutParams {
    pub outer_radius: f64,
    pub inner_radius: f64,
}

impl Default for DonutParams {
    fn default() -> Self {
        Self {
            outer_radius: 50.0,
            inner_radius: 25.0,
        }
    }
}

impl Outline for DonutParams {
    fn is_curved(&self) -> bool {
        true
    }

    fn outline(&self, segments: usize) -> Vec<Ring> {
        let outer = ellipse_ring(Point::ZERO, self.outer_radius, self.outer_radius, segments);
        let inner_r = self.inner_radius.min(self.outer_radius);
        if inner_r <= 0.0 {
            return vec![outer];
        }
        let mut inner = ellipse_ring(Point::ZERO, inner_r, inner_r, segments);
        inner.reverse();
        vec![outer, inner]
    }
}

/// Archimedean spiral drawn as a band of constant width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralParams {
    pub start_radius: f64,
    pub end_radius: f64,
    pub turns: f64,
    pub width: f64,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            start_radius: 10.0,
            end_radius: 50.0,
            turns: 3.0,
            width: 4.0,
        }
    }
}

impl Outline for SpiralParams {
    fn is_curved(&self) -> bool {
        true
    }

    fn outline(&self, segments: usize) -> Vec<Ring> {
        let turns = self.turns.max(0.1);
        let count = ((segments as f64 * turns).ceil() as usize).max(8);
        let sweep = TAU * turns;
        let half = self.width / 2.0;
        let centerline = |i: usize| {
            let f = i as f64 / count as f64;
            let r = self.start_radius + (self.end_radius - self.start_radius) * f;
            (r, sweep * f)
        };

        let mut ring = Ring::with_capacity(2 * (count + 1));
        for i in 0..=count {
            let (r, a) = centerline(i);
            let r = r + half;
            ring.push(Point::new(r * a.cos(), r * a.sin()));
        }
        for i in (0..=count).rev() {
            let (r, a) = centerline(i);
            let r = (r - half).max(0.0);
            ring.push(Point::new(r * a.cos(), r * a.sin()));
        }
        vec![ring]
    }
}

/// Plus sign with equal arms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossParams {
    pub width: f64,
    pub thickness: f64,
}

impl Default for CrossParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            thickness: 30.0,
        }
    }
}

impl Outline for CrossParams {
    fn outline(&self, _segments: usize) -> Vec<Ring> {
        let s = self.width / 2.0;
        let t = self.thickness.clamp(0.0, self.width) / 2.0;
        vec![vec![
            Point::new(-t, -s),
            Point::new(t, -s),
            Point::new(t, -t),
            Point::new(s, -t),
            Point::new(s, t),
            Point::new(t, t),
            Point::new(t, s),
            Point::new(-t, s),
            Point::new(-t, t),
            Point::new(-s, t),
            Point::new(-s, -t),
            Point::new(-t, -t),
        ]]
    }
}

/// Sine wave band along the x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    pub width: f64,
    pub amplitude: f64,
    /// Full periods across the width.
    pub frequency: f64,
    pub thickness: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            width: 200.0,
            amplitude: 20.0,
            frequency: 2.0,
            thickness: 10.0,
        }
    }
}

impl Outline for WaveParams {
    fn is_curved(&self) -> bool {
        true
    }

    fn outline(&self, segments: usize) -> Vec<Ring> {
        let count = ((segments as f64 * self.frequency.max(1.0)).ceil() as usize).max(8);
        let half = self.thickness / 2.0;
        let sample = |i: usize| {
            let f = i as f64 / count as f64;
            let x = -self.width / 2.0 + self.width * f;
            (x, self.amplitude * (TAU * self.frequency * f).sin())
        };

        let mut ring = Ring::with_capacity(2 * (count + 1));
        ring.extend((0..=count).map(|i| {
            let (x, y) = sample(i);
            Point::new(x, y - half)
        }));
        ring.extend((0..=count).rev().map(|i| {
            let (x, y) = sample(i);
            Point::new(x, y + half)
        }));
        vec![ring]
    }
}

/// Stadium: a rectangle with semicircular ends along x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotParams {
    /// Overall length including the rounded ends.
    pub length: f64,
    pub width: f64,
}

impl Default for SlotParams {
    fn default() -> Self {
        Self {
            length: 100.0,
            width: 30.0,
        }
    }
}

impl Outline for SlotParams {
    fn is_curved(&self) -> bool {
        true
    }

    fn outline(&self, segments: usize) -> Vec<Ring> {
        let r = self.width / 2.0;
        let offset = (self.length / 2.0 - r).max(0.0);
        let per_end = (segments / 2).max(4);
        let mut ring: Ring = arc_points(Point::new(offset, 0.0), r, r, -FRAC_PI_2, FRAC_PI_2, per_end)
            .collect();
        ring.extend(arc_points(
            Point::new(-offset, 0.0),
            r,
            r,
            FRAC_PI_2,
            PI + FRAC_PI_2,
            per_end,
        ));
        vec![ring]
    }
}
