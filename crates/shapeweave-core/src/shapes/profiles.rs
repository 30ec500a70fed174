//! Mechanical and woodworking-joint profiles. All straight-edged.

use super::Outline;
use crate::geometry::Ring;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Spur gear with trapezoidal teeth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GearParams {
    pub teeth: u32,
    /// Tip radius.
    pub radius: f64,
    pub tooth_depth: f64,
}

impl Default for GearParams {
    fn default() -> Self {
        Self {
            teeth: 12,
            radius: 50.0,
            tooth_depth: 8.0,
        }
    }
}

impl Outline for GearParams {
    fn outline(&self, _segments: usize) -> Vec<Ring> {
        let teeth = self.teeth.max(3) as usize;
        let pitch = TAU / teeth as f64;
        let root = (self.radius - self.tooth_depth).max(self.radius * 0.1);
        let polar = |r: f64, a: f64| Point::new(r * a.cos(), r * a.sin());

        let mut ring = Ring::with_capacity(teeth * 4);
        for i in 0..teeth {
            let a0 = pitch * i as f64;
            ring.push(polar(root, a0));
            ring.push(polar(self.radius, a0 + pitch * 0.2));
            ring.push(polar(self.radius, a0 + pitch * 0.5));
            ring.push(polar(root, a0 + pitch * 0.7));
        }
        vec![ring]
    }
}

/// Board end with rectangular fingers along its top edge (box joint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerJointParams {
    pub width: f64,
    pub height: f64,
    pub fingers: u32,
    pub finger_depth: f64,
}

impl Default for FingerJointParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 30.0,
            fingers: 5,
            finger_depth: 10.0,
        }
    }
}

impl Outline for FingerJointParams {
    fn outline(&self, _segments: usize) -> Vec<Ring> {
        let fingers = self.fingers.max(1) as usize;
        let slots = 2 * fingers - 1;
        let slot_w = self.width / slots as f64;
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        let base = hh - self.finger_depth.clamp(0.0, self.height);

        let mut ring = vec![Point::new(-hw, -hh), Point::new(hw, -hh)];
        // Walk the top edge right to left; even slots are fingers.
        for k in (0..slots).rev() {
            let x0 = -hw + slot_w * k as f64;
            let y = if k % 2 == 0 { hh } else { base };
            ring.push(Point::new(-hw + slot_w * (k + 1) as f64, y));
            ring.push(Point::new(x0, y));
        }
        vec![ring]
    }
}

/// Board end with flared dovetail tails along its top edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DovetailParams {
    pub width: f64,
    pub height: f64,
    pub tails: u32,
    pub tail_depth: f64,
    /// Flare angle of each tail side, in degrees.
    pub angle: f64,
}

impl Default for DovetailParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 40.0,
            tails: 3,
            tail_depth: 15.0,
            angle: 14.0,
        }
    }
}

impl Outline for DovetailParams {
    fn outline(&self, _segments: usize) -> Vec<Ring> {
        let tails = self.tails.max(1) as usize;
        let slots = 2 * tails + 1;
        let slot_w = self.width / slots as f64;
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        let depth = self.tail_depth.clamp(0.0, self.height);
        let base = hh - depth;
        // Flare is capped so neighbouring tails never touch.
        let flare = (depth * self.angle.to_radians().tan()).clamp(0.0, slot_w * 0.45);

        let mut ring = vec![Point::new(-hw, -hh), Point::new(hw, -hh)];
        for k in (0..slots).rev() {
            let x0 = -hw + slot_w * k as f64;
            let x1 = -hw + slot_w * (k + 1) as f64;
            if k % 2 == 1 {
                ring.push(Point::new(x1, base));
                ring.push(Point::new(x1 + flare, hh));
                ring.push(Point::new(x0 - flare, hh));
                ring.push(Point::new(x0, base));
            } else {
                ring.push(Point::new(x1, base));
                ring.push(Point::new(x0, base));
            }
        }
        // Neighbouring slots share their base corner.
        ring.dedup();
        vec![ring]
    }
}

/// Board with a centered tenon tongue on its right end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenonParams {
    /// Overall width including the tenon.
    pub width: f64,
    pub height: f64,
    pub tenon_width: f64,
    pub tenon_length: f64,
}

impl Default for TenonParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 40.0,
            tenon_width: 20.0,
            tenon_length: 25.0,
        }
    }
}

impl Outline for TenonParams {
    fn outline(&self, _segments: usize) -> Vec<Ring> {
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        let shoulder = hw - self.tenon_length.clamp(0.0, self.width);
        let tw = self.tenon_width.clamp(0.0, self.height) / 2.0;
        vec![vec![
            Point::new(-hw, -hh),
            Point::new(shoulder, -hh),
            Point::new(shoulder, -tw),
            Point::new(hw, -tw),
            Point::new(hw, tw),
            Point::new(shoulder, tw),
            Point::new(shoulder, hh),
            Point::new(-hw, hh),
        ]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{is_ccw, ring_area};

    #[test]
    fn test_gear_vertex_count_and_bounds() {
        let ring = &GearParams::default().outline(96)[0];
        assert_eq!(ring.len(), 48);
        let max_r = ring.iter().map(|p| p.to_vec2().hypot()).fold(0.0, f64::max);
        assert!((max_r - 50.0).abs() < 1e-9);
        assert!(is_ccw(ring));
    }

    #[test]
    fn test_finger_joint_area() {
        let params = FingerJointParams::default();
        let ring = &params.outline(96)[0];
        // Body below the fingers plus five 10 × 10 fingers.
        let body = 100.0 * 20.0;
        let fingers = 5.0 * (100.0 / 9.0) * 10.0;
        assert!((ring_area(ring) - (body + fingers)).abs() < 1e-9);
        assert!(is_ccw(ring));
    }

    #[test]
    fn test_dovetail_is_ccw_and_larger_than_body() {
        let params = DovetailParams::default();
        let ring = &params.outline(96)[0];
        assert!(is_ccw(ring));
        assert!(ring_area(ring) > 100.0 * 25.0);
    }

    #[test]
    fn test_tenon_area() {
        let ring = &TenonParams::default().outline(96)[0];
        let exact = 75.0 * 40.0 + 25.0 * 20.0;
        assert!((ring_area(ring) - exact).abs() < 1e-9);
        assert!(is_ccw(ring));
    }
}
