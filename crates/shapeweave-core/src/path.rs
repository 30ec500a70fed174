//! Flat, sentinel-separated encoding of multi-ring regions.
//!
//! A region with holes travels as one point list: the outer ring first, then
//! each hole, with `None` between consecutive rings.

use crate::geometry::{Ring, is_ccw};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// An outer ring followed by zero or more holes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiRingPath {
    pub rings: Vec<Ring>,
}

impl MultiRingPath {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    /// The outer boundary, if any.
    pub fn outer(&self) -> Option<&Ring> {
        self.rings.first()
    }

    /// Rings after the outer boundary.
    pub fn holes(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Check the winding invariant: outer ring CCW, every hole CW.
    pub fn has_valid_orientation(&self) -> bool {
        match self.rings.split_first() {
            None => true,
            Some((outer, holes)) => is_ccw(outer) && holes.iter().all(|h| !is_ccw(h)),
        }
    }

    /// Flatten into a point list with `None` between rings.
    ///
    /// Empty rings are skipped, so a sentinel never leads, trails or repeats.
    pub fn encode(&self) -> Vec<Option<Point>> {
        let total: usize = self.rings.iter().map(|r| r.len() + 1).sum();
        let mut flat = Vec::with_capacity(total);
        for ring in self.rings.iter().filter(|r| !r.is_empty()) {
            if !flat.is_empty() {
                flat.push(None);
            }
            flat.extend(ring.iter().copied().map(Some));
        }
        flat
    }

    /// Rebuild the ring partition from a flat point list.
    ///
    /// Leading, trailing and repeated sentinels produce no empty rings.
    pub fn decode(flat: &[Option<Point>]) -> Self {
        let rings = flat
            .split(Option::is_none)
            .filter(|run| !run.is_empty())
            .map(|run| run.iter().flatten().copied().collect())
            .collect();
        Self { rings }
    }
}
