//! Boolean clipping of sampled ring sets.
//!
//! Operands arrive as raw rings from the sampler. Each is first normalized so
//! the region lies left of every edge (winding chosen by nesting depth), then
//! folded pairwise:
//!
//! - union: left to right, a single operand is returned as is
//! - intersection: left to right, stopping once the result is empty
//! - difference: every later operand subtracted from the first
//! - xor: exactly two operands, `(A ∪ B) − (A ∩ B)`
//!
//! The final rings are ordered largest first; the first ring winds CCW and
//! every following ring CW.

mod trace;

use crate::config::EngineConfig;
use crate::error::{BooleanError, BooleanResult, EngineWarning};
use crate::geometry::{Ring, is_ccw, ring_area};
use serde::{Deserialize, Serialize};
use trace::{PairOp, PairOutput, clip_pair, ring_inside};

/// The four supported set operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanOp {
    Union,
    Difference,
    Intersection,
    Xor,
}

impl BooleanOp {
    pub const ALL: [BooleanOp; 4] = [
        BooleanOp::Union,
        BooleanOp::Difference,
        BooleanOp::Intersection,
        BooleanOp::Xor,
    ];

    /// Lowercase operation name.
    pub fn name(self) -> &'static str {
        match self {
            BooleanOp::Union => "union",
            BooleanOp::Difference => "difference",
            BooleanOp::Intersection => "intersection",
            BooleanOp::Xor => "xor",
        }
    }

    /// Single-letter tag used in generated result names.
    pub fn symbol(self) -> char {
        match self {
            BooleanOp::Union => 'U',
            BooleanOp::Difference => 'D',
            BooleanOp::Intersection => 'I',
            BooleanOp::Xor => 'X',
        }
    }

    /// Look up an operation from its result-name tag.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Validate the number of input shapes.
    pub fn check_input_count(self, actual: usize) -> BooleanResult<()> {
        let (ok, expected) = match self {
            BooleanOp::Union => (actual >= 1, "at least 1"),
            BooleanOp::Difference | BooleanOp::Intersection => (actual >= 2, "at least 2"),
            BooleanOp::Xor => (actual == 2, "exactly 2"),
        };
        if ok {
            Ok(())
        } else {
            Err(BooleanError::InputCount {
                operation: self,
                expected,
                actual,
            })
        }
    }
}

impl std::fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One named input to a clip.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    pub name: String,
    pub rings: Vec<Ring>,
}

impl Operand {
    pub fn new(name: impl Into<String>, rings: Vec<Ring>) -> Self {
        Self {
            name: name.into(),
            rings,
        }
    }
}

/// Rings produced by a clip, largest first, plus non-fatal warnings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipOutput {
    pub rings: Vec<Ring>,
    pub warnings: Vec<EngineWarning>,
}

impl ClipOutput {
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Net enclosed area under the even-odd rule.
    ///
    /// Rings at even nesting depth add their area and rings at odd depth
    /// subtract it, whatever their winding.
    pub fn area(&self) -> f64 {
        self.rings
            .iter()
            .enumerate()
            .map(|(i, ring)| {
                let depth = self
                    .rings
                    .iter()
                    .enumerate()
                    .filter(|&(j, other)| j != i && ring_inside(ring, other, 0.0))
                    .count();
                if depth % 2 == 0 { ring_area(ring) } else { -ring_area(ring) }
            })
            .sum()
    }
}

/// Run a boolean operation over named operands.
///
/// An unusable first operand (or either xor operand) is an error; unusable
/// later operands are skipped with a warning.
pub fn clip(op: BooleanOp, operands: Vec<Operand>, config: &EngineConfig) -> BooleanResult<ClipOutput> {
    op.check_input_count(operands.len())?;

    let mut warnings = Vec::new();
    let mut usable: Vec<Vec<Ring>> = Vec::with_capacity(operands.len());
    for (index, operand) in operands.into_iter().enumerate() {
        let rings = normalize_operand(&operand.rings, config.boundary_tolerance);
        if !rings.is_empty() {
            usable.push(rings);
            continue;
        }

        let points = operand.rings.iter().map(Vec::len).sum();
        if index == 0 || op == BooleanOp::Xor {
            return Err(BooleanError::InsufficientPoints {
                shape: operand.name,
                points,
            });
        }
        log::warn!(
            "Skipping shape '{}' in {}: no ring with 3 or more points and non-zero area ({} point(s))",
            operand.name,
            op,
            points
        );
        warnings.push(EngineWarning::SkippedShape {
            shape: operand.name,
            points,
        });
    }

    let mut iter = usable.into_iter();
    let Some(first) = iter.next() else {
        return Ok(ClipOutput {
            rings: Vec::new(),
            warnings,
        });
    };

    let mut complete = true;
    let mut step = |pair_op: PairOp, acc: &[Ring], next: &[Ring]| -> Vec<Ring> {
        let PairOutput {
            rings,
            complete: closed,
        } = clip_pair(pair_op, acc, next, config);
        complete &= closed;
        let rings: Vec<Ring> = rings
            .into_iter()
            .map(|r| drop_collinear(r, config.epsilon))
            .collect();
        normalize_operand(&rings, config.boundary_tolerance)
    };

    let rings = match op {
        BooleanOp::Union => iter.fold(first, |acc, next| step(PairOp::Union, &acc, &next)),
        BooleanOp::Intersection | BooleanOp::Difference => {
            let pair_op = if op == BooleanOp::Intersection {
                PairOp::Intersection
            } else {
                PairOp::Difference
            };
            let mut acc = first;
            for next in iter {
                if acc.is_empty() {
                    break;
                }
                acc = step(pair_op, &acc, &next);
            }
            acc
        }
        BooleanOp::Xor => {
            let second = iter.next().unwrap_or_default();
            let either = step(PairOp::Union, &first, &second);
            let both = step(PairOp::Intersection, &first, &second);
            step(PairOp::Difference, &either, &both)
        }
    };

    if !complete {
        log::warn!("{} boundary trace did not close cleanly", op);
        warnings.push(EngineWarning::TraceIncomplete { operation: op });
    }

    Ok(ClipOutput {
        rings: finalize(rings, config),
        warnings,
    })
}

/// Remove near-duplicate consecutive points, including across the seam.
pub(crate) fn dedup_ring(ring: &[kurbo::Point], tol: f64) -> Ring {
    let mut out: Ring = Vec::with_capacity(ring.len());
    for &p in ring {
        if out.last().is_none_or(|q| q.distance(p) >= tol) {
            out.push(p);
        }
    }
    while out.len() > 1 && out[0].distance(out[out.len() - 1]) < tol {
        out.pop();
    }
    out
}

/// Remove vertices where the boundary continues straight or doubles back.
pub(crate) fn drop_collinear(mut ring: Ring, eps: f64) -> Ring {
    let mut i = 0;
    let mut since_removal = 0;
    while ring.len() > 3 && since_removal < ring.len() {
        let n = ring.len();
        let idx = i % n;
        let prev = ring[(idx + n - 1) % n];
        let next = ring[(idx + 1) % n];
        let a = ring[idx] - prev;
        let b = next - ring[idx];
        if a.cross(b).abs() <= eps * a.hypot() * b.hypot() {
            ring.remove(idx);
            since_removal = 0;
        } else {
            i = idx + 1;
            since_removal += 1;
        }
    }
    ring
}

/// Clean rings and orient them so the region lies left of every edge.
///
/// Winding follows nesting depth: even depth CCW, odd depth CW.
pub(crate) fn normalize_operand(rings: &[Ring], tol: f64) -> Vec<Ring> {
    let cleaned: Vec<Ring> = rings
        .iter()
        .map(|r| dedup_ring(r, tol))
        .filter(|r| r.len() >= 3 && ring_area(r) > tol * tol)
        .collect();

    cleaned
        .iter()
        .enumerate()
        .map(|(i, ring)| {
            let depth = cleaned
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && ring_inside(ring, other, tol))
                .count();
            let mut ring = ring.clone();
            if is_ccw(&ring) != (depth % 2 == 0) {
                ring.reverse();
            }
            ring
        })
        .collect()
}

/// Final cleanup: drop slivers, order by area, first ring CCW and the rest CW.
fn finalize(rings: Vec<Ring>, config: &EngineConfig) -> Vec<Ring> {
    let tol = config.boundary_tolerance;
    let mut rings: Vec<Ring> = rings
        .into_iter()
        .map(|r| dedup_ring(&r, tol))
        .filter(|r| r.len() >= 3 && ring_area(r) > tol)
        .collect();

    rings.sort_by(|a, b| ring_area(b).total_cmp(&ring_area(a)));
    for (i, ring) in rings.iter_mut().enumerate() {
        if is_ccw(ring) != (i == 0) {
            ring.reverse();
        }
    }
    rings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::signed_area;
    use kurbo::Point;
    use std::f64::consts::PI;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Ring {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    fn circle(cx: f64, cy: f64, r: f64, n: usize) -> Ring {
        (0..n)
            .map(|i| {
                let a = 2.0 * PI * i as f64 / n as f64;
                Point::new(cx + r * a.cos(), cy + r * a.sin())
            })
            .collect()
    }

    fn op(name: &str, ring: Ring) -> Operand {
        Operand::new(name, vec![ring])
    }

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_symbols_and_names() {
        assert_eq!(BooleanOp::Xor.symbol(), 'X');
        assert_eq!(BooleanOp::from_symbol('D'), Some(BooleanOp::Difference));
        assert_eq!(BooleanOp::from_symbol('Q'), None);
        assert_eq!(BooleanOp::Intersection.to_string(), "intersection");
        assert_eq!(serde_json::to_string(&BooleanOp::Union).unwrap(), "\"union\"");
    }

    #[test]
    fn test_input_count_rules() {
        assert!(BooleanOp::Union.check_input_count(1).is_ok());
        assert!(BooleanOp::Union.check_input_count(0).is_err());
        assert!(BooleanOp::Difference.check_input_count(1).is_err());
        assert!(BooleanOp::Xor.check_input_count(3).is_err());
        assert!(BooleanOp::Xor.check_input_count(2).is_ok());
    }

    #[test]
    fn test_union_of_overlapping_squares() {
        let out = clip(
            BooleanOp::Union,
            vec![
                op("a", rect(-5.0, -5.0, 5.0, 5.0)),
                op("b", rect(0.0, -5.0, 10.0, 5.0)),
            ],
            &config(),
        )
        .unwrap();
        assert_eq!(out.rings.len(), 1);
        assert_eq!(out.rings[0].len(), 4);
        assert!((out.area() - 150.0).abs() < 1e-9);
        assert!(is_ccw(&out.rings[0]));
    }

    #[test]
    fn test_union_of_one_shape_is_identity() {
        let ring = circle(0.0, 0.0, 10.0, 96);
        let out = clip(BooleanOp::Union, vec![op("c", ring.clone())], &config()).unwrap();
        assert_eq!(out.rings, vec![ring]);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_difference_of_identical_circles_is_empty() {
        let ring = circle(0.0, 0.0, 25.0, 96);
        let out = clip(
            BooleanOp::Difference,
            vec![op("a", ring.clone()), op("b", ring)],
            &config(),
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_concentric_difference_makes_annulus() {
        let outer = circle(0.0, 0.0, 50.0, 96);
        let inner = circle(0.0, 0.0, 20.0, 96);
        let expected = ring_area(&outer) - ring_area(&inner);
        let out = clip(
            BooleanOp::Difference,
            vec![op("outer", outer), op("inner", inner)],
            &config(),
        )
        .unwrap();
        assert_eq!(out.rings.len(), 2);
        assert!(is_ccw(&out.rings[0]));
        assert!(!is_ccw(&out.rings[1]));
        assert!((out.area() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_overlapping_circles_intersection_is_lens() {
        let a = circle(0.0, 0.0, 10.0, 96);
        let b = circle(10.0, 0.0, 10.0, 96);
        let out = clip(BooleanOp::Intersection, vec![op("a", a.clone()), op("b", b.clone())], &config())
            .unwrap();
        assert_eq!(out.rings.len(), 1);
        // Centers one radius apart: r² (2π/3 − √3/2).
        let lens = 100.0 * (2.0 * PI / 3.0 - 3f64.sqrt() / 2.0);
        assert!((out.area() - lens).abs() / lens < 0.01);

        let union = clip(BooleanOp::Union, vec![op("a", a), op("b", b)], &config()).unwrap();
        let sum = 2.0 * PI * 100.0 - lens;
        assert!((union.area() - sum).abs() / sum < 0.01);
    }

    #[test]
    fn test_xor_of_overlapping_squares() {
        let out = clip(
            BooleanOp::Xor,
            vec![
                op("a", rect(-5.0, -5.0, 5.0, 5.0)),
                op("b", rect(0.0, -5.0, 10.0, 5.0)),
            ],
            &config(),
        )
        .unwrap();
        assert_eq!(out.rings.len(), 2);
        assert!((out.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_xor_of_disjoint_is_both() {
        let out = clip(
            BooleanOp::Xor,
            vec![op("a", rect(0.0, 0.0, 2.0, 2.0)), op("b", rect(5.0, 5.0, 6.0, 6.0))],
            &config(),
        )
        .unwrap();
        assert_eq!(out.rings.len(), 2);
        assert!((ring_area(&out.rings[0]) - 4.0).abs() < 1e-9);
        assert!((out.area() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_area_adds_islands_and_subtracts_holes() {
        let out = clip(
            BooleanOp::Union,
            vec![op("a", rect(0.0, 0.0, 10.0, 10.0)), op("b", rect(20.0, 0.0, 24.0, 4.0))],
            &config(),
        )
        .unwrap();
        assert_eq!(out.rings.len(), 2);
        assert!(!is_ccw(&out.rings[1]));
        assert!((out.area() - 116.0).abs() < 1e-9);

        // Frame with an island inside its hole.
        let mut hole = rect(2.0, 2.0, 8.0, 8.0);
        hole.reverse();
        let nested = ClipOutput {
            rings: vec![rect(0.0, 0.0, 10.0, 10.0), hole, rect(4.0, 4.0, 6.0, 6.0)],
            warnings: Vec::new(),
        };
        assert!((nested.area() - (100.0 - 36.0 + 4.0)).abs() < 1e-9);
    }

    #[test]
    fn test_walk_cap_reports_incomplete_trace() {
        let tight = EngineConfig {
            trace_iteration_factor: 0,
            ..EngineConfig::default()
        };
        let out = clip(
            BooleanOp::Union,
            vec![
                op("a", circle(0.0, 0.0, 10.0, 96)),
                op("b", circle(10.0, 0.0, 10.0, 96)),
            ],
            &tight,
        )
        .unwrap();
        assert_eq!(
            out.warnings,
            vec![EngineWarning::TraceIncomplete {
                operation: BooleanOp::Union
            }]
        );

        let out = clip(
            BooleanOp::Union,
            vec![
                op("a", circle(0.0, 0.0, 10.0, 96)),
                op("b", circle(10.0, 0.0, 10.0, 96)),
            ],
            &config(),
        )
        .unwrap();
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_intersection_stops_once_empty() {
        let out = clip(
            BooleanOp::Intersection,
            vec![
                op("a", rect(0.0, 0.0, 1.0, 1.0)),
                op("b", rect(5.0, 5.0, 6.0, 6.0)),
                op("c", rect(0.0, 0.0, 10.0, 10.0)),
            ],
            &config(),
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_difference_subtracts_each_later_shape() {
        let out = clip(
            BooleanOp::Difference,
            vec![
                op("board", rect(0.0, 0.0, 30.0, 10.0)),
                op("cut1", rect(2.0, 2.0, 4.0, 4.0)),
                op("cut2", rect(20.0, 2.0, 24.0, 6.0)),
            ],
            &config(),
        )
        .unwrap();
        assert_eq!(out.rings.len(), 3);
        assert!((out.area() - (300.0 - 4.0 - 16.0)).abs() < 1e-9);
        assert!(out.rings[1..].iter().all(|r| !is_ccw(r)));
    }

    #[test]
    fn test_unusable_first_operand_is_an_error() {
        let err = clip(
            BooleanOp::Union,
            vec![
                Operand::new("line", vec![vec![Point::ZERO, Point::new(1.0, 0.0)]]),
                op("b", rect(0.0, 0.0, 1.0, 1.0)),
            ],
            &config(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            BooleanError::InsufficientPoints {
                shape: "line".to_string(),
                points: 2
            }
        );
    }

    #[test]
    fn test_zero_area_first_operand_is_an_error() {
        let bowtie = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        let err = clip(
            BooleanOp::Difference,
            vec![op("bowtie", bowtie), op("b", rect(0.0, 0.0, 1.0, 1.0))],
            &config(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            BooleanError::InsufficientPoints {
                shape: "bowtie".to_string(),
                points: 4
            }
        );
        assert!(err.to_string().contains("non-zero area"));
    }

    #[test]
    fn test_unusable_later_operand_is_skipped() {
        let out = clip(
            BooleanOp::Union,
            vec![
                op("a", rect(0.0, 0.0, 1.0, 1.0)),
                Operand::new("dot", vec![vec![Point::ZERO]]),
            ],
            &config(),
        )
        .unwrap();
        assert_eq!(out.rings.len(), 1);
        assert_eq!(
            out.warnings,
            vec![EngineWarning::SkippedShape {
                shape: "dot".to_string(),
                points: 1
            }]
        );
    }

    #[test]
    fn test_normalize_orients_by_depth() {
        let mut outer = rect(0.0, 0.0, 10.0, 10.0);
        outer.reverse();
        let hole = rect(2.0, 2.0, 8.0, 8.0);
        let island = rect(4.0, 4.0, 6.0, 6.0);
        let rings = normalize_operand(&[outer, hole, island], 1e-7);
        assert!(is_ccw(&rings[0]));
        assert!(!is_ccw(&rings[1]));
        assert!(is_ccw(&rings[2]));
        assert!((rings.iter().map(|r| signed_area(r)).sum::<f64>() - (100.0 - 36.0 + 4.0)).abs() < 1e-9);
    }

    #[test]
    fn test_drop_collinear_keeps_corners() {
        let ring = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 5.0),
        ];
        let cleaned = drop_collinear(ring, 1e-9);
        assert_eq!(cleaned.len(), 4);
        assert!((ring_area(&cleaned) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_dedup_ring_closes_seam() {
        let ring = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1e-9, 0.0),
        ];
        assert_eq!(dedup_ring(&ring, 1e-7).len(), 3);
    }
}
