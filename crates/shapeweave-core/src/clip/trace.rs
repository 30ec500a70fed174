//! Pairwise clipping of two ring sets by boundary tracing.
//!
//! Both operands must already be normalized so that the region lies on the
//! left of every edge (outer rings CCW, holes CW).

use crate::config::EngineConfig;
use crate::geometry::{
    Ring, bounding_box, point_in_ring_strict, point_to_segment_dist, rects_touch, ring_edges,
    segment_intersection_params, sort_by_polar_angle,
};
use kurbo::{Point, Vec2};
use std::collections::HashMap;
use std::f64::consts::PI;

/// The three primitive set operations; xor is composed from these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PairOp {
    Union,
    Intersection,
    Difference,
}

/// Rings produced by one pairwise clip.
#[derive(Debug, Clone, Default)]
pub(crate) struct PairOutput {
    pub rings: Vec<Ring>,
    /// False when a walk hit the iteration cap or a dead end.
    pub complete: bool,
}

impl PairOutput {
    fn closed(rings: Vec<Ring>) -> Self {
        Self {
            rings,
            complete: true,
        }
    }
}

/// Where a boundary fragment sits relative to the other operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Inside,
    Outside,
    /// Lies along the other boundary, running the same way or against it.
    Shared { same_direction: bool },
}

#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: Point,
    end: Point,
}

impl Fragment {
    fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    fn direction(&self) -> Vec2 {
        self.end - self.start
    }
}

/// Split points per ring, per edge, as (parameter along edge, point).
type EdgeSplits = Vec<Vec<Vec<(f64, Point)>>>;

/// Clip operand `a` against operand `b`.
pub(crate) fn clip_pair(op: PairOp, a: &[Ring], b: &[Ring], config: &EngineConfig) -> PairOutput {
    if a.is_empty() || b.is_empty() {
        let rings = match (op, a.is_empty()) {
            (PairOp::Union, true) => b.to_vec(),
            (PairOp::Union | PairOp::Difference, false) => a.to_vec(),
            _ => Vec::new(),
        };
        return PairOutput::closed(rings);
    }

    let mut splits_a = empty_splits(a);
    let mut splits_b = empty_splits(b);
    let contacts = find_contacts(a, b, &mut splits_a, &mut splits_b, config);

    if contacts == 0 {
        log::debug!("{:?}: no boundary contact, resolving by containment", op);
        return PairOutput::closed(resolve_by_containment(op, a, b));
    }

    let tol = config.boundary_tolerance;
    let mut kept = Vec::new();
    for frag in fragments(a, &splits_a, tol) {
        let keep = matches!(
            (op, classify(&frag, b, tol)),
            (PairOp::Union, Side::Outside | Side::Shared { same_direction: true })
                | (PairOp::Intersection, Side::Inside | Side::Shared { same_direction: true })
                | (PairOp::Difference, Side::Outside | Side::Shared { same_direction: false })
        );
        if keep {
            kept.push(frag);
        }
    }
    for frag in fragments(b, &splits_b, tol) {
        match (op, classify(&frag, a, tol)) {
            (PairOp::Union, Side::Outside) | (PairOp::Intersection, Side::Inside) => kept.push(frag),
            (PairOp::Difference, Side::Inside) => kept.push(frag.reversed()),
            _ => {}
        }
    }

    let vertices: usize = a.iter().chain(b).map(Vec::len).sum();
    let cap = config.trace_iteration_factor * (vertices + contacts) + 16;
    log::debug!(
        "{:?}: {} contacts, {} fragments kept, walk cap {}",
        op,
        contacts,
        kept.len(),
        cap
    );
    trace_rings(&kept, cap, config)
}

/// Check whether `p` lies inside the region described by `rings` (even-odd).
pub(crate) fn region_contains(rings: &[Ring], p: Point) -> bool {
    rings.iter().filter(|r| point_in_ring_strict(p, r)).count() % 2 == 1
}

/// Check whether ring `inner` lies inside ring `outer`, judged by the first
/// vertex of `inner` that is not on `outer`'s boundary.
pub(crate) fn ring_inside(inner: &[Point], outer: &[Point], tol: f64) -> bool {
    inner
        .iter()
        .find(|&&v| !crate::geometry::point_on_ring_boundary(v, outer, tol))
        .is_some_and(|&v| point_in_ring_strict(v, outer))
}

fn empty_splits(rings: &[Ring]) -> EdgeSplits {
    rings.iter().map(|r| vec![Vec::new(); r.len()]).collect()
}

/// Record every crossing and touching point between the two operands.
///
/// Returns the number of contacts found.
fn find_contacts(
    a: &[Ring],
    b: &[Ring],
    splits_a: &mut EdgeSplits,
    splits_b: &mut EdgeSplits,
    config: &EngineConfig,
) -> usize {
    let tol = config.boundary_tolerance;
    let mut contacts = 0;

    for (ia, ring_a) in a.iter().enumerate() {
        let Some(bb_a) = bounding_box(ring_a) else {
            continue;
        };
        for (ib, ring_b) in b.iter().enumerate() {
            let Some(bb_b) = bounding_box(ring_b) else {
                continue;
            };
            if !rects_touch(bb_a, bb_b, tol) {
                continue;
            }

            for (ea, (a0, a1)) in ring_edges(ring_a).enumerate() {
                for (eb, (b0, b1)) in ring_edges(ring_b).enumerate() {
                    if let Some((p, t, u)) =
                        segment_intersection_params(a0, a1, b0, b1, config.epsilon)
                    {
                        // Reuse an existing vertex so both sides share exact coordinates.
                        let p = [a0, a1, b0, b1]
                            .into_iter()
                            .find(|v| v.distance(p) < tol)
                            .unwrap_or(p);
                        splits_a[ia][ea].push((t, p));
                        splits_b[ib][eb].push((u, p));
                        contacts += 1;
                    }
                }
            }

            // Collinear overlaps produce no crossing; their ends show up as
            // vertices lying on the other ring's edges.
            contacts += vertices_on_edges(ring_b, ring_a, &mut splits_a[ia], tol);
            contacts += vertices_on_edges(ring_a, ring_b, &mut splits_b[ib], tol);
        }
    }
    contacts
}

fn vertices_on_edges(
    vertices: &[Point],
    ring: &[Point],
    splits: &mut [Vec<(f64, Point)>],
    tol: f64,
) -> usize {
    let mut found = 0;
    for &v in vertices {
        for (edge, (s, e)) in ring_edges(ring).enumerate() {
            if point_to_segment_dist(v, s, e) < tol {
                let seg = e - s;
                let len_sq = seg.hypot2();
                let t = if len_sq > 0.0 {
                    ((v - s).dot(seg) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                splits[edge].push((t, v));
                found += 1;
            }
        }
    }
    found
}

/// Cut every edge at its split points.
fn fragments(rings: &[Ring], splits: &EdgeSplits, tol: f64) -> Vec<Fragment> {
    let mut out = Vec::new();
    for (ring, ring_splits) in rings.iter().zip(splits) {
        for ((start, end), edge_splits) in ring_edges(ring).zip(ring_splits) {
            let mut cuts = edge_splits.clone();
            cuts.sort_by(|x, y| x.0.total_cmp(&y.0));

            let mut edge_frags: Vec<Fragment> = Vec::with_capacity(cuts.len() + 1);
            let mut prev = start;
            for (_, p) in cuts {
                if prev.distance(p) < tol || p.distance(end) < tol {
                    continue;
                }
                edge_frags.push(Fragment { start: prev, end: p });
                prev = p;
            }
            if prev.distance(end) >= tol {
                edge_frags.push(Fragment { start: prev, end });
            } else if let Some(last) = edge_frags.last_mut() {
                last.end = end;
            }
            out.extend(edge_frags);
        }
    }
    out
}

fn classify(frag: &Fragment, other: &[Ring], tol: f64) -> Side {
    let mid = frag.start.midpoint(frag.end);

    let mut nearest: Option<(f64, Vec2)> = None;
    for ring in other {
        for (s, e) in ring_edges(ring) {
            let d = point_to_segment_dist(mid, s, e);
            if d < tol && nearest.is_none_or(|(best, _)| d < best) {
                nearest = Some((d, e - s));
            }
        }
    }
    if let Some((_, edge_dir)) = nearest {
        return Side::Shared {
            same_direction: frag.direction().dot(edge_dir) > 0.0,
        };
    }

    if region_contains(other, mid) {
        Side::Inside
    } else {
        Side::Outside
    }
}

/// Whole-ring decisions for operands whose boundaries never meet.
///
/// A ring inside a hole of the other operand counts as outside it.
fn resolve_by_containment(op: PairOp, a: &[Ring], b: &[Ring]) -> Vec<Ring> {
    let a_in_b = |r: &Ring| region_contains(b, r[0]);
    let b_in_a = |r: &Ring| region_contains(a, r[0]);

    let mut rings = Vec::new();
    match op {
        PairOp::Union => {
            rings.extend(a.iter().filter(|r| !a_in_b(r)).cloned());
            rings.extend(b.iter().filter(|r| !b_in_a(r)).cloned());
        }
        PairOp::Intersection => {
            rings.extend(a.iter().filter(|r| a_in_b(r)).cloned());
            rings.extend(b.iter().filter(|r| b_in_a(r)).cloned());
        }
        PairOp::Difference => {
            rings.extend(a.iter().filter(|r| !a_in_b(r)).cloned());
            rings.extend(b.iter().filter(|r| b_in_a(r)).map(|r| {
                let mut hole = r.clone();
                hole.reverse();
                hole
            }));
        }
    }
    rings
}

/// Grid cell used to match fragment endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GridKey(i64, i64);

impl GridKey {
    fn of(p: Point, scale: f64) -> Self {
        Self((p.x * scale).round() as i64, (p.y * scale).round() as i64)
    }

    fn near(self, other: Self) -> bool {
        (self.0 - other.0).abs() <= 1 && (self.1 - other.1).abs() <= 1
    }

    fn neighborhood(self) -> impl Iterator<Item = Self> {
        (-1..=1).flat_map(move |dx| (-1..=1).map(move |dy| Self(self.0 + dx, self.1 + dy)))
    }
}

/// Signed turn from `incoming` to `outgoing`; a full reversal ranks last.
///
/// Angles within `eps` of π count as a reversal.
fn turn_angle(incoming: Vec2, outgoing: Vec2, eps: f64) -> f64 {
    let angle = incoming.cross(outgoing).atan2(incoming.dot(outgoing));
    if angle >= PI - eps { -PI } else { angle }
}

/// Walk the kept fragments into closed rings.
fn trace_rings(frags: &[Fragment], cap: usize, config: &EngineConfig) -> PairOutput {
    let scale = config.snap_scale();
    let mut outgoing: HashMap<GridKey, Vec<usize>> = HashMap::new();
    for (i, frag) in frags.iter().enumerate() {
        outgoing.entry(GridKey::of(frag.start, scale)).or_default().push(i);
    }

    let mut used = vec![false; frags.len()];
    let mut rings = Vec::new();
    let mut complete = true;
    let mut steps = 0usize;

    for first in 0..frags.len() {
        if used[first] {
            continue;
        }
        if steps > cap {
            complete = false;
            break;
        }
        used[first] = true;
        let start_key = GridKey::of(frags[first].start, scale);
        let mut ring = vec![frags[first].start];
        let mut current = first;

        let closed = loop {
            let here = frags[current].end;
            let here_key = GridKey::of(here, scale);
            if here_key.near(start_key) {
                break true;
            }
            ring.push(here);
            steps += 1;
            if steps > cap {
                log::warn!("Boundary walk hit its cap of {} steps", cap);
                break false;
            }
            let incoming = frags[current].direction();
            match next_fragment(frags, &outgoing, &used, here_key, incoming, config.epsilon) {
                Some(next) => {
                    used[next] = true;
                    current = next;
                }
                None => break false,
            }
        };

        if !closed {
            complete = false;
            sort_by_polar_angle(&mut ring);
        }
        if ring.len() >= 3 {
            rings.push(ring);
        }
    }

    PairOutput { rings, complete }
}

/// Pick the continuation at a junction: the unused fragment turning furthest left.
fn next_fragment(
    frags: &[Fragment],
    outgoing: &HashMap<GridKey, Vec<usize>>,
    used: &[bool],
    key: GridKey,
    incoming: Vec2,
    eps: f64,
) -> Option<usize> {
    let unused = |keys: &mut dyn Iterator<Item = GridKey>| -> Vec<usize> {
        keys.filter_map(|k| outgoing.get(&k))
            .flatten()
            .copied()
            .filter(|&i| !used[i])
            .collect()
    };

    let mut candidates = unused(&mut std::iter::once(key));
    if candidates.is_empty() {
        candidates = unused(&mut key.neighborhood());
    }
    candidates.into_iter().max_by(|&x, &y| {
        turn_angle(incoming, frags[x].direction(), eps)
            .total_cmp(&turn_angle(incoming, frags[y].direction(), eps))
    })
}
