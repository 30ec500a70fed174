//! Point and segment primitives shared by the sampler and the clipper.

use kurbo::{Point, Rect, Vec2};

/// A closed polygon boundary. The last point connects back to the first.
pub type Ring = Vec<Point>;

/// Check whether both coordinate deltas are below `eps`.
#[inline]
pub fn points_equal(a: Point, b: Point, eps: f64) -> bool {
    (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
}

/// Intersection of segments p1-p2 and p3-p4 with the parameters along each.
///
/// Returns `(point, t, u)` where `t` runs along p1-p2 and `u` along p3-p4.
/// Parallel segments return `None`, overlapping collinear ones included.
#[inline]
pub fn segment_intersection_params(
    p1: Point,
    p2: Point,
    p3: Point,
    p4: Point,
    eps: f64,
) -> Option<(Point, f64, f64)> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = d1.cross(d2);
    if denom.abs() < eps {
        return None;
    }

    let w = p3 - p1;
    let t = w.cross(d2) / denom;
    let u = w.cross(d1) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some((p1 + d1 * t, t, u))
    } else {
        None
    }
}

/// Intersection point of segments p1-p2 and p3-p4, if any.
#[inline]
pub fn segment_intersect(p1: Point, p2: Point, p3: Point, p4: Point, eps: f64) -> Option<Point> {
    segment_intersection_params(p1, p2, p3, p4, eps).map(|(p, _, _)| p)
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}

/// Iterate the closing edges of a ring as (start, end) pairs.
pub fn ring_edges(ring: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = ring.len();
    (0..n).map(move |i| (ring[i], ring[(i + 1) % n]))
}

/// Check whether `point` lies within `tolerance` of any edge of `ring`.
pub fn point_on_ring_boundary(point: Point, ring: &[Point], tolerance: f64) -> bool {
    ring.len() >= 2 && ring_edges(ring).any(|(a, b)| point_to_segment_dist(point, a, b) < tolerance)
}

/// Parity (ray casting) test that ignores the boundary.
///
/// Casts a ray to the right and counts edge crossings; odd means inside.
pub fn point_in_ring_strict(point: Point, ring: &[Point]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (ring[i], ring[j]);
        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Point-in-polygon test where points on the boundary count as inside.
///
/// Intersection points produced by the clipper sit exactly on both operands'
/// boundaries; the boundary check keeps the predicate stable there.
pub fn point_in_polygon(point: Point, ring: &[Point], tolerance: f64) -> bool {
    if ring.len() < 3 {
        return false;
    }
    point_on_ring_boundary(point, ring, tolerance) || point_in_ring_strict(point, ring)
}

/// Signed area by the shoelace formula. Positive means counter-clockwise.
pub fn signed_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = ring_edges(ring).map(|(a, b)| a.x * b.y - b.x * a.y).sum();
    twice / 2.0
}

/// Unsigned area of a ring.
#[inline]
pub fn ring_area(ring: &[Point]) -> f64 {
    signed_area(ring).abs()
}

/// Check whether a ring winds counter-clockwise.
#[inline]
pub fn is_ccw(ring: &[Point]) -> bool {
    signed_area(ring) > 0.0
}

/// Arithmetic mean of a point set.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    Some((sum / points.len() as f64).to_point())
}

/// Order points counter-clockwise by angle around their centroid.
///
/// Ties on angle are broken by distance from the centroid so the order is
/// deterministic for collinear points.
pub fn sort_by_polar_angle(points: &mut [Point]) {
    let Some(center) = centroid(points) else {
        return;
    };
    points.sort_by(|a, b| {
        let va = *a - center;
        let vb = *b - center;
        va.atan2()
            .total_cmp(&vb.atan2())
            .then_with(|| va.hypot2().total_cmp(&vb.hypot2()))
    });
}

/// Axis-aligned bounds of a point set.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let mut rect = Rect::from_points(*first, *first);
    for p in &points[1..] {
        rect = rect.union_pt(*p);
    }
    Some(rect)
}

/// Bounds overlap test that treats touching edges as overlapping.
#[inline]
pub(crate) fn rects_touch(a: Rect, b: Rect, tolerance: f64) -> bool {
    a.x0 <= b.x1 + tolerance
        && b.x0 <= a.x1 + tolerance
        && a.y0 <= b.y1 + tolerance
        && b.y0 <= a.y1 + tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Ring {
        vec![
            Point::new(x0, y0),
            Point::new(x0 + size, y0),
            Point::new(x0 + size, y0 + size),
            Point::new(x0, y0 + size),
        ]
    }

    #[test]
    fn test_points_equal_within_tolerance() {
        assert!(points_equal(Point::new(1.0, 2.0), Point::new(1.0 + 1e-12, 2.0), 1e-9));
        assert!(!points_equal(Point::new(1.0, 2.0), Point::new(1.0, 2.001), 1e-9));
    }

    #[test]
    fn test_segment_intersect_crossing() {
        let p = segment_intersect(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
            1e-9,
        )
        .unwrap();
        assert!(points_equal(p, Point::new(5.0, 5.0), 1e-9));
    }

    #[test]
    fn test_segment_intersect_misses_outside_range() {
        let p = segment_intersect(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
            1e-9,
        );
        assert!(p.is_none());
    }

    #[test]
    fn test_segment_intersect_collinear_overlap_is_none() {
        let p = segment_intersect(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(15.0, 0.0),
            1e-9,
        );
        assert!(p.is_none());
    }

    #[test]
    fn test_segment_intersect_touching_endpoint() {
        let (p, t, u) = segment_intersection_params(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            1e-9,
        )
        .unwrap();
        assert!(points_equal(p, Point::new(10.0, 0.0), 1e-9));
        assert!((t - 1.0).abs() < 1e-12);
        assert!(u.abs() < 1e-12);
    }

    #[test]
    fn test_point_in_polygon_boundary_counts_inside() {
        let ring = square(0.0, 0.0, 10.0);
        assert!(point_in_polygon(Point::new(5.0, 5.0), &ring, 1e-7));
        assert!(point_in_polygon(Point::new(10.0, 5.0), &ring, 1e-7));
        assert!(point_in_polygon(Point::new(0.0, 0.0), &ring, 1e-7));
        assert!(!point_in_polygon(Point::new(10.5, 5.0), &ring, 1e-7));
        assert!(!point_in_ring_strict(Point::new(15.0, 5.0), &ring));
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = square(0.0, 0.0, 10.0);
        assert!((signed_area(&ccw) - 100.0).abs() < 1e-10);
        assert!(is_ccw(&ccw));

        let mut cw = ccw.clone();
        cw.reverse();
        assert!((signed_area(&cw) + 100.0).abs() < 1e-10);
        assert!(!is_ccw(&cw));
        assert!((ring_area(&cw) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_degenerate_ring_has_zero_area() {
        let line = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(signed_area(&line), 0.0);
    }

    #[test]
    fn test_centroid_is_mean() {
        let c = centroid(&square(0.0, 0.0, 10.0)).unwrap();
        assert!(points_equal(c, Point::new(5.0, 5.0), 1e-12));
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn test_sort_by_polar_angle_recovers_square() {
        let mut points = vec![
            Point::new(10.0, 10.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
        ];
        sort_by_polar_angle(&mut points);
        assert!(is_ccw(&points));
        assert!((ring_area(&points) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_sort_by_polar_angle_breaks_ties_by_distance() {
        let mut points = vec![
            Point::new(4.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(-3.0, 0.0),
            Point::new(-3.0, 0.0),
        ];
        sort_by_polar_angle(&mut points);
        // Centroid is (0, 0); both positive-x points share angle 0.
        assert_eq!(points[0], Point::new(2.0, 0.0));
        assert_eq!(points[1], Point::new(4.0, 0.0));
    }

    #[test]
    fn test_point_to_segment_dist() {
        let d = point_to_segment_dist(Point::new(5.0, 3.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-12);
        let d = point_to_segment_dist(Point::new(13.0, 4.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_box() {
        let bb = bounding_box(&square(2.0, 3.0, 4.0)).unwrap();
        assert_eq!(bb, Rect::new(2.0, 3.0, 6.0, 7.0));
        assert!(bounding_box(&[]).is_none());
    }
}
