//! Ring simplification and seam handling.
//!
//! All operations work on plain `Vec<Vertex>` rings in degrees. RA is
//! unwrapped (consecutive deltas kept within 180) before any planar math so
//! a ring crossing 0/360 is treated as one contiguous shape.

use sky::normalize_ra;

use crate::geometry::Vertex;

/// Below this squared length a segment is treated as a point.
const DEGENERATE_SEGMENT: f64 = 1e-9;

/// Widest RA step a simplified edge may take. Readers unwrap rings by
/// taking each step the short way round, so edges must stay under 180.
pub const MAX_EDGE_RA_SPAN: f64 = 90.0;

/// Makes RA continuous along the ring by shifting each vertex by ±360 so
/// that it lies within 180 of its predecessor.
pub fn unwrap_ra(vertices: &[Vertex]) -> Vec<Vertex> {
    let Some(first) = vertices.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(vertices.len());
    out.push(*first);
    let mut prev = first.ra;
    for v in &vertices[1..] {
        let mut ra = v.ra;
        let delta = ra - prev;
        if delta > 180.0 {
            ra -= 360.0;
        } else if delta < -180.0 {
            ra += 360.0;
        }
        out.push(Vertex::new(ra, v.dec));
        prev = ra;
    }
    out
}

/// Ramer-Douglas-Peucker simplification in the unwrapped plane, with RA
/// normalised back into `[0, 360)` afterwards. Chords wider than
/// [`MAX_EDGE_RA_SPAN`] are subdivided before normalising. Rings of three
/// vertices or fewer are returned unchanged.
pub fn simplify(vertices: &[Vertex], epsilon: f64) -> Vec<Vertex> {
    if vertices.len() <= 3 {
        return vertices.to_vec();
    }
    let unwrapped = unwrap_ra(vertices);
    let kept = rdp(&unwrapped, epsilon);
    split_long_edges(&kept, MAX_EDGE_RA_SPAN)
        .into_iter()
        .map(|v| Vertex::new(normalize_ra(v.ra), v.dec))
        .collect()
}

/// Iterative RDP with an explicit stack of `(first, last)` spans.
///
/// Endpoints are always kept. A span whose farthest interior point is more
/// than `epsilon` from the chord is split at that point.
pub fn rdp(points: &[Vertex], epsilon: f64) -> Vec<Vertex> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0usize, last)];
    while let Some((first, end)) = stack.pop() {
        if end <= first + 1 {
            continue;
        }
        let mut max_dist = 0.0;
        let mut split = first;
        for i in first + 1..end {
            let d = perpendicular_distance(points[i], points[first], points[end]);
            if d > max_dist {
                max_dist = d;
                split = i;
            }
        }
        if max_dist > epsilon {
            keep[split] = true;
            stack.push((first, split));
            stack.push((split, end));
        }
    }

    points
        .iter()
        .zip(&keep)
        .filter_map(|(p, &k)| k.then_some(*p))
        .collect()
}

/// Inserts evenly spaced vertices into every edge whose RA step exceeds
/// `max_span`, with dec interpolated linearly. Expects unwrapped RA.
pub fn split_long_edges(vertices: &[Vertex], max_span: f64) -> Vec<Vertex> {
    let Some(&first) = vertices.first() else {
        return Vec::new();
    };
    if max_span <= 0.0 {
        return vertices.to_vec();
    }
    let mut out = Vec::with_capacity(vertices.len());
    out.push(first);
    for pair in vertices.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let span = (b.ra - a.ra).abs();
        if span > max_span {
            let pieces = (span / max_span).ceil() as usize;
            for k in 1..pieces {
                let t = k as f64 / pieces as f64;
                out.push(Vertex::new(
                    a.ra + t * (b.ra - a.ra),
                    a.dec + t * (b.dec - a.dec),
                ));
            }
        }
        out.push(b);
    }
    out
}

fn perpendicular_distance(p: Vertex, a: Vertex, b: Vertex) -> f64 {
    let dx = b.ra - a.ra;
    let dy = b.dec - a.dec;
    if dx.abs() < DEGENERATE_SEGMENT && dy.abs() < DEGENERATE_SEGMENT {
        return distance(p, a);
    }
    let t = ((p.ra - a.ra) * dx + (p.dec - a.dec) * dy) / (dx * dx + dy * dy);
    distance(p, Vertex::new(a.ra + t * dx, a.dec + t * dy))
}

fn distance(a: Vertex, b: Vertex) -> f64 {
    (a.ra - b.ra).hypot(a.dec - b.dec)
}

/// Splits every segment that crosses the 0/360 seam by inserting a vertex
/// on each side of the seam (at RA 360 and RA 0) with the dec interpolated
/// along the segment. The output ring is closed.
pub fn bridge_wrap(vertices: &[Vertex]) -> Vec<Vertex> {
    if vertices.is_empty() {
        return Vec::new();
    }
    let ring: Vec<Vertex> = vertices
        .iter()
        .map(|v| Vertex::new(normalize_ra(v.ra), v.dec))
        .collect();

    let mut out: Vec<Vertex> = Vec::with_capacity(ring.len() + 4);
    for (i, &current) in ring.iter().enumerate() {
        let next = ring[(i + 1) % ring.len()];
        append_segment(&mut out, current, next);
    }
    close_ring(&mut out);
    out
}

fn push_distinct(out: &mut Vec<Vertex>, v: Vertex) {
    if out.last().map_or(true, |last| !last.approx_eq(&v)) {
        out.push(v);
    }
}

fn append_segment(out: &mut Vec<Vertex>, current: Vertex, next: Vertex) {
    push_distinct(out, current);

    let mut target_ra = next.ra;
    let delta = target_ra - current.ra;
    if delta > 180.0 {
        target_ra -= 360.0;
    } else if delta < -180.0 {
        target_ra += 360.0;
    }

    let (mut ra, mut dec) = (current.ra, current.dec);
    while !(0.0..=360.0).contains(&target_ra) {
        let seam = if target_ra > 360.0 { 360.0 } else { 0.0 };
        let t = if target_ra == ra {
            0.0
        } else {
            (seam - ra) / (target_ra - ra)
        };
        let seam_dec = dec + t * (next.dec - dec);
        let other_side = 360.0 - seam;

        push_distinct(out, Vertex::new(seam, seam_dec));
        push_distinct(out, Vertex::new(other_side, seam_dec));

        ra = other_side;
        dec = seam_dec;
        target_ra += if seam == 360.0 { -360.0 } else { 360.0 };
    }

    push_distinct(out, Vertex::new(normalize_ra(target_ra), next.dec));
}

fn close_ring(ring: &mut Vec<Vertex>) {
    if let (Some(&first), Some(last)) = (ring.first(), ring.last()) {
        if !last.approx_eq(&first) {
            ring.push(first);
        }
    }
}

/// Appends the first vertex when the ring is open.
pub fn ensure_closed(mut vertices: Vec<Vertex>) -> Vec<Vertex> {
    close_ring(&mut vertices);
    vertices
}

/// Collapses consecutive near-duplicate vertices.
pub fn remove_redundant(vertices: Vec<Vertex>) -> Vec<Vertex> {
    if vertices.len() <= 2 {
        return vertices;
    }
    let mut out = Vec::with_capacity(vertices.len());
    for v in vertices {
        push_distinct(&mut out, v);
    }
    out
}
