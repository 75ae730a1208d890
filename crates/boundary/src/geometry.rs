//! Vertices and RA-wrapping bounding boxes.

use sky::normalize_ra;

/// Two vertices closer than this on both axes are the same point.
pub const VERTEX_EPSILON: f64 = 1e-6;

/// A polygon vertex in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub ra: f64,
    pub dec: f64,
}

/// Vertex quantised to micro-degrees, used as an adjacency key.
pub(crate) type VertexKey = (i64, i64);

impl Vertex {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    pub(crate) fn key(&self) -> VertexKey {
        (quantize(self.ra), quantize(self.dec))
    }

    #[must_use]
    pub fn approx_eq(&self, other: &Vertex) -> bool {
        (self.ra - other.ra).abs() < VERTEX_EPSILON && (self.dec - other.dec).abs() < VERTEX_EPSILON
    }
}

fn quantize(value: f64) -> i64 {
    (value * 1_000_000.0).round() as i64
}

/// Axis-aligned box in RA/Dec.
///
/// `ra_min > ra_max` means the RA range wraps through 0/360.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub ra_min: f64,
    pub ra_max: f64,
    pub dec_min: f64,
    pub dec_max: f64,
}

impl Aabb {
    pub fn new(ra_min: f64, ra_max: f64, dec_min: f64, dec_max: f64) -> Self {
        Self {
            ra_min,
            ra_max,
            dec_min,
            dec_max,
        }
    }

    /// Bounds of a vertex ring. An empty ring gives the all-zero box.
    ///
    /// RA is followed along the ring with every step taken the short way
    /// round, so consecutive vertices must be less than 180 apart. A ring
    /// that winds all the way round (a polar cap) covers `0..360`.
    #[must_use]
    pub fn of_vertices(vertices: &[Vertex]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::default();
        };
        let dec_min = vertices.iter().map(|v| v.dec).fold(f64::INFINITY, f64::min);
        let dec_max = vertices.iter().map(|v| v.dec).fold(f64::NEG_INFINITY, f64::max);

        let mut ra = normalize_ra(first.ra);
        let (mut lo, mut hi) = (ra, ra);
        for pair in vertices.windows(2) {
            let mut step = pair[1].ra - pair[0].ra;
            if step > 180.0 {
                step -= 360.0;
            } else if step < -180.0 {
                step += 360.0;
            }
            ra += step;
            lo = lo.min(ra);
            hi = hi.max(ra);
        }
        if hi - lo >= 360.0 - VERTEX_EPSILON {
            return Self::new(0.0, 360.0, dec_min, dec_max);
        }
        let ra_max = if hi > 360.0 { hi - 360.0 } else { hi };
        Self::new(normalize_ra(lo), ra_max, dec_min, dec_max)
    }

    /// Smallest box covering every box in `boxes`.
    ///
    /// The RA ranges are unioned as intervals on the circle and the result
    /// is the complement of the widest uncovered gap.
    #[must_use]
    pub fn merge(boxes: &[Aabb]) -> Self {
        if boxes.is_empty() {
            return Self::default();
        }
        let dec_min = boxes.iter().map(|b| b.dec_min).fold(f64::INFINITY, f64::min);
        let dec_max = boxes.iter().map(|b| b.dec_max).fold(f64::NEG_INFINITY, f64::max);
        let (ra_min, ra_max) = union_ra(boxes);
        Self::new(ra_min, ra_max, dec_min, dec_max)
    }

    #[must_use]
    pub fn wraps(&self) -> bool {
        self.ra_min > self.ra_max
    }

    /// Point test with `tolerance` degrees of slack on every side. `ra` must
    /// already be normalised.
    #[must_use]
    pub fn contains(&self, ra: f64, dec: f64, tolerance: f64) -> bool {
        if dec < self.dec_min - tolerance || dec > self.dec_max + tolerance {
            return false;
        }
        if self.wraps() {
            ra >= self.ra_min - tolerance || ra <= self.ra_max + tolerance
        } else {
            ra >= self.ra_min - tolerance && ra <= self.ra_max + tolerance
        }
    }
}

/// RA cover of `boxes`. Wrapping boxes are split at the seam, the pieces
/// are unioned, and the widest gap between covered runs (the one across
/// 360 included) is left out. No gap at all gives `(0, 360)`.
fn union_ra(boxes: &[Aabb]) -> (f64, f64) {
    let mut spans: Vec<(f64, f64)> = Vec::with_capacity(boxes.len() * 2);
    for b in boxes {
        if b.wraps() {
            spans.push((b.ra_min, 360.0));
            spans.push((0.0, b.ra_max));
        } else {
            spans.push((b.ra_min, b.ra_max));
        }
    }
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut runs: Vec<(f64, f64)> = Vec::with_capacity(spans.len());
    for (lo, hi) in spans {
        match runs.last_mut() {
            Some(run) if lo <= run.1 => run.1 = run.1.max(hi),
            _ => runs.push((lo, hi)),
        }
    }

    let (Some(&first), Some(&last)) = (runs.first(), runs.last()) else {
        return (0.0, 0.0);
    };
    // (width, start, end) of the widest gap
    let mut widest = (first.0 + 360.0 - last.1, last.1, first.0);
    for pair in runs.windows(2) {
        let width = pair[1].0 - pair[0].1;
        if width > widest.0 {
            widest = (width, pair[0].1, pair[1].0);
        }
    }
    if widest.0 <= 0.0 {
        return (0.0, 360.0);
    }
    (normalize_ra(widest.2), widest.1)
}
