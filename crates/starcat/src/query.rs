//! Cone search over the band index.

use sky::{normalize_ra, separation_from_parts, Equatorial};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::band::{MAX_BAND_ID, MIN_BAND_ID};
use crate::reader::StarCatalog;
use crate::star::Star;

/// Slack added to the RA half-width so f32 rounding of the stored RA never
/// drops a star sitting on the window edge.
const RA_PAD_DEG: f64 = 1e-3;

/// Cumulative query counters.
#[derive(Debug, Default)]
pub struct QueryMetrics {
    queries: AtomicU64,
    candidates: AtomicU64,
    total_nanos: AtomicU64,
}

/// Point-in-time copy of [`QueryMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryStats {
    pub queries: u64,
    /// Band entries inspected across all queries.
    pub candidates: u64,
    pub total_nanos: u64,
}

impl QueryMetrics {
    fn record(&self, candidates: u64, nanos: u64) {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.candidates.fetch_add(candidates, Ordering::Relaxed);
        self.total_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> QueryStats {
        QueryStats {
            queries: self.queries.load(Ordering::Relaxed),
            candidates: self.candidates.load(Ordering::Relaxed),
            total_nanos: self.total_nanos.load(Ordering::Relaxed),
        }
    }
}

/// RA window(s) to scan inside each band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum RaWindow {
    Full,
    One(f32, f32),
    /// Window split at the 0/360 seam.
    Two((f32, f32), (f32, f32)),
}

/// Computes the RA window for a cap of `radius` around (`ra`, `dec`).
///
/// The half-width is `asin(sin r / cos dec)`, the exact RA extent of a
/// spherical cap. Caps touching a pole cover every RA.
pub(crate) fn ra_window(ra: f64, dec: f64, radius: f64) -> RaWindow {
    if radius >= 180.0 || dec.abs() + radius >= 90.0 {
        return RaWindow::Full;
    }
    let ratio = (radius.to_radians().sin() / dec.to_radians().cos()).min(1.0);
    let half_width = ratio.asin().to_degrees() + RA_PAD_DEG;
    if half_width >= 180.0 {
        return RaWindow::Full;
    }
    let min = ra - half_width;
    let max = ra + half_width;
    if min < 0.0 {
        RaWindow::Two((0.0, max as f32), ((min + 360.0) as f32, 360.0))
    } else if max >= 360.0 {
        RaWindow::Two((0.0, (max - 360.0) as f32), (min as f32, 360.0))
    } else {
        RaWindow::One(min as f32, max as f32)
    }
}

struct Candidate {
    index: usize,
    separation: f64,
    mag: f32,
}

impl StarCatalog {
    /// Stars within `radius_deg` of `center`, nearest first.
    ///
    /// Ties on separation are broken by magnitude (brighter first). With a
    /// `mag_limit`, stars fainter than the limit or with unknown magnitude
    /// are excluded. A non-positive, NaN or non-finite-center query returns
    /// nothing; the radius is clamped to 180 and the center declination to
    /// `[-90, 90]`.
    pub fn nearby(&self, center: Equatorial, radius_deg: f64, mag_limit: Option<f64>) -> Vec<Star> {
        if self.is_empty() || radius_deg.is_nan() || radius_deg <= 0.0 || !center.is_finite() {
            return Vec::new();
        }
        let started = Instant::now();

        let radius = radius_deg.min(180.0);
        let ra = normalize_ra(center.ra_deg);
        let dec = center.dec_deg.clamp(-90.0, 90.0);
        let dec_rad = dec.to_radians();
        let (c_ra, c_sin, c_cos) = (ra.to_radians(), dec_rad.sin(), dec_rad.cos());

        let min_band = ((dec - radius).max(-90.0).floor() as i32).clamp(MIN_BAND_ID, MAX_BAND_ID);
        let max_band = ((dec + radius).min(90.0).floor() as i32).clamp(MIN_BAND_ID, MAX_BAND_ID);
        let window = ra_window(ra, dec, radius);

        let mut inspected = 0u64;
        let mut hits: Vec<Candidate> = Vec::new();
        let mut visit = |ids: &[i32]| {
            for &id in ids {
                inspected += 1;
                let index = id as usize;
                let Some(rec) = self.records.get(index) else {
                    continue;
                };
                if let Some(limit) = mag_limit {
                    if rec.mag.is_nan() || f64::from(rec.mag) > limit {
                        continue;
                    }
                }
                let g = &self.geo[index];
                let separation =
                    separation_from_parts(c_ra, c_sin, c_cos, g.ra_rad, g.sin_dec, g.cos_dec);
                if separation <= radius {
                    hits.push(Candidate {
                        index,
                        separation,
                        mag: rec.mag,
                    });
                }
            }
        };

        for band in min_band..=max_band {
            let ids = self.index.band_star_ids(band);
            if ids.is_empty() {
                continue;
            }
            let ras = self.index.band_ras(band);
            match window {
                RaWindow::Full => visit(ids),
                RaWindow::One(lo, hi) => visit(&ids[bounds(ras, lo, hi)]),
                RaWindow::Two((lo1, hi1), (lo2, hi2)) => {
                    visit(&ids[bounds(ras, lo1, hi1)]);
                    visit(&ids[bounds(ras, lo2, hi2)]);
                }
            }
        }

        hits.sort_by(|a, b| {
            a.separation
                .total_cmp(&b.separation)
                .then(a.mag.total_cmp(&b.mag))
        });
        let out: Vec<Star> = hits.iter().filter_map(|c| self.star(c.index)).collect();

        self.metrics
            .record(inspected, started.elapsed().as_nanos() as u64);
        out
    }

    /// Cumulative query counters since load.
    #[must_use]
    pub fn query_stats(&self) -> QueryStats {
        self.metrics.snapshot()
    }
}

/// Index range of `ras` with `lo <= ra <= hi` (`ras` sorted ascending).
fn bounds(ras: &[f32], lo: f32, hi: f32) -> std::ops::Range<usize> {
    let start = ras.partition_point(|&r| r < lo);
    let end = start + ras[start..].partition_point(|&r| r <= hi);
    start..end
}
