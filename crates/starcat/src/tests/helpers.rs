use crate::*;
use config::PackConfig;
use ingest::{CatalogSource, StarInput};

pub fn star(ra: f64, dec: f64, mag: f64) -> StarInput {
    StarInput::new(CatalogSource::Hyg, ra, dec, mag)
}

pub fn pack(stars: &[StarInput]) -> PackedStarCatalog {
    StarCatalogWriter::pack(stars, &PackConfig::default()).unwrap()
}

pub fn load(stars: &[StarInput]) -> StarCatalog {
    StarCatalog::load(&pack(stars).bytes).unwrap()
}

/// Small deterministic LCG so synthetic catalogs are reproducible.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Uniform points on the sphere.
pub fn synthetic_sky(n: usize, seed: u64) -> Vec<StarInput> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|i| {
            let ra = rng.range(0.0, 360.0);
            let dec = rng.range(-1.0, 1.0).asin().to_degrees();
            let mag = rng.range(-1.5, 8.0);
            let s = star(ra, dec, mag);
            if i % 3 == 0 {
                s.with_hip(i as i32 + 1)
            } else {
                s
            }
        })
        .collect()
}
