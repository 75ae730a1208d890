//! # Atlas - runtime sky lookups
//!
//! Ties the packed star catalog ([`starcat`]) and the packed constellation
//! boundaries ([`boundary`]) into one read-only facade.
//!
//! ```text
//! stars_v1.bin ──► StarCatalog ──────┐
//!                  (or empty)        ├──► Atlas ──► nearby / probe
//! const_v1.bin ──► BoundaryCatalog ──┘          └─► find_constellation
//!                  (or empty)
//! ```
//!
//! Opening never fails. A missing or corrupt file is replaced by an empty
//! lookup and reported in [`Diagnostics`], so a caller can keep serving
//! whichever half is intact.
//!
//! ```no_run
//! use atlas::Atlas;
//! use config::CatalogPaths;
//! use sky::Equatorial;
//!
//! let atlas = Atlas::open(&CatalogPaths::new("catalog"));
//! let here = Equatorial::new(88.79, 7.41);
//! println!("{:?}", atlas.find_constellation(here));
//! for star in atlas.nearby(here, 2.0, Some(4.0)) {
//!     println!("{} {:.2}", star.label(), star.mag);
//! }
//! ```
mod load;
mod lookup;
mod probe;

pub use load::{Diagnostics, LoadStatus};
pub use lookup::{ConstellationLookup, EmptyBoundaries, EmptyStarCatalog, StarLookup};
pub use probe::{Probe, ProbeHit, SelfTestResult};

use boundary::BoundaryCatalog;
use config::CatalogPaths;
use load::{load_boundaries, load_stars};
use sky::Equatorial;
use starcat::{Star, StarCatalog};

/// Star and constellation lookups over whatever catalogs could be loaded.
pub struct Atlas {
    stars: Box<dyn StarLookup>,
    constellations: Box<dyn ConstellationLookup>,
    diagnostics: Diagnostics,
}

impl Atlas {
    /// Memory-maps both catalog files under `paths`.
    pub fn open(paths: &CatalogPaths) -> Self {
        let star_path = paths.stars();
        let boundary_path = paths.constellations();
        let stars = load_stars(&star_path.display().to_string(), || {
            StarCatalog::open(&star_path)
        });
        let boundaries = load_boundaries(&boundary_path.display().to_string(), || {
            BoundaryCatalog::open(&boundary_path)
        });
        Self::assemble(stars, boundaries)
    }

    /// Builds an atlas from in-memory catalog images.
    pub fn from_bytes(star_bytes: &[u8], boundary_bytes: &[u8]) -> Self {
        let stars = load_stars("memory", || StarCatalog::load(star_bytes));
        let boundaries = load_boundaries("memory", || BoundaryCatalog::load(boundary_bytes));
        Self::assemble(stars, boundaries)
    }

    /// Wraps caller-provided lookups. Both are reported as loaded.
    pub fn from_parts(
        stars: Box<dyn StarLookup>,
        constellations: Box<dyn ConstellationLookup>,
    ) -> Self {
        Self {
            stars,
            constellations,
            diagnostics: Diagnostics::for_parts(),
        }
    }

    fn assemble(stars: load::LoadedStars, boundaries: load::LoadedBoundaries) -> Self {
        Self {
            diagnostics: Diagnostics {
                star_status: stars.status,
                star_metadata: stars.metadata,
                star_load_time: stars.elapsed,
                boundary_status: boundaries.status,
                boundary_metadata: boundaries.metadata,
                boundary_load_time: boundaries.elapsed,
            },
            stars: stars.lookup,
            constellations: boundaries.lookup,
        }
    }

    /// Stars within `radius_deg` of `center`, nearest first.
    pub fn nearby(&self, center: Equatorial, radius_deg: f64, mag_limit: Option<f64>) -> Vec<Star> {
        self.stars.nearby(center, radius_deg, mag_limit)
    }

    /// IAU code of the constellation containing `eq`.
    pub fn find_constellation(&self, eq: Equatorial) -> Option<&str> {
        self.constellations.find_by_eq(eq)
    }

    pub fn stars(&self) -> &dyn StarLookup {
        self.stars.as_ref()
    }

    pub fn constellations(&self) -> &dyn ConstellationLookup {
        self.constellations.as_ref()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

impl std::fmt::Debug for Atlas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Atlas")
            .field("star_count", &self.stars.len())
            .field("star_status", &self.diagnostics.star_status)
            .field("boundary_status", &self.diagnostics.boundary_status)
            .finish()
    }
}

#[cfg(test)]
mod tests;
