//! Lookup seams and their empty fallbacks.

use boundary::{BoundaryCatalog, RegionBoxes};
use sky::Equatorial;
use starcat::{Star, StarCatalog};

/// Cone search over some star source.
pub trait StarLookup: Send + Sync {
    fn nearby(&self, center: Equatorial, radius_deg: f64, mag_limit: Option<f64>) -> Vec<Star>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Point-to-constellation lookup.
pub trait ConstellationLookup: Send + Sync {
    fn find_by_eq(&self, eq: Equatorial) -> Option<&str>;
}

impl StarLookup for StarCatalog {
    fn nearby(&self, center: Equatorial, radius_deg: f64, mag_limit: Option<f64>) -> Vec<Star> {
        StarCatalog::nearby(self, center, radius_deg, mag_limit)
    }

    fn len(&self) -> usize {
        StarCatalog::len(self)
    }
}

impl ConstellationLookup for BoundaryCatalog {
    fn find_by_eq(&self, eq: Equatorial) -> Option<&str> {
        BoundaryCatalog::find_by_eq(self, eq)
    }
}

impl ConstellationLookup for RegionBoxes {
    fn find_by_eq(&self, eq: Equatorial) -> Option<&str> {
        RegionBoxes::find_by_eq(self, eq)
    }
}

/// Stand-in used when the star catalog cannot be loaded. Finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyStarCatalog;

impl StarLookup for EmptyStarCatalog {
    fn nearby(&self, _center: Equatorial, _radius_deg: f64, _mag_limit: Option<f64>) -> Vec<Star> {
        Vec::new()
    }

    fn len(&self) -> usize {
        0
    }
}

/// Stand-in used when boundaries cannot be loaded. Matches nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyBoundaries;

impl ConstellationLookup for EmptyBoundaries {
    fn find_by_eq(&self, _eq: Equatorial) -> Option<&str> {
        None
    }
}
