//! Catalog loading with fallbacks.
//!
//! A missing or corrupt file never fails the atlas: the affected half is
//! replaced by an empty lookup and the reason is kept in [`Diagnostics`].

use boundary::{BoundaryCatalog, BoundaryMetadata};
use format::FormatError;
use log::{info, warn};
use starcat::{CatalogMetadata, StarCatalog};
use std::time::{Duration, Instant};

use crate::lookup::{ConstellationLookup, EmptyBoundaries, EmptyStarCatalog, StarLookup};

/// Outcome of loading one catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// The empty fallback is in use.
    Fallback { reason: String },
}

impl LoadStatus {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded)
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            LoadStatus::Loaded => None,
            LoadStatus::Fallback { reason } => Some(reason),
        }
    }
}

/// Load results for both catalogs.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    pub star_status: LoadStatus,
    pub star_metadata: Option<CatalogMetadata>,
    pub star_load_time: Duration,
    pub boundary_status: LoadStatus,
    pub boundary_metadata: Option<BoundaryMetadata>,
    pub boundary_load_time: Duration,
}

impl Diagnostics {
    pub(crate) fn for_parts() -> Self {
        Self {
            star_status: LoadStatus::Loaded,
            star_metadata: None,
            star_load_time: Duration::ZERO,
            boundary_status: LoadStatus::Loaded,
            boundary_metadata: None,
            boundary_load_time: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn stars_ok(&self) -> bool {
        self.star_status.is_loaded()
    }

    #[must_use]
    pub fn boundaries_ok(&self) -> bool {
        self.boundary_status.is_loaded()
    }
}

pub(crate) struct LoadedStars {
    pub(crate) lookup: Box<dyn StarLookup>,
    pub(crate) status: LoadStatus,
    pub(crate) metadata: Option<CatalogMetadata>,
    pub(crate) elapsed: Duration,
}

pub(crate) struct LoadedBoundaries {
    pub(crate) lookup: Box<dyn ConstellationLookup>,
    pub(crate) status: LoadStatus,
    pub(crate) metadata: Option<BoundaryMetadata>,
    pub(crate) elapsed: Duration,
}

pub(crate) fn load_stars(
    what: &str,
    load: impl FnOnce() -> Result<StarCatalog, FormatError>,
) -> LoadedStars {
    let started = Instant::now();
    let result = load();
    let elapsed = started.elapsed();
    match result {
        Ok(catalog) => {
            info!("stars from {what}: {} in {:?}", catalog.len(), elapsed);
            LoadedStars {
                metadata: Some(*catalog.metadata()),
                lookup: Box::new(catalog),
                status: LoadStatus::Loaded,
                elapsed,
            }
        }
        Err(e) => {
            warn!("star catalog {what} unusable, using empty fallback: {e}");
            LoadedStars {
                lookup: Box::new(EmptyStarCatalog),
                status: LoadStatus::Fallback {
                    reason: e.to_string(),
                },
                metadata: None,
                elapsed,
            }
        }
    }
}

pub(crate) fn load_boundaries(
    what: &str,
    load: impl FnOnce() -> Result<BoundaryCatalog, FormatError>,
) -> LoadedBoundaries {
    let started = Instant::now();
    let result = load();
    let elapsed = started.elapsed();
    match result {
        Ok(catalog) => {
            info!(
                "boundaries from {what}: {} polygons in {:?}",
                catalog.metadata().polygon_count,
                elapsed
            );
            LoadedBoundaries {
                metadata: Some(*catalog.metadata()),
                lookup: Box::new(catalog),
                status: LoadStatus::Loaded,
                elapsed,
            }
        }
        Err(e) => {
            warn!("constellation boundaries {what} unusable, using empty fallback: {e}");
            LoadedBoundaries {
                lookup: Box::new(EmptyBoundaries),
                status: LoadStatus::Fallback {
                    reason: e.to_string(),
                },
                metadata: None,
                elapsed,
            }
        }
    }
}
