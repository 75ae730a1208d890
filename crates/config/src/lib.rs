//! Packing parameters and catalog file locations.
//!
//! [`PackConfig`] carries the knobs the packer honours; the CLI maps its
//! flags onto it. [`CatalogPaths`] names the files inside a catalog
//! directory so the packer and the runtime loader agree on them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default faint-magnitude cutoff (naked-eye limit).
pub const DEFAULT_MAG_LIMIT: f64 = 6.5;

/// Default Ramer-Douglas-Peucker tolerance for boundary simplification, in degrees.
pub const DEFAULT_RDP_EPSILON: f64 = 0.05;

/// File name of the packed star catalog.
pub const STARS_FILE: &str = "stars_v1.bin";

/// File name of the star catalog metadata sidecar.
pub const STARS_META_FILE: &str = "stars_v1.meta.json";

/// File name of the packed constellation boundaries.
pub const CONSTELLATIONS_FILE: &str = "const_v1.bin";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("magnitude limit must be finite, got {0}")]
    MagLimit(f64),

    #[error("rdp epsilon must be finite and >= 0, got {0}")]
    RdpEpsilon(f64),
}

/// Settings for a packing run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackConfig {
    /// Rows fainter than this are dropped while reading the source.
    pub mag_limit: f64,
    /// When false, every record's constellation index is `-1`.
    pub with_constellation_codes: bool,
    /// Boundary simplification tolerance in degrees. `0` keeps every vertex.
    pub rdp_epsilon: f64,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            mag_limit: DEFAULT_MAG_LIMIT,
            with_constellation_codes: true,
            rdp_epsilon: DEFAULT_RDP_EPSILON,
        }
    }
}

impl PackConfig {
    #[must_use]
    pub fn with_mag_limit(mut self, mag_limit: f64) -> Self {
        self.mag_limit = mag_limit;
        self
    }

    #[must_use]
    pub fn with_constellation_codes(mut self, enabled: bool) -> Self {
        self.with_constellation_codes = enabled;
        self
    }

    #[must_use]
    pub fn with_rdp_epsilon(mut self, epsilon: f64) -> Self {
        self.rdp_epsilon = epsilon;
        self
    }

    /// Rejects non-finite limits and negative tolerances.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.mag_limit.is_finite() {
            return Err(ConfigError::MagLimit(self.mag_limit));
        }
        if !self.rdp_epsilon.is_finite() || self.rdp_epsilon < 0.0 {
            return Err(ConfigError::RdpEpsilon(self.rdp_epsilon));
        }
        Ok(())
    }
}

/// Well-known file locations inside a catalog directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    dir: PathBuf,
}

impl CatalogPaths {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stars(&self) -> PathBuf {
        self.dir.join(STARS_FILE)
    }

    pub fn star_meta(&self) -> PathBuf {
        self.dir.join(STARS_META_FILE)
    }

    pub fn constellations(&self) -> PathBuf {
        self.dir.join(CONSTELLATIONS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = PackConfig::default();
        assert_eq!(cfg.mag_limit, 6.5);
        assert!(cfg.with_constellation_codes);
        assert_eq!(cfg.rdp_epsilon, 0.05);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_setters() {
        let cfg = PackConfig::default()
            .with_mag_limit(4.0)
            .with_constellation_codes(false)
            .with_rdp_epsilon(0.0);
        assert_eq!(cfg.mag_limit, 4.0);
        assert!(!cfg.with_constellation_codes);
        assert_eq!(cfg.rdp_epsilon, 0.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let nan = PackConfig::default().with_mag_limit(f64::NAN);
        assert!(matches!(nan.validate(), Err(ConfigError::MagLimit(_))));

        let neg = PackConfig::default().with_rdp_epsilon(-0.1);
        assert_eq!(neg.validate(), Err(ConfigError::RdpEpsilon(-0.1)));
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = PackConfig::default().with_mag_limit(5.0);
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"mag_limit\":5.0"));
        let back: PackConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn catalog_paths() {
        let p = CatalogPaths::new("/data/sky");
        assert_eq!(p.stars(), Path::new("/data/sky/stars_v1.bin"));
        assert_eq!(p.star_meta(), Path::new("/data/sky/stars_v1.meta.json"));
        assert_eq!(p.constellations(), Path::new("/data/sky/const_v1.bin"));
        assert_eq!(p.dir(), Path::new("/data/sky"));
    }
}
