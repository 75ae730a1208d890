use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::IngestError;

/// Which source catalog a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CatalogSource {
    /// Yale Bright Star Catalogue, 5th revision.
    Bsc,
    /// HYG database (Hipparcos, Yale, Gliese).
    Hyg,
}

impl CatalogSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogSource::Bsc => "BSC",
            CatalogSource::Hyg => "HYG",
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogSource {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bsc" | "bscv5" => Ok(CatalogSource::Bsc),
            "hyg" => Ok(CatalogSource::Hyg),
            _ => Err(IngestError::UnsupportedSource(s.to_string())),
        }
    }
}

/// One validated star row, ready for packing.
///
/// `ra_deg` is already normalised into `[0, 360)`. `hip <= 0` means the row
/// carries no Hipparcos number.
#[derive(Debug, Clone, PartialEq)]
pub struct StarInput {
    pub source: CatalogSource,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub mag: f64,
    pub hip: i32,
    pub name: Option<String>,
    pub bayer: Option<String>,
    pub flamsteed: Option<String>,
    /// IAU constellation abbreviation as found in the source (any case).
    pub constellation: Option<String>,
}

impl StarInput {
    /// A bare row with no identifiers.
    pub fn new(source: CatalogSource, ra_deg: f64, dec_deg: f64, mag: f64) -> Self {
        Self {
            source,
            ra_deg,
            dec_deg,
            mag,
            hip: -1,
            name: None,
            bayer: None,
            flamsteed: None,
            constellation: None,
        }
    }

    #[must_use]
    pub fn with_hip(mut self, hip: i32) -> Self {
        self.hip = hip;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn with_bayer(mut self, bayer: &str) -> Self {
        self.bayer = Some(bayer.to_string());
        self
    }

    #[must_use]
    pub fn with_flamsteed(mut self, flamsteed: &str) -> Self {
        self.flamsteed = Some(flamsteed.to_string());
        self
    }

    #[must_use]
    pub fn with_constellation(mut self, code: &str) -> Self {
        self.constellation = Some(code.to_string());
        self
    }
}
