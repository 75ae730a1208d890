//! # Ingest - source catalog readers
//!
//! Turns third-party source files into the plain input rows the packers
//! consume:
//!
//! - Yale Bright Star Catalogue (BSC5) and HYG CSV exports → [`StarInput`]
//! - IAU constellation boundary ASCII tables → [`ParsedConstellation`]
//!
//! CSV readers are generic over any `Read` implementor so tests can feed
//! in-memory data; [`read_stars_path`] is the file-based convenience.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ingest::{read_stars_path, CatalogSource};
//!
//! let report = read_stars_path(CatalogSource::Hyg, "hygdata_v41.csv", 6.5).unwrap();
//! println!("{} stars, {} skipped", report.stars.len(), report.skipped_invalid);
//! ```

mod boundaries;
mod row;
mod source;
mod stars;
mod validate;

pub use boundaries::{parse_iau_boundaries, parse_iau_boundaries_reader, BoundaryEdge, ParsedConstellation};
pub use source::{CatalogSource, StarInput};
pub use stars::{read_stars, read_stars_path, StarReadReport};
pub use validate::{validate_star, ValidationError, MAG_MAX, MAG_MIN};

use std::io;
use thiserror::Error;

/// Errors raised while reading source files.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A boundary line could not be parsed. `line` is 1-based.
    #[error("boundary line {line}: {message}")]
    Boundary { line: usize, message: String },

    #[error("unsupported source: {0} (expected bsc, bscv5 or hyg)")]
    UnsupportedSource(String),
}

#[cfg(test)]
mod tests;
