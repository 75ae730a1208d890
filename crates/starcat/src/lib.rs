//! # Starcat - packed star catalog
//!
//! Writer, loader and cone-search query engine for the `PTSKSTAR` v1 format.
//!
//! ## File layout
//!
//! ```text
//! [HEADER 32B]  magic "PTSKSTAR" | version u16 | reserved u16 | record_count i32
//!               | string_pool_size i32 | index_offset i32 | index_size i32 | crc32 u32
//! [POOL]        NUL-terminated UTF-8 strings; byte 0 is NUL (offset 0 = absent)
//! [RECORDS]     record_count × 32B star records
//! [INDEX]       180 × (band_id i16 | start i32 | count i32)
//!               | star_index i32 × entries | ra f32 × entries | summary 8 × f32
//! ```
//!
//! `index_offset` is relative to the first payload byte, and the CRC covers
//! the whole payload. Stars are bucketed into one-degree declination bands
//! (`band_id = clamp(floor(dec), -90, 89)`); inside each band the entries are
//! sorted by RA so a query can binary-search the RA window.
//!
//! ## Example
//!
//! ```rust,no_run
//! use config::PackConfig;
//! use ingest::{CatalogSource, StarInput};
//! use sky::Equatorial;
//! use starcat::{StarCatalog, StarCatalogWriter};
//!
//! let stars = vec![StarInput::new(CatalogSource::Hyg, 101.29, -16.72, -1.46).with_hip(32349)];
//! let packed = StarCatalogWriter::pack(&stars, &PackConfig::default()).unwrap();
//! let catalog = StarCatalog::load(&packed.bytes).unwrap();
//! let hits = catalog.nearby(Equatorial::new(101.3, -16.7), 1.0, None);
//! assert_eq!(hits[0].id, 32349);
//! ```

mod band;
mod designation;
mod query;
mod reader;
mod record;
mod star;
mod writer;

pub use band::{band_id, BandIndex, BandSlice, IndexSummary, BAND_COUNT, BAND_ENTRY_BYTES, MAX_BAND_ID, MIN_BAND_ID};
pub use designation::{build_designation, split_designation};
pub use query::{QueryMetrics, QueryStats};
pub use reader::{CatalogMetadata, StarCatalog};
pub use record::{
    StarRecord, FLAG_HAS_DESIGNATION, FLAG_HAS_HIP, FLAG_HAS_NAME, FLAG_SOURCE_BSC,
    FLAG_SOURCE_HYG, STAR_RECORD_BYTES,
};
pub use star::Star;
pub use writer::{CatalogMeta, PackedStarCatalog, StarCatalogWriter};

#[cfg(test)]
mod tests;
