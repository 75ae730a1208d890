//! # Boundary - constellation boundary catalog
//!
//! Packs IAU constellation boundaries into a compact binary and answers
//! "which constellation contains this point" at runtime.
//!
//! ## Pipeline
//!
//! ```text
//! edges (ingest) -> stitch -> simplify (RDP) -> bridge seam -> close
//!                -> dedup -> AABB -> 88 entries in IAU order -> bytes
//! ```
//!
//! ## File layout (`PTSKCONS` v1)
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ HEADER (26 bytes)                                             │
//! │ magic "PTSKCONS" | version u16 | reserved u16 | count u16     │
//! │ polygon_count i32 | vertex_count i32 | crc32 u32              │
//! ├──────────────────────────────────────────────────────────────┤
//! │ DIRECTORY (88 × 28 bytes)                                     │
//! │ code [u8; 4] (NUL padded) | poly_start i32 | poly_count i32   │
//! │ ra_min f32 | ra_max f32 | dec_min f32 | dec_max f32           │
//! ├──────────────────────────────────────────────────────────────┤
//! │ POLYGONS (polygon_count × 24 bytes)                           │
//! │ vertex_start i32 | vertex_count i32 | aabb 4 × f32            │
//! ├──────────────────────────────────────────────────────────────┤
//! │ VERTICES (vertex_count × 8 bytes)                             │
//! │ ra f32 | dec f32                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CRC covers everything after the header. Every ring is closed
//! (first vertex repeated last) and has at least four vertices. A box with
//! `ra_min > ra_max` wraps through 0/360.
//!
//! ## Example
//!
//! ```rust,no_run
//! use boundary::{BoundaryCatalog, BoundaryProcessor, BoundaryWriter};
//! use sky::Equatorial;
//! use std::path::Path;
//!
//! let text = std::fs::read_to_string("bound_18.dat").unwrap();
//! let parsed = ingest::parse_iau_boundaries(&text).unwrap();
//! let packed = BoundaryProcessor::prepare(&parsed, 0.05);
//! BoundaryWriter::write_to_path(Path::new("const_v1.bin"), &packed).unwrap();
//!
//! let catalog = BoundaryCatalog::open("const_v1.bin").unwrap();
//! assert_eq!(catalog.find_by_eq(Equatorial::new(83.8, -5.4)), Some("ORI"));
//! ```

mod geometry;
mod header;
mod processor;
mod reader;
mod regions;
mod simplify;
mod stitch;
mod writer;

pub use geometry::{Aabb, Vertex, VERTEX_EPSILON};
pub use header::{BoundaryHeader, BOUNDARY_HEADER_BYTES};
pub use processor::{
    BoundaryProcessor, PackedBoundaries, PackedConstellation, PackedPolygon, MIN_POLYGON_VERTICES,
};
pub use reader::{BoundaryCatalog, BoundaryMetadata, ConstellationSummary};
pub use regions::{Region, RegionBoxes};
pub use simplify::{
    bridge_wrap, ensure_closed, rdp, remove_redundant, simplify, split_long_edges, unwrap_ra,
    MAX_EDGE_RA_SPAN,
};
pub use stitch::stitch;
pub use writer::BoundaryWriter;

/// `code 4 | poly_start i32 | poly_count i32 | aabb 4 × f32`.
pub const DIRECTORY_ENTRY_BYTES: usize = 4 + 4 + 4 + 16;

/// `vertex_start i32 | vertex_count i32 | aabb 4 × f32`.
pub const POLYGON_ENTRY_BYTES: usize = 4 + 4 + 16;

/// `ra f32 | dec f32`.
pub const VERTEX_BYTES: usize = 8;

#[cfg(test)]
mod tests;
