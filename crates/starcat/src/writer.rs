use anyhow::{bail, Context, Result};
use config::PackConfig;
use format::{crc32, write_atomic, CatalogHeader, STAR_MAGIC};
use ingest::{CatalogSource, StarInput};
use log::info;
use serde::Serialize;
use std::path::Path;
use strpool::StringPoolBuilder;

use crate::band::{BandIndex, IndexSummary, BAND_COUNT};
use crate::designation::build_designation;
use crate::record::{
    ra_to_f32, source_flag, StarRecord, FLAG_HAS_DESIGNATION, FLAG_HAS_HIP, FLAG_HAS_NAME,
    STAR_RECORD_BYTES,
};

/// Packing summary, written next to the binary as `stars_v1.meta.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMeta {
    pub source: CatalogSource,
    /// Source file the rows came from, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub mag_limit: f64,
    pub star_count: usize,
    pub string_pool_size: usize,
    pub index_offset: usize,
    pub index_size: usize,
    pub crc32: u32,
    pub band_count: usize,
    #[serde(rename = "indexEntries")]
    pub index_entry_count: usize,
    pub rdp_epsilon: f64,
    pub summary: IndexSummary,
}

/// A packed catalog blob plus its metadata.
#[derive(Debug, Clone)]
pub struct PackedStarCatalog {
    pub bytes: Vec<u8>,
    pub meta: CatalogMeta,
}

/// Builds `PTSKSTAR` v1 blobs from validated input rows.
///
/// The writer is stateless. [`pack`](StarCatalogWriter::pack) works entirely
/// in memory; [`write_to_path`](StarCatalogWriter::write_to_path) persists a
/// packed blob with a tmp-file + fsync + rename sequence.
pub struct StarCatalogWriter {}

impl StarCatalogWriter {
    /// Packs `stars` in the given order.
    ///
    /// Magnitude filtering happens in `ingest`; every row passed in is
    /// written. All rows must share one source (the first row's source is
    /// recorded in the metadata).
    ///
    /// # Errors
    ///
    /// Returns an error if `stars` is empty, a row has a non-finite RA/Dec,
    /// or a section outgrows the `i32` header fields.
    pub fn pack(stars: &[StarInput], cfg: &PackConfig) -> Result<PackedStarCatalog> {
        let Some(first) = stars.first() else {
            bail!("no stars to pack");
        };
        if let Some((i, s)) = stars
            .iter()
            .enumerate()
            .find(|(_, s)| !s.ra_deg.is_finite() || !s.dec_deg.is_finite())
        {
            bail!("star {i} has non-finite position ({}, {})", s.ra_deg, s.dec_deg);
        }

        // Records and string pool
        let mut pool = StringPoolBuilder::new();
        let mut records = Vec::with_capacity(stars.len() * STAR_RECORD_BYTES);
        let mut rows = Vec::with_capacity(stars.len());
        for star in stars {
            let record = Self::record_for(star, cfg, &mut pool);
            record.write_to(&mut records)?;
            rows.push((record.ra_deg, f64::from(record.dec_deg), star.mag));
        }
        let pool = pool.into_bytes();

        // Band index
        let index = BandIndex::build(&rows);
        let mut index_bytes = Vec::with_capacity(index.encoded_len());
        index.write_to(&mut index_bytes)?;

        // Payload = pool | records | index
        let mut payload = Vec::with_capacity(pool.len() + records.len() + index_bytes.len());
        payload.extend_from_slice(&pool);
        payload.extend_from_slice(&records);
        let index_offset = payload.len();
        payload.extend_from_slice(&index_bytes);
        let crc = crc32(&payload);

        let header = CatalogHeader::new(
            STAR_MAGIC,
            to_i32(stars.len(), "record count")?,
            to_i32(pool.len(), "string pool")?,
            to_i32(index_offset, "index offset")?,
            to_i32(index_bytes.len(), "index")?,
            crc,
        );
        let mut bytes = header.to_bytes();
        bytes.extend_from_slice(&payload);

        let summary = index
            .summary()
            .copied()
            .context("band index built without summary")?;
        let meta = CatalogMeta {
            source: first.source,
            input: None,
            mag_limit: cfg.mag_limit,
            star_count: stars.len(),
            string_pool_size: pool.len(),
            index_offset,
            index_size: index_bytes.len(),
            crc32: crc,
            band_count: BAND_COUNT,
            index_entry_count: index.entry_count(),
            rdp_epsilon: cfg.rdp_epsilon,
            summary,
        };

        info!(
            "packed {} stars ({} bytes, pool {} bytes, crc {:#010x})",
            meta.star_count,
            bytes.len(),
            meta.string_pool_size,
            crc
        );
        Ok(PackedStarCatalog { bytes, meta })
    }

    /// Atomically writes the blob to `path`.
    pub fn write_to_path(path: &Path, packed: &PackedStarCatalog) -> Result<()> {
        write_atomic(path, &packed.bytes)
            .with_context(|| format!("failed to write star catalog {}", path.display()))
    }

    /// Atomically writes `meta` as pretty-printed JSON.
    pub fn write_meta_json(path: &Path, meta: &CatalogMeta) -> Result<()> {
        let json = serde_json::to_vec_pretty(meta)?;
        write_atomic(path, &json)
            .with_context(|| format!("failed to write catalog metadata {}", path.display()))
    }

    fn record_for(star: &StarInput, cfg: &PackConfig, pool: &mut StringPoolBuilder) -> StarRecord {
        let name_offset = pool.intern(star.name.as_deref());
        let designation = build_designation(
            star.bayer.as_deref(),
            star.flamsteed.as_deref(),
            star.constellation.as_deref(),
        );
        let designation_offset = pool.intern(designation.as_deref());

        let mut flags = source_flag(star.source);
        if name_offset != 0 {
            flags |= FLAG_HAS_NAME;
        }
        if designation_offset != 0 {
            flags |= FLAG_HAS_DESIGNATION;
        }
        if star.hip > 0 {
            flags |= FLAG_HAS_HIP;
        }

        let constellation = if cfg.with_constellation_codes {
            star.constellation
                .as_deref()
                .and_then(sky::constellation_index)
                .map_or(-1, |i| i as i16)
        } else {
            -1
        };

        StarRecord {
            ra_deg: ra_to_f32(star.ra_deg),
            dec_deg: star.dec_deg as f32,
            mag: star.mag as f32,
            hip: star.hip,
            name_offset,
            designation_offset,
            flags,
            constellation,
        }
    }
}

fn to_i32(value: usize, what: &str) -> Result<i32> {
    i32::try_from(value).with_context(|| format!("{what} too large for the v1 header: {value}"))
}
