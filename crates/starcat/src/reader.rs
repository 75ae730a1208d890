use format::{non_negative_usize, section, CatalogHeader, FormatError, HEADER_BYTES, STAR_MAGIC};
use log::info;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use strpool::StringPool;

use crate::band::{BandIndex, BandSlice, IndexSummary};
use crate::designation::split_designation;
use crate::query::QueryMetrics;
use crate::record::{StarRecord, STAR_RECORD_BYTES};
use crate::star::Star;

/// Facts about a loaded catalog, taken from its header and index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogMetadata {
    pub size_bytes: usize,
    pub star_count: usize,
    pub string_pool_bytes: usize,
    pub index_offset: usize,
    pub index_size: usize,
    pub payload_crc32: u32,
    pub band_entry_count: usize,
    pub summary: Option<IndexSummary>,
}

/// Per-star trig terms reused by every query.
#[derive(Clone, Copy)]
pub(crate) struct StarGeo {
    pub(crate) ra_rad: f64,
    pub(crate) sin_dec: f64,
    pub(crate) cos_dec: f64,
}

/// An immutable, fully validated star catalog.
///
/// Queries take `&self` and may run from many threads at once. The only
/// state they touch is the string decode cache inside the pool and the
/// atomic query counters.
pub struct StarCatalog {
    pub(crate) records: Vec<StarRecord>,
    pub(crate) geo: Vec<StarGeo>,
    pub(crate) index: BandIndex,
    pub(crate) pool: StringPool,
    pub(crate) metadata: CatalogMetadata,
    pub(crate) metrics: QueryMetrics,
}

impl StarCatalog {
    /// Decodes and validates a `PTSKSTAR` v1 blob.
    ///
    /// # Errors
    ///
    /// Any [`FormatError`]: bad header, CRC mismatch, a string pool or
    /// index reaching past the payload, a record section whose size is not
    /// `record_count × 32`, or an inconsistent band index.
    pub fn load(bytes: &[u8]) -> Result<Self, FormatError> {
        let header = CatalogHeader::parse(bytes, &STAR_MAGIC)?;
        header.verify_payload(bytes)?;
        let payload = &bytes[HEADER_BYTES..];

        let count = non_negative_usize(header.record_count, "record_count")?;
        let pool_size = non_negative_usize(header.string_pool_size, "string_pool_size")?;
        let index_offset = non_negative_usize(header.index_offset, "index_offset")?;
        let index_size = non_negative_usize(header.index_size, "index_size")?;

        if pool_size > payload.len() {
            return Err(FormatError::NegativeOrOutOfBoundsSize {
                field: "string_pool_size",
                value: pool_size as i64,
            });
        }
        if index_offset.saturating_add(index_size) > payload.len() {
            return Err(FormatError::NegativeOrOutOfBoundsSize {
                field: "index_offset",
                value: index_offset as i64,
            });
        }

        let expected = count.saturating_mul(STAR_RECORD_BYTES);
        let actual = index_offset.checked_sub(pool_size).ok_or(FormatError::RecordSizeMismatch {
            expected,
            actual: 0,
        })?;
        if actual != expected {
            return Err(FormatError::RecordSizeMismatch { expected, actual });
        }

        let pool = StringPool::from_bytes(payload[..pool_size].to_vec());

        let mut rec_bytes = section(payload, pool_size, expected, "star records")?;
        let mut records = Vec::with_capacity(count);
        let mut geo = Vec::with_capacity(count);
        for _ in 0..count {
            let mut rec = StarRecord::read_from(&mut rec_bytes)?;
            rec.ra_deg = crate::record::ra_to_f32(f64::from(rec.ra_deg));
            let dec_rad = f64::from(rec.dec_deg).to_radians();
            geo.push(StarGeo {
                ra_rad: f64::from(rec.ra_deg).to_radians(),
                sin_dec: dec_rad.sin(),
                cos_dec: dec_rad.cos(),
            });
            records.push(rec);
        }

        let index_bytes = section(payload, index_offset, index_size, "index")?;
        let index = BandIndex::decode(index_bytes, count)?;

        let metadata = CatalogMetadata {
            size_bytes: bytes.len(),
            star_count: count,
            string_pool_bytes: pool_size,
            index_offset,
            index_size,
            payload_crc32: header.payload_crc32,
            band_entry_count: index.entry_count(),
            summary: index.summary().copied(),
        };
        info!(
            "star catalog loaded: {} stars, {} bytes, crc {:#010x}, {} band entries",
            metadata.star_count, metadata.size_bytes, metadata.payload_crc32, metadata.band_entry_count
        );

        Ok(Self {
            records,
            geo,
            index,
            pool,
            metadata,
            metrics: QueryMetrics::default(),
        })
    }

    /// Memory-maps `path` and loads it with [`load`](Self::load).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FormatError> {
        let file = File::open(path.as_ref())?;
        // SAFETY: the mapping is read-only and only lives for the duration of
        // `load`, which copies everything it keeps.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::load(&mmap)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    /// Materialises the star at record `index`.
    #[must_use]
    pub fn star(&self, index: usize) -> Option<Star> {
        let rec = self.records.get(index)?;
        let constellation = sky::constellation_code(i32::from(rec.constellation));
        let raw = self.pool.get(rec.designation_offset);
        let (bayer, flamsteed) = split_designation(raw.as_deref(), constellation);
        Some(Star {
            id: rec.id(index),
            ra_deg: rec.ra_deg,
            dec_deg: rec.dec_deg,
            mag: rec.mag,
            name: self.pool.get(rec.name_offset),
            bayer,
            flamsteed,
            constellation,
        })
    }

    /// Diagnostics view of one declination band.
    #[must_use]
    pub fn band(&self, band_id: i32) -> Option<BandSlice> {
        self.index.band(band_id)
    }

    #[must_use]
    pub fn index(&self) -> &BandIndex {
        &self.index
    }

    /// Raw records in file order.
    pub fn records(&self) -> impl Iterator<Item = &StarRecord> + '_ {
        self.records.iter()
    }

    #[must_use]
    pub fn string_pool(&self) -> &StringPool {
        &self.pool
    }
}

impl std::fmt::Debug for StarCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StarCatalog")
            .field("stars", &self.records.len())
            .field("index", &self.index)
            .field("pool", &self.pool)
            .field("crc32", &format_args!("{:#010x}", self.metadata.payload_crc32))
            .finish()
    }
}
