//! Declination band index.
//!
//! 180 one-degree bands from `-90` to `89`. Each band owns a contiguous
//! run of two parallel arrays: star record indices and their RA (f32),
//! sorted ascending by RA.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use format::{non_negative_usize, section, FormatError};
use serde::Serialize;
use std::io::{self, Write};

pub const BAND_COUNT: usize = 180;
pub const MIN_BAND_ID: i32 = -90;
pub const MAX_BAND_ID: i32 = 89;

/// `band_id i16 | start i32 | count i32`.
pub const BAND_ENTRY_BYTES: usize = 2 + 4 + 4;

const SUMMARY_FLOATS: usize = 8;

/// Band holding a star at declination `dec_deg`.
#[must_use]
pub fn band_id(dec_deg: f64) -> i32 {
    (dec_deg.floor() as i32).clamp(MIN_BAND_ID, MAX_BAND_ID)
}

/// Trailing index summary (stored as 8 `f32`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSummary {
    pub band_count: u32,
    pub entry_count: u32,
    pub min_mag: f32,
    pub max_mag: f32,
    pub min_ra: f32,
    pub max_ra: f32,
    pub min_dec: f32,
    pub max_dec: f32,
}

/// Location of one band inside the index arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandSlice {
    pub band_id: i32,
    pub start: usize,
    pub count: usize,
}

#[derive(Clone)]
pub struct BandIndex {
    starts: Vec<usize>,
    counts: Vec<usize>,
    star_ids: Vec<i32>,
    ras: Vec<f32>,
    summary: Option<IndexSummary>,
}

impl BandIndex {
    /// Buckets `(ra, dec, mag)` rows by band and sorts each band by RA.
    ///
    /// `ra` must already be normalised into `[0, 360)`. The sort is stable,
    /// so equal RAs keep input order.
    pub fn build(rows: &[(f32, f64, f64)]) -> Self {
        let mut buckets: Vec<Vec<(i32, f32)>> = vec![Vec::new(); BAND_COUNT];
        let mut summary = IndexSummary {
            band_count: BAND_COUNT as u32,
            entry_count: rows.len() as u32,
            min_mag: f32::INFINITY,
            max_mag: f32::NEG_INFINITY,
            min_ra: f32::INFINITY,
            max_ra: f32::NEG_INFINITY,
            min_dec: f32::INFINITY,
            max_dec: f32::NEG_INFINITY,
        };

        for (i, &(ra, dec, mag)) in rows.iter().enumerate() {
            let slot = (band_id(dec) - MIN_BAND_ID) as usize;
            buckets[slot].push((i as i32, ra));

            summary.min_mag = summary.min_mag.min(mag as f32);
            summary.max_mag = summary.max_mag.max(mag as f32);
            summary.min_ra = summary.min_ra.min(ra);
            summary.max_ra = summary.max_ra.max(ra);
            summary.min_dec = summary.min_dec.min(dec as f32);
            summary.max_dec = summary.max_dec.max(dec as f32);
        }

        let mut starts = Vec::with_capacity(BAND_COUNT);
        let mut counts = Vec::with_capacity(BAND_COUNT);
        let mut star_ids = Vec::with_capacity(rows.len());
        let mut ras = Vec::with_capacity(rows.len());
        for mut bucket in buckets {
            bucket.sort_by(|a, b| a.1.total_cmp(&b.1));
            starts.push(star_ids.len());
            counts.push(bucket.len());
            for (id, ra) in bucket {
                star_ids.push(id);
                ras.push(ra);
            }
        }

        Self {
            starts,
            counts,
            star_ids,
            ras,
            summary: Some(summary),
        }
    }

    /// Encoded size in bytes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        BAND_COUNT * BAND_ENTRY_BYTES
            + self.star_ids.len() * 8
            + if self.summary.is_some() { SUMMARY_FLOATS * 4 } else { 0 }
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for slot in 0..BAND_COUNT {
            w.write_i16::<LittleEndian>((slot as i32 + MIN_BAND_ID) as i16)?;
            w.write_i32::<LittleEndian>(self.starts[slot] as i32)?;
            w.write_i32::<LittleEndian>(self.counts[slot] as i32)?;
        }
        for &id in &self.star_ids {
            w.write_i32::<LittleEndian>(id)?;
        }
        for &ra in &self.ras {
            w.write_f32::<LittleEndian>(ra)?;
        }
        if let Some(s) = &self.summary {
            for v in [
                s.band_count as f32,
                s.entry_count as f32,
                s.min_mag,
                s.max_mag,
                s.min_ra,
                s.max_ra,
                s.min_dec,
                s.max_dec,
            ] {
                w.write_f32::<LittleEndian>(v)?;
            }
        }
        Ok(())
    }

    /// Decodes and validates an index section.
    ///
    /// # Errors
    ///
    /// - [`FormatError::TruncatedInput`] if the band table or entry arrays
    ///   do not fit in `bytes`
    /// - [`FormatError::InvalidBandId`] for ids outside `[-90, 89]` or ids
    ///   listed twice
    /// - [`FormatError::NegativeOrOutOfBoundsSize`] for negative starts or
    ///   counts, bands reaching past the entry arrays, star indices
    ///   `>= record_count`, or a band whose RAs are not ascending
    pub fn decode(bytes: &[u8], record_count: usize) -> Result<Self, FormatError> {
        let mut table = section(bytes, 0, BAND_COUNT * BAND_ENTRY_BYTES, "band table")?;
        let mut starts = vec![0usize; BAND_COUNT];
        let mut counts = vec![0usize; BAND_COUNT];
        let mut seen = [false; BAND_COUNT];
        for _ in 0..BAND_COUNT {
            let id = i32::from(table.read_i16::<LittleEndian>()?);
            let start = non_negative_usize(table.read_i32::<LittleEndian>()?, "band_start")?;
            let count = non_negative_usize(table.read_i32::<LittleEndian>()?, "band_count")?;
            if !(MIN_BAND_ID..=MAX_BAND_ID).contains(&id) {
                return Err(FormatError::InvalidBandId(id));
            }
            let slot = (id - MIN_BAND_ID) as usize;
            if std::mem::replace(&mut seen[slot], true) {
                return Err(FormatError::InvalidBandId(id));
            }
            starts[slot] = start;
            counts[slot] = count;
        }

        let entries = counts
            .iter()
            .try_fold(0usize, |acc, &c| acc.checked_add(c))
            .ok_or(FormatError::NegativeOrOutOfBoundsSize {
                field: "band_entries",
                value: i64::MAX,
            })?;
        let mut offset = BAND_COUNT * BAND_ENTRY_BYTES;
        let id_bytes = entries.saturating_mul(4);
        let mut id_sec = section(bytes, offset, id_bytes, "band star ids")?;
        offset += id_bytes;
        let mut ra_sec = section(bytes, offset, id_bytes, "band ras")?;
        offset += id_bytes;

        let mut star_ids = Vec::with_capacity(entries);
        for _ in 0..entries {
            let id = id_sec.read_i32::<LittleEndian>()?;
            if id < 0 || id as usize >= record_count {
                return Err(FormatError::NegativeOrOutOfBoundsSize {
                    field: "band_star_index",
                    value: i64::from(id),
                });
            }
            star_ids.push(id);
        }
        let mut ras = Vec::with_capacity(entries);
        for _ in 0..entries {
            ras.push(ra_sec.read_f32::<LittleEndian>()?);
        }

        for (&start, &count) in starts.iter().zip(&counts) {
            let Some(end) = start.checked_add(count).filter(|&end| end <= entries) else {
                return Err(FormatError::NegativeOrOutOfBoundsSize {
                    field: "band_range",
                    value: start as i64,
                });
            };
            // queries binary-search each band by RA
            if !ras[start..end].windows(2).all(|w| w[0].total_cmp(&w[1]).is_le()) {
                return Err(FormatError::NegativeOrOutOfBoundsSize {
                    field: "band_ra_order",
                    value: start as i64,
                });
            }
        }

        let summary = match section(bytes, offset, SUMMARY_FLOATS * 4, "index summary") {
            Ok(mut s) => {
                let mut v = [0f32; SUMMARY_FLOATS];
                for slot in v.iter_mut() {
                    *slot = s.read_f32::<LittleEndian>()?;
                }
                Some(IndexSummary {
                    band_count: v[0] as u32,
                    entry_count: v[1] as u32,
                    min_mag: v[2],
                    max_mag: v[3],
                    min_ra: v[4],
                    max_ra: v[5],
                    min_dec: v[6],
                    max_dec: v[7],
                })
            }
            Err(_) => None,
        };

        Ok(Self {
            starts,
            counts,
            star_ids,
            ras,
            summary,
        })
    }

    /// Location of `band_id`, or `None` outside `[-90, 89]`.
    #[must_use]
    pub fn band(&self, band_id: i32) -> Option<BandSlice> {
        if !(MIN_BAND_ID..=MAX_BAND_ID).contains(&band_id) {
            return None;
        }
        let slot = (band_id - MIN_BAND_ID) as usize;
        Some(BandSlice {
            band_id,
            start: self.starts[slot],
            count: self.counts[slot],
        })
    }

    /// RA values of one band (empty outside `[-90, 89]`).
    #[must_use]
    pub fn band_ras(&self, band_id: i32) -> &[f32] {
        self.band(band_id)
            .map_or(&[][..], |b| &self.ras[b.start..b.start + b.count])
    }

    /// Star record indices of one band, parallel to [`band_ras`](Self::band_ras).
    #[must_use]
    pub fn band_star_ids(&self, band_id: i32) -> &[i32] {
        self.band(band_id)
            .map_or(&[][..], |b| &self.star_ids[b.start..b.start + b.count])
    }

    #[must_use]
    pub fn star_ids(&self) -> &[i32] {
        &self.star_ids
    }

    #[must_use]
    pub fn ras(&self) -> &[f32] {
        &self.ras
    }

    /// Total entries across all bands.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.star_ids.len()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&IndexSummary> {
        self.summary.as_ref()
    }
}

impl std::fmt::Debug for BandIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BandIndex")
            .field("bands", &BAND_COUNT)
            .field("entries", &self.star_ids.len())
            .field("summary", &self.summary)
            .finish()
    }
}
