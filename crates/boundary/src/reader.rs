use byteorder::{LittleEndian, ReadBytesExt};
use format::{non_negative_usize, section, verify_crc, FormatError};
use log::info;
use memmap2::Mmap;
use sky::{normalize_ra, Equatorial, CONSTELLATION_COUNT};
use std::fs::File;
use std::io::Read;
use std::ops::Range;
use std::path::Path;

use crate::geometry::{Aabb, VERTEX_EPSILON};
use crate::header::{BoundaryHeader, BOUNDARY_HEADER_BYTES};
use crate::regions::{Region, RegionBoxes};
use crate::{DIRECTORY_ENTRY_BYTES, POLYGON_ENTRY_BYTES, VERTEX_BYTES};

/// Slack applied to box tests, in degrees.
const BOX_TOLERANCE: f64 = 1e-5;

/// Below this dec difference an edge is horizontal and skipped by the ray cast.
const FLAT_EDGE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryMetadata {
    pub size_bytes: usize,
    pub constellation_count: usize,
    pub polygon_count: usize,
    pub vertex_count: usize,
    pub data_crc32: u32,
}

/// Per-constellation directory facts.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationSummary {
    pub code: String,
    pub polygon_count: usize,
    pub vertex_count: usize,
    pub aabb: Aabb,
}

/// A ring prepared for point tests: closing vertex dropped, RA unwrapped.
struct RingPolygon {
    aabb: Aabb,
    /// Stored vertex count, closing vertex included.
    stored: usize,
    ras: Vec<f64>,
    decs: Vec<f64>,
    ra_lo: f64,
    ra_hi: f64,
}

impl RingPolygon {
    fn new(aabb: Aabb, raw: &[(f32, f32)]) -> Self {
        let mut ras: Vec<f64> = raw.iter().map(|&(ra, _)| normalize_ra(f64::from(ra))).collect();
        let mut decs: Vec<f64> = raw.iter().map(|&(_, dec)| f64::from(dec)).collect();

        let n = ras.len();
        if n >= 2
            && (ras[0] - ras[n - 1]).abs() < VERTEX_EPSILON
            && (decs[0] - decs[n - 1]).abs() < VERTEX_EPSILON
        {
            ras.pop();
            decs.pop();
        }

        for i in 1..ras.len() {
            let delta = ras[i] - ras[i - 1];
            if delta > 180.0 {
                ras[i] -= 360.0;
            } else if delta < -180.0 {
                ras[i] += 360.0;
            }
        }
        let ra_lo = ras.iter().copied().fold(f64::INFINITY, f64::min);
        let ra_hi = ras.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            aabb,
            stored: raw.len(),
            ras,
            decs,
            ra_lo,
            ra_hi,
        }
    }

    fn contains(&self, ra: f64, dec: f64) -> bool {
        if self.ras.is_empty() {
            return false;
        }
        match self.align(ra) {
            Some(ra) => self.ray_cast(ra, dec),
            None => false,
        }
    }

    /// Shifts `ra` by whole turns into the ring's unwrapped RA range.
    fn align(&self, ra: f64) -> Option<f64> {
        let mut x = ra;
        if x < self.ra_lo {
            x += ((self.ra_lo - x) / 360.0).ceil() * 360.0;
        } else if x > self.ra_hi {
            x -= ((x - self.ra_hi) / 360.0).ceil() * 360.0;
        }
        (x >= self.ra_lo - BOX_TOLERANCE && x <= self.ra_hi + BOX_TOLERANCE).then_some(x)
    }

    /// Even-odd rule with a ray towards +RA.
    fn ray_cast(&self, ra: f64, dec: f64) -> bool {
        let mut inside = false;
        let mut j = self.ras.len() - 1;
        for i in 0..self.ras.len() {
            let (xi, yi) = (self.ras[i], self.decs[i]);
            let (xj, yj) = (self.ras[j], self.decs[j]);
            let dy = yj - yi;
            if dy.abs() >= FLAT_EDGE
                && (yi > dec) != (yj > dec)
                && ra < (xj - xi) * (dec - yi) / dy + xi
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

struct ConstellationEntry {
    code: String,
    aabb: Aabb,
    polygons: Range<usize>,
}

/// Loaded constellation boundaries with exact point-in-polygon lookup.
pub struct BoundaryCatalog {
    constellations: Vec<ConstellationEntry>,
    polygons: Vec<RingPolygon>,
    metadata: BoundaryMetadata,
}

impl BoundaryCatalog {
    /// Decodes and validates a `PTSKCONS` v1 blob.
    ///
    /// # Errors
    ///
    /// Header errors from [`BoundaryHeader::parse`], `CrcMismatch` over the
    /// data section, `TruncatedInput` when the data is shorter than the
    /// declared counts need, and `NegativeOrOutOfBoundsSize` for polygon or
    /// vertex ranges outside their tables.
    pub fn load(bytes: &[u8]) -> Result<Self, FormatError> {
        let header = BoundaryHeader::parse(bytes)?;
        let data = &bytes[BOUNDARY_HEADER_BYTES..];
        verify_crc(header.data_crc32, data)?;

        let dir_len = CONSTELLATION_COUNT * DIRECTORY_ENTRY_BYTES;
        let poly_len = header.polygon_count.saturating_mul(POLYGON_ENTRY_BYTES);
        let vert_len = header.vertex_count.saturating_mul(VERTEX_BYTES);
        let mut dir = section(data, 0, dir_len, "constellation directory")?;
        let mut polys = section(data, dir_len, poly_len, "polygon table")?;
        let mut verts = section(data, dir_len.saturating_add(poly_len), vert_len, "vertices")?;

        let mut vertices = Vec::with_capacity(header.vertex_count);
        for _ in 0..header.vertex_count {
            let ra = verts.read_f32::<LittleEndian>()?;
            let dec = verts.read_f32::<LittleEndian>()?;
            vertices.push((ra, dec));
        }

        let mut polygons = Vec::with_capacity(header.polygon_count);
        for _ in 0..header.polygon_count {
            let start = non_negative_usize(polys.read_i32::<LittleEndian>()?, "vertex_start")?;
            let count = non_negative_usize(polys.read_i32::<LittleEndian>()?, "vertex_count")?;
            let aabb = read_aabb(&mut polys)?;
            let ring = start
                .checked_add(count)
                .and_then(|end| vertices.get(start..end))
                .ok_or(FormatError::NegativeOrOutOfBoundsSize {
                    field: "vertex_range",
                    value: start as i64,
                })?;
            polygons.push(RingPolygon::new(aabb, ring));
        }

        let mut constellations = Vec::with_capacity(CONSTELLATION_COUNT);
        for _ in 0..CONSTELLATION_COUNT {
            let mut raw = [0u8; 4];
            dir.read_exact(&mut raw)?;
            let code = decode_code(&raw);
            let start = non_negative_usize(dir.read_i32::<LittleEndian>()?, "polygon_start")?;
            let count = non_negative_usize(dir.read_i32::<LittleEndian>()?, "polygon_count")?;
            let aabb = read_aabb(&mut dir)?;

            let end = start
                .checked_add(count)
                .filter(|&end| end <= polygons.len())
                .ok_or(FormatError::NegativeOrOutOfBoundsSize {
                    field: "polygon_range",
                    value: start as i64,
                })?;
            constellations.push(ConstellationEntry {
                code,
                aabb,
                polygons: start..end,
            });
        }

        let metadata = BoundaryMetadata {
            size_bytes: bytes.len(),
            constellation_count: CONSTELLATION_COUNT,
            polygon_count: header.polygon_count,
            vertex_count: header.vertex_count,
            data_crc32: header.data_crc32,
        };
        info!(
            "constellation boundaries loaded: {} polygons, {} vertices, {} bytes, crc {:#010x}",
            metadata.polygon_count, metadata.vertex_count, metadata.size_bytes, metadata.data_crc32
        );
        Ok(Self {
            constellations,
            polygons,
            metadata,
        })
    }

    /// Memory-maps `path` and loads it with [`load`](Self::load).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FormatError> {
        let file = File::open(path.as_ref())?;
        // SAFETY: read-only mapping, dropped once `load` has copied the data.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::load(&mmap)
    }

    /// IAU code of the constellation containing `eq`, if any.
    ///
    /// Constellation and polygon boxes are checked first (with a small
    /// tolerance), then the ring itself with an even-odd ray cast.
    pub fn find_by_eq(&self, eq: Equatorial) -> Option<&str> {
        if !eq.is_finite() {
            return None;
        }
        let ra = normalize_ra(eq.ra_deg);
        let dec = eq.dec_deg;
        self.constellations
            .iter()
            .filter(|c| c.aabb.contains(ra, dec, BOX_TOLERANCE))
            .find(|c| {
                self.polygons[c.polygons.clone()]
                    .iter()
                    .any(|p| p.aabb.contains(ra, dec, BOX_TOLERANCE) && p.contains(ra, dec))
            })
            .map(|c| c.code.as_str())
    }

    /// Box-only lookup built from the directory AABBs. Constellations
    /// without polygons are left out.
    #[must_use]
    pub fn region_boxes(&self) -> RegionBoxes {
        RegionBoxes::new(
            self.constellations
                .iter()
                .filter(|c| !c.polygons.is_empty())
                .map(|c| {
                    Region::new(
                        c.code.clone(),
                        c.aabb.ra_min,
                        c.aabb.ra_max,
                        c.aabb.dec_min,
                        c.aabb.dec_max,
                    )
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn metadata(&self) -> &BoundaryMetadata {
        &self.metadata
    }

    /// Directory contents in file order.
    pub fn summaries(&self) -> impl Iterator<Item = ConstellationSummary> + '_ {
        self.constellations.iter().map(|c| ConstellationSummary {
            code: c.code.clone(),
            polygon_count: c.polygons.len(),
            vertex_count: self.polygons[c.polygons.clone()]
                .iter()
                .map(|p| p.stored)
                .sum(),
            aabb: c.aabb,
        })
    }
}

impl std::fmt::Debug for BoundaryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundaryCatalog")
            .field("constellations", &self.constellations.len())
            .field("polygons", &self.metadata.polygon_count)
            .field("vertices", &self.metadata.vertex_count)
            .finish()
    }
}

fn read_aabb(r: &mut &[u8]) -> Result<Aabb, FormatError> {
    Ok(Aabb::new(
        f64::from(r.read_f32::<LittleEndian>()?),
        f64::from(r.read_f32::<LittleEndian>()?),
        f64::from(r.read_f32::<LittleEndian>()?),
        f64::from(r.read_f32::<LittleEndian>()?),
    ))
}

fn decode_code(raw: &[u8; 4]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).trim().to_string()
}
