use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use ingest::CatalogSource;
use std::io::{self, Read, Write};

/// Size of one encoded star record.
pub const STAR_RECORD_BYTES: usize = 32;

pub const FLAG_HAS_NAME: u16 = 0x0001;
pub const FLAG_HAS_DESIGNATION: u16 = 0x0002;
pub const FLAG_HAS_HIP: u16 = 0x0004;
pub const FLAG_SOURCE_BSC: u16 = 0x0100;
pub const FLAG_SOURCE_HYG: u16 = 0x0200;

/// Fixed-width star record as stored on disk.
///
/// ```text
/// [ra f32][dec f32][mag f32][b-v f32 (0.0)][hip i32][name_off i32]
/// [designation_off i32][flags u16][constellation i16]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarRecord {
    pub ra_deg: f32,
    pub dec_deg: f32,
    /// NaN when unknown.
    pub mag: f32,
    /// `<= 0` when the star has no Hipparcos number.
    pub hip: i32,
    pub name_offset: i32,
    pub designation_offset: i32,
    pub flags: u16,
    /// Index into [`sky::IAU_CODES`]; `-1` or out of range when unknown.
    pub constellation: i16,
}

impl StarRecord {
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_f32::<LittleEndian>(self.ra_deg)?;
        w.write_f32::<LittleEndian>(self.dec_deg)?;
        w.write_f32::<LittleEndian>(self.mag)?;
        w.write_f32::<LittleEndian>(0.0)?;
        w.write_i32::<LittleEndian>(self.hip)?;
        w.write_i32::<LittleEndian>(self.name_offset)?;
        w.write_i32::<LittleEndian>(self.designation_offset)?;
        w.write_u16::<LittleEndian>(self.flags)?;
        w.write_i16::<LittleEndian>(self.constellation)?;
        Ok(())
    }

    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let ra_deg = r.read_f32::<LittleEndian>()?;
        let dec_deg = r.read_f32::<LittleEndian>()?;
        let mag = r.read_f32::<LittleEndian>()?;
        let _bv = r.read_f32::<LittleEndian>()?;
        Ok(Self {
            ra_deg,
            dec_deg,
            mag,
            hip: r.read_i32::<LittleEndian>()?,
            name_offset: r.read_i32::<LittleEndian>()?,
            designation_offset: r.read_i32::<LittleEndian>()?,
            flags: r.read_u16::<LittleEndian>()?,
            constellation: r.read_i16::<LittleEndian>()?,
        })
    }

    #[must_use]
    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag == flag
    }

    /// Catalog id: the HIP number when present, otherwise the record index.
    #[must_use]
    pub fn id(&self, index: usize) -> i32 {
        if self.hip > 0 {
            self.hip
        } else {
            index as i32
        }
    }
}

/// Source bit for `source`.
pub(crate) fn source_flag(source: CatalogSource) -> u16 {
    match source {
        CatalogSource::Bsc => FLAG_SOURCE_BSC,
        CatalogSource::Hyg => FLAG_SOURCE_HYG,
    }
}

/// Narrows a normalised RA to `f32`, folding a rounded-up `360.0` back to 0.
pub(crate) fn ra_to_f32(ra_deg: f64) -> f32 {
    let ra = sky::normalize_ra(ra_deg) as f32;
    if ra >= 360.0 {
        0.0
    } else {
        ra
    }
}
