use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use format::{non_negative_usize, section, FormatError, CONSTELLATION_MAGIC, FORMAT_VERSION};
use sky::CONSTELLATION_COUNT;
use std::io::{self, Read, Write};

/// `magic 8 | version u16 | reserved u16 | count u16 | polygons i32 |
/// vertices i32 | crc u32`.
pub const BOUNDARY_HEADER_BYTES: usize = 8 + 2 + 2 + 2 + 4 + 4 + 4;

/// Decoded `PTSKCONS` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryHeader {
    pub version: u16,
    pub constellation_count: u16,
    pub polygon_count: usize,
    pub vertex_count: usize,
    /// CRC32 of everything after the header.
    pub data_crc32: u32,
}

impl BoundaryHeader {
    pub fn new(polygon_count: usize, vertex_count: usize, data_crc32: u32) -> Self {
        Self {
            version: FORMAT_VERSION,
            constellation_count: CONSTELLATION_COUNT as u16,
            polygon_count,
            vertex_count,
            data_crc32,
        }
    }

    /// # Errors
    ///
    /// `TruncatedInput`, `BadMagic`, `UnsupportedVersion`,
    /// `InvalidRegionCount` when the count is not 88, and
    /// `NegativeOrOutOfBoundsSize` for negative polygon or vertex counts.
    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        let mut rdr = section(bytes, 0, BOUNDARY_HEADER_BYTES, "header")?;

        let mut magic = [0u8; 8];
        rdr.read_exact(&mut magic)?;
        if magic != CONSTELLATION_MAGIC {
            return Err(FormatError::BadMagic {
                expected: String::from_utf8_lossy(&CONSTELLATION_MAGIC).into_owned(),
                actual: String::from_utf8_lossy(&magic).into_owned(),
            });
        }
        let version = rdr.read_u16::<LittleEndian>()?;
        if version != FORMAT_VERSION {
            return Err(FormatError::UnsupportedVersion(version));
        }
        let _reserved = rdr.read_u16::<LittleEndian>()?;
        let constellation_count = rdr.read_u16::<LittleEndian>()?;
        if usize::from(constellation_count) != CONSTELLATION_COUNT {
            return Err(FormatError::InvalidRegionCount {
                expected: CONSTELLATION_COUNT,
                actual: usize::from(constellation_count),
            });
        }
        let polygon_count = non_negative_usize(rdr.read_i32::<LittleEndian>()?, "polygon_count")?;
        let vertex_count = non_negative_usize(rdr.read_i32::<LittleEndian>()?, "vertex_count")?;
        let data_crc32 = rdr.read_u32::<LittleEndian>()?;

        Ok(Self {
            version,
            constellation_count,
            polygon_count,
            vertex_count,
            data_crc32,
        })
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&CONSTELLATION_MAGIC)?;
        w.write_u16::<LittleEndian>(self.version)?;
        w.write_u16::<LittleEndian>(0)?;
        w.write_u16::<LittleEndian>(self.constellation_count)?;
        w.write_i32::<LittleEndian>(to_i32(self.polygon_count)?)?;
        w.write_i32::<LittleEndian>(to_i32(self.vertex_count)?)?;
        w.write_u32::<LittleEndian>(self.data_crc32)?;
        Ok(())
    }
}

pub(crate) fn to_i32(value: usize) -> io::Result<i32> {
    i32::try_from(value).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{value} does not fit in an i32 field"),
        )
    })
}
