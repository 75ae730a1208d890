//! Shared binary catalog framing: the 32-byte header, CRC32 integrity checks
//! and the typed decode error taxonomy.
//!
//! ## Header (32 bytes, little-endian)
//!
//! ```text
//! [magic: 8 ASCII][version: u16][reserved: u16][record_count: i32]
//! [string_pool_size: i32][index_offset: i32][index_size: i32][payload_crc32: u32]
//! ```
//!
//! `index_offset` is measured from the start of the payload (byte 32), and
//! `payload_crc32` covers every byte after the header.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crc32fast::Hasher as Crc32;
use std::fs::{rename, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Size of the catalog header in bytes.
pub const HEADER_BYTES: usize = 32;

/// The only format version this crate reads or writes.
pub const FORMAT_VERSION: u16 = 1;

/// Magic for packed star catalogs.
pub const STAR_MAGIC: [u8; 8] = *b"PTSKSTAR";

/// Magic for packed constellation boundary catalogs.
pub const CONSTELLATION_MAGIC: [u8; 8] = *b"PTSKCONS";

/// Errors raised while decoding or validating a packed catalog.
#[derive(Debug, Error)]
pub enum FormatError {
    /// An underlying I/O error (file open, mmap).
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// A section needs more bytes than the blob provides.
    #[error("truncated input: {section} needs {needed} bytes, only {actual} available")]
    TruncatedInput {
        section: &'static str,
        needed: usize,
        actual: usize,
    },

    #[error("bad magic: expected {expected:?}, found {actual:?}")]
    BadMagic { expected: String, actual: String },

    #[error("unsupported format version {0}")]
    UnsupportedVersion(u16),

    /// A size or offset field is negative or points past the blob.
    #[error("field {field} has invalid size/offset {value}")]
    NegativeOrOutOfBoundsSize { field: &'static str, value: i64 },

    #[error("crc mismatch: header says {expected:#010x}, payload hashes to {actual:#010x}")]
    CrcMismatch { expected: u32, actual: u32 },

    #[error("record section is {actual} bytes, expected {expected}")]
    RecordSizeMismatch { expected: usize, actual: usize },

    #[error("band id {0} is outside [-90, 89] or repeated")]
    InvalidBandId(i32),

    #[error("expected {expected} constellation regions, found {actual}")]
    InvalidRegionCount { expected: usize, actual: usize },
}

/// Convenience alias used throughout the catalog crates.
pub type Result<T> = std::result::Result<T, FormatError>;

/// Decoded catalog header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogHeader {
    pub magic: [u8; 8],
    pub version: u16,
    pub record_count: i32,
    pub string_pool_size: i32,
    pub index_offset: i32,
    pub index_size: i32,
    pub payload_crc32: u32,
}

impl CatalogHeader {
    /// Builds a version-1 header. `payload_crc32` is filled in by the caller
    /// once the payload is known.
    pub fn new(
        magic: [u8; 8],
        record_count: i32,
        string_pool_size: i32,
        index_offset: i32,
        index_size: i32,
        payload_crc32: u32,
    ) -> Self {
        Self {
            magic,
            version: FORMAT_VERSION,
            record_count,
            string_pool_size,
            index_offset,
            index_size,
            payload_crc32,
        }
    }

    /// Parses the first [`HEADER_BYTES`] of `bytes`.
    ///
    /// # Errors
    ///
    /// - [`FormatError::TruncatedInput`] if fewer than 32 bytes are present
    /// - [`FormatError::BadMagic`] if the magic differs from `expected_magic`
    /// - [`FormatError::UnsupportedVersion`] for any version other than 1
    /// - [`FormatError::NegativeOrOutOfBoundsSize`] for negative size fields
    pub fn parse(bytes: &[u8], expected_magic: &[u8; 8]) -> Result<Self> {
        let mut rdr = section(bytes, 0, HEADER_BYTES, "header")?;

        let mut magic = [0u8; 8];
        io::Read::read_exact(&mut rdr, &mut magic)?;
        if &magic != expected_magic {
            return Err(FormatError::BadMagic {
                expected: String::from_utf8_lossy(expected_magic).into_owned(),
                actual: String::from_utf8_lossy(&magic).into_owned(),
            });
        }

        let version = rdr.read_u16::<LittleEndian>()?;
        if version != FORMAT_VERSION {
            return Err(FormatError::UnsupportedVersion(version));
        }
        let _reserved = rdr.read_u16::<LittleEndian>()?;

        let record_count = non_negative(rdr.read_i32::<LittleEndian>()?, "record_count")?;
        let string_pool_size =
            non_negative(rdr.read_i32::<LittleEndian>()?, "string_pool_size")?;
        let index_offset = non_negative(rdr.read_i32::<LittleEndian>()?, "index_offset")?;
        let index_size = non_negative(rdr.read_i32::<LittleEndian>()?, "index_size")?;
        let payload_crc32 = rdr.read_u32::<LittleEndian>()?;

        Ok(Self {
            magic,
            version,
            record_count,
            string_pool_size,
            index_offset,
            index_size,
            payload_crc32,
        })
    }

    /// Serialises the header (32 bytes) to `w`.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.magic)?;
        w.write_u16::<LittleEndian>(self.version)?;
        w.write_u16::<LittleEndian>(0)?;
        w.write_i32::<LittleEndian>(self.record_count)?;
        w.write_i32::<LittleEndian>(self.string_pool_size)?;
        w.write_i32::<LittleEndian>(self.index_offset)?;
        w.write_i32::<LittleEndian>(self.index_size)?;
        w.write_u32::<LittleEndian>(self.payload_crc32)?;
        Ok(())
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_BYTES);
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    /// Verifies that CRC32 over `bytes[32..]` equals `payload_crc32`.
    pub fn verify_payload(&self, bytes: &[u8]) -> Result<()> {
        let payload = bytes.get(HEADER_BYTES..).unwrap_or(&[]);
        verify_crc(self.payload_crc32, payload)
    }
}

/// Free-function form of [`CatalogHeader::verify_payload`].
pub fn verify_payload_crc(header: &CatalogHeader, bytes: &[u8]) -> Result<()> {
    header.verify_payload(bytes)
}

/// CRC32 (IEEE) of `data`.
#[must_use]
pub fn crc32(data: &[u8]) -> u32 {
    let mut hasher = Crc32::new();
    hasher.update(data);
    hasher.finalize()
}

/// Returns [`FormatError::CrcMismatch`] unless `crc32(data) == expected`.
pub fn verify_crc(expected: u32, data: &[u8]) -> Result<()> {
    let actual = crc32(data);
    if actual != expected {
        return Err(FormatError::CrcMismatch { expected, actual });
    }
    Ok(())
}

/// Bounds-checked sub-slice `bytes[offset..offset + len]`.
///
/// Returns [`FormatError::TruncatedInput`] naming `section` when the range
/// does not fit.
pub fn section<'a>(
    bytes: &'a [u8],
    offset: usize,
    len: usize,
    name: &'static str,
) -> Result<&'a [u8]> {
    offset
        .checked_add(len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or(FormatError::TruncatedInput {
            section: name,
            needed: offset.saturating_add(len),
            actual: bytes.len(),
        })
}

/// Converts a decoded `i32` size field to `usize`, rejecting negatives.
pub fn non_negative_usize(value: i32, field: &'static str) -> Result<usize> {
    usize::try_from(value).map_err(|_| FormatError::NegativeOrOutOfBoundsSize {
        field,
        value: i64::from(value),
    })
}

fn non_negative(value: i32, field: &'static str) -> Result<i32> {
    non_negative_usize(value, field).map(|_| value)
}

/// Writes `bytes` to `path` crash-safely.
///
/// Data goes to `<path>.tmp` first, is flushed and fsynced, then renamed over
/// `path`. The parent directory is synced afterwards so the rename survives a
/// crash on ext4/XFS.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let raw = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(tmp_path)?;
    let mut file = BufWriter::new(raw);
    file.write_all(bytes)?;
    file.flush()?;
    file.into_inner().map_err(|e| e.into_error())?.sync_all()?;

    rename(tmp_path, path)?;

    if let Some(parent) = path.parent() {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }
    Ok(())
}
