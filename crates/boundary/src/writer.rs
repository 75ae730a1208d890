use anyhow::{Context, Result};
use byteorder::{LittleEndian, WriteBytesExt};
use format::{crc32, write_atomic, FormatError};
use log::info;
use sky::CONSTELLATION_COUNT;
use std::io::Write;
use std::path::Path;

use crate::geometry::Aabb;
use crate::header::{to_i32, BoundaryHeader, BOUNDARY_HEADER_BYTES};
use crate::processor::PackedBoundaries;
use crate::{DIRECTORY_ENTRY_BYTES, POLYGON_ENTRY_BYTES, VERTEX_BYTES};

/// Serialises [`PackedBoundaries`] as a `PTSKCONS` v1 blob.
pub struct BoundaryWriter {}

impl BoundaryWriter {
    /// Encodes header, directory, polygon table and vertices.
    ///
    /// # Errors
    ///
    /// [`FormatError::InvalidRegionCount`] unless exactly 88 constellations
    /// are present, or an error if a count overflows its `i32` field.
    pub fn encode(packed: &PackedBoundaries) -> Result<Vec<u8>> {
        if packed.constellations.len() != CONSTELLATION_COUNT {
            return Err(FormatError::InvalidRegionCount {
                expected: CONSTELLATION_COUNT,
                actual: packed.constellations.len(),
            }
            .into());
        }

        let polygon_total: usize = packed.constellations.iter().map(|c| c.polygons.len()).sum();
        let vertex_total: usize = packed
            .constellations
            .iter()
            .flat_map(|c| &c.polygons)
            .map(|p| p.vertices.len())
            .sum();

        let mut directory = Vec::with_capacity(CONSTELLATION_COUNT * DIRECTORY_ENTRY_BYTES);
        let mut polygons = Vec::with_capacity(polygon_total * POLYGON_ENTRY_BYTES);
        let mut vertices = Vec::with_capacity(vertex_total * VERTEX_BYTES);

        let mut polygon_index = 0usize;
        let mut vertex_index = 0usize;
        for c in &packed.constellations {
            write_code(&mut directory, c.code)?;
            directory.write_i32::<LittleEndian>(to_i32(polygon_index)?)?;
            directory.write_i32::<LittleEndian>(to_i32(c.polygons.len())?)?;
            write_aabb(&mut directory, &c.aabb)?;

            for p in &c.polygons {
                polygons.write_i32::<LittleEndian>(to_i32(vertex_index)?)?;
                polygons.write_i32::<LittleEndian>(to_i32(p.vertices.len())?)?;
                write_aabb(&mut polygons, &p.aabb)?;
                for v in &p.vertices {
                    vertices.write_f32::<LittleEndian>(v.ra as f32)?;
                    vertices.write_f32::<LittleEndian>(v.dec as f32)?;
                }
                polygon_index += 1;
                vertex_index += p.vertices.len();
            }
        }

        let mut data = directory;
        data.extend_from_slice(&polygons);
        data.extend_from_slice(&vertices);
        let crc = crc32(&data);

        let mut bytes = Vec::with_capacity(BOUNDARY_HEADER_BYTES + data.len());
        BoundaryHeader::new(polygon_index, vertex_index, crc).write_to(&mut bytes)?;
        bytes.extend_from_slice(&data);

        info!(
            "packed {} constellations: {} polygons, {} vertices ({} bytes, crc {:#010x})",
            CONSTELLATION_COUNT,
            polygon_index,
            vertex_index,
            bytes.len(),
            crc
        );
        Ok(bytes)
    }

    /// Encodes and atomically writes the blob to `path`. Returns the blob.
    pub fn write_to_path(path: &Path, packed: &PackedBoundaries) -> Result<Vec<u8>> {
        let bytes = Self::encode(packed)?;
        write_atomic(path, &bytes)
            .with_context(|| format!("failed to write boundary catalog {}", path.display()))?;
        Ok(bytes)
    }
}

/// Three ASCII bytes plus a NUL. Shorter codes are space padded.
fn write_code<W: Write>(w: &mut W, code: &str) -> std::io::Result<()> {
    let mut field = [b' ', b' ', b' ', 0];
    for (slot, b) in field.iter_mut().zip(code.bytes().take(3)) {
        *slot = b;
    }
    w.write_all(&field)
}

fn write_aabb<W: Write>(w: &mut W, aabb: &Aabb) -> std::io::Result<()> {
    w.write_f32::<LittleEndian>(aabb.ra_min as f32)?;
    w.write_f32::<LittleEndian>(aabb.ra_max as f32)?;
    w.write_f32::<LittleEndian>(aabb.dec_min as f32)?;
    w.write_f32::<LittleEndian>(aabb.dec_max as f32)
}
