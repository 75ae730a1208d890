use ingest::ParsedConstellation;
use log::{debug, warn};
use sky::{constellation_index, IAU_CODES};

use crate::geometry::{Aabb, Vertex};
use crate::simplify::{bridge_wrap, ensure_closed, remove_redundant, simplify};
use crate::stitch::stitch;

/// Minimum ring size (closing vertex included) that is kept.
pub const MIN_POLYGON_VERTICES: usize = 4;

/// A closed, simplified ring ready for serialisation.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedPolygon {
    pub vertices: Vec<Vertex>,
    pub aabb: Aabb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackedConstellation {
    pub code: &'static str,
    pub polygons: Vec<PackedPolygon>,
    /// All-zero when `polygons` is empty.
    pub aabb: Aabb,
}

/// Every IAU constellation in canonical order, with totals.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedBoundaries {
    pub constellations: Vec<PackedConstellation>,
    pub polygon_count: usize,
    pub vertex_count: usize,
}

/// Turns parsed boundary edges into packed rings.
pub struct BoundaryProcessor {}

impl BoundaryProcessor {
    /// Builds the 88-entry boundary set.
    ///
    /// For each IAU code the edges are stitched into chains, simplified
    /// with `epsilon`, split at the RA seam, closed and de-duplicated.
    /// Rings left with fewer than four vertices are dropped. Codes missing
    /// from `parsed` get no polygons; codes not in the IAU table are logged
    /// and skipped.
    pub fn prepare(parsed: &[ParsedConstellation], epsilon: f64) -> PackedBoundaries {
        for p in parsed {
            if constellation_index(&p.code).is_none() {
                warn!("ignoring unknown constellation code {:?} ({} edges)", p.code, p.edges.len());
            }
        }

        let constellations: Vec<PackedConstellation> = IAU_CODES
            .iter()
            .map(|&code| {
                let polygons = parsed
                    .iter()
                    .find(|p| p.code.eq_ignore_ascii_case(code))
                    .map(|p| Self::polygons_for(p, epsilon))
                    .unwrap_or_default();
                let boxes: Vec<Aabb> = polygons.iter().map(|p| p.aabb).collect();
                PackedConstellation {
                    code,
                    aabb: Aabb::merge(&boxes),
                    polygons,
                }
            })
            .collect();

        let polygon_count = constellations.iter().map(|c| c.polygons.len()).sum();
        let vertex_count = constellations
            .iter()
            .flat_map(|c| &c.polygons)
            .map(|p| p.vertices.len())
            .sum();

        PackedBoundaries {
            constellations,
            polygon_count,
            vertex_count,
        }
    }

    fn polygons_for(parsed: &ParsedConstellation, epsilon: f64) -> Vec<PackedPolygon> {
        let chains = stitch(&parsed.edges);
        let chain_count = chains.len();
        let polygons: Vec<PackedPolygon> = chains
            .into_iter()
            .map(|chain| simplify(&chain, epsilon))
            .map(|ring| bridge_wrap(&ring))
            .map(ensure_closed)
            .map(remove_redundant)
            .filter(|ring| ring.len() >= MIN_POLYGON_VERTICES)
            .map(|vertices| PackedPolygon {
                aabb: Aabb::of_vertices(&vertices),
                vertices,
            })
            .collect();
        debug!(
            "{}: {} edges -> {} chains -> {} polygons",
            parsed.code,
            parsed.edges.len(),
            chain_count,
            polygons.len()
        );
        polygons
    }
}
