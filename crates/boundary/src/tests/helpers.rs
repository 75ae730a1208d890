use crate::*;
use ingest::{BoundaryEdge, ParsedConstellation};
use sky::Equatorial;

pub fn edge(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> BoundaryEdge {
    BoundaryEdge {
        start: Equatorial::new(ra1, dec1),
        end: Equatorial::new(ra2, dec2),
    }
}

pub fn parsed(code: &str, edges: Vec<BoundaryEdge>) -> ParsedConstellation {
    ParsedConstellation {
        code: code.to_string(),
        edges,
    }
}

/// Closed box as four edges, listed out of order with one reversed.
pub fn box_edges(ra_min: f64, ra_max: f64, dec_min: f64, dec_max: f64) -> Vec<BoundaryEdge> {
    vec![
        edge(ra_max, dec_min, ra_max, dec_max),
        edge(ra_min, dec_min, ra_max, dec_min),
        edge(ra_min, dec_min, ra_min, dec_max),
        edge(ra_max, dec_max, ra_min, dec_max),
    ]
}

/// ORI as a plain box, PSC straddling the seam, plus an unknown code.
pub fn sample_boundaries() -> PackedBoundaries {
    let input = vec![
        parsed("ORI", box_edges(75.0, 95.0, -10.0, 15.0)),
        parsed("PSC", box_edges(350.0, 10.0, 20.0, 30.0)),
        parsed("XYZ", box_edges(0.0, 5.0, 0.0, 5.0)),
    ];
    BoundaryProcessor::prepare(&input, 0.05)
}

pub fn sample_bytes() -> Vec<u8> {
    BoundaryWriter::encode(&sample_boundaries()).unwrap()
}

pub fn constellation<'a>(packed: &'a PackedBoundaries, code: &str) -> &'a PackedConstellation {
    packed
        .constellations
        .iter()
        .find(|c| c.code == code)
        .unwrap()
}

/// Ring over RA 10..350 and dec 0..10 made of 10° steps, so it spans more
/// than half the sky without touching the seam. Every other vertex on the
/// parallels is pulled `wiggle` degrees inwards.
pub fn wide_ring_edges(wiggle: f64) -> Vec<BoundaryEdge> {
    let offset = |i: i32| if i % 2 == 0 { wiggle } else { 0.0 };
    let ring: Vec<(f64, f64)> = (1..=35)
        .map(|i| (f64::from(i) * 10.0, offset(i)))
        .chain((1..=35).rev().map(|i| (f64::from(i) * 10.0, 10.0 - offset(i))))
        .collect();
    (0..ring.len())
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % ring.len()]);
            edge(a.0, a.1, b.0, b.1)
        })
        .collect()
}
