//! IAU constellation boundary table parser.
//!
//! Each data line starts with a three-letter constellation code followed by
//! at least four numbers: `ra1 dec1 ra2 dec2` describing one boundary edge.
//! `#` and `//` start comments; `,` and `;` act as whitespace. When no RA
//! sample in the whole file exceeds 24.1 the RA column is taken to be hours
//! and multiplied by 15.

use sky::Equatorial;
use std::io::{BufRead, Read};

use crate::IngestError;

/// RA values at or below this everywhere in a file mean the file uses hours.
const HOURS_THRESHOLD: f64 = 24.1;

/// One boundary segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryEdge {
    pub start: Equatorial,
    pub end: Equatorial,
}

/// All edges for one code, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedConstellation {
    /// Uppercased three-letter code as found in the file.
    pub code: String,
    pub edges: Vec<BoundaryEdge>,
}

/// Parses a whole boundary file held in memory.
///
/// Constellations are returned in order of first appearance.
///
/// # Errors
///
/// [`IngestError::Boundary`] with the 1-based line number when a coded line
/// carries fewer than four numbers.
pub fn parse_iau_boundaries(text: &str) -> Result<Vec<ParsedConstellation>, IngestError> {
    let mut out: Vec<ParsedConstellation> = Vec::new();
    let mut max_ra = f64::NEG_INFINITY;

    for (i, raw) in text.lines().enumerate() {
        if let Some((code, edge)) = parse_line(raw, i + 1)? {
            max_ra = max_ra.max(edge.start.ra_deg).max(edge.end.ra_deg);
            match out.iter_mut().find(|c| c.code == code) {
                Some(c) => c.edges.push(edge),
                None => out.push(ParsedConstellation {
                    code,
                    edges: vec![edge],
                }),
            }
        }
    }

    if max_ra <= HOURS_THRESHOLD {
        for edge in out.iter_mut().flat_map(|c| c.edges.iter_mut()) {
            edge.start.ra_deg *= 15.0;
            edge.end.ra_deg *= 15.0;
        }
    }
    Ok(out)
}

/// Reads `reader` to the end and parses it with [`parse_iau_boundaries`].
pub fn parse_iau_boundaries_reader<R: BufRead>(
    mut reader: R,
) -> Result<Vec<ParsedConstellation>, IngestError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_iau_boundaries(&text)
}

fn parse_line(raw: &str, line_no: usize) -> Result<Option<(String, BoundaryEdge)>, IngestError> {
    let body = raw.split('#').next().unwrap_or("");
    let body = body.split("//").next().unwrap_or("");
    let cleaned = body.replace([',', ';'], " ");
    let cleaned = cleaned.trim();

    let head: String = cleaned.chars().take(3).collect();
    if head.chars().count() < 3 || !head.chars().all(char::is_alphabetic) {
        return Ok(None);
    }
    let code = head.to_uppercase();

    let nums: Vec<f64> = cleaned
        .split_whitespace()
        .filter_map(|tok| tok.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect();
    if nums.len() < 4 {
        return Err(IngestError::Boundary {
            line: line_no,
            message: format!("expected at least four numbers, found {}: {raw:?}", nums.len()),
        });
    }

    let edge = BoundaryEdge {
        start: Equatorial::new(nums[0], nums[1]),
        end: Equatorial::new(nums[2], nums[3]),
    };
    Ok(Some((code, edge)))
}
