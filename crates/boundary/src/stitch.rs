//! Joins unordered boundary edges into vertex chains.

use ingest::BoundaryEdge;
use std::collections::HashMap;

use crate::geometry::{Vertex, VertexKey};

/// Walks `edges` into chains of connected vertices.
///
/// Every edge is used once. A chain starts at the first unused edge and is
/// extended from its end through any unused edge sharing that vertex
/// (reversing the edge when needed) until no continuation remains. Chains
/// with fewer than three vertices are dropped.
pub fn stitch(edges: &[BoundaryEdge]) -> Vec<Vec<Vertex>> {
    if edges.is_empty() {
        return Vec::new();
    }

    let segments: Vec<(Vertex, Vertex)> = edges
        .iter()
        .map(|e| {
            (
                Vertex::new(e.start.ra_deg, e.start.dec_deg),
                Vertex::new(e.end.ra_deg, e.end.dec_deg),
            )
        })
        .collect();

    let mut adjacency: HashMap<VertexKey, Vec<usize>> = HashMap::new();
    for (i, (start, end)) in segments.iter().enumerate() {
        adjacency.entry(start.key()).or_default().push(i);
        adjacency.entry(end.key()).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut chains = Vec::new();

    for first in 0..segments.len() {
        if used[first] {
            continue;
        }
        used[first] = true;
        let (start, end) = segments[first];
        let mut chain = vec![start, end];
        let mut cursor = end.key();

        while let Some(next) = adjacency
            .get(&cursor)
            .and_then(|ids| ids.iter().copied().find(|&i| !used[i]))
        {
            used[next] = true;
            let (a, b) = segments[next];
            let far = if a.key() == cursor { b } else { a };
            chain.push(far);
            cursor = far.key();
        }

        if chain.len() >= 3 {
            chains.push(chain);
        }
    }
    chains
}
