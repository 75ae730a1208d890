use super::helpers::*;
use crate::*;
use sky::IAU_CODES;

#[test]
fn emits_every_iau_code_in_order() {
    let packed = sample_boundaries();
    assert_eq!(packed.constellations.len(), 88);
    for (c, code) in packed.constellations.iter().zip(IAU_CODES) {
        assert_eq!(c.code, code);
    }
}

#[test]
fn unknown_and_missing_codes() {
    let packed = sample_boundaries();
    assert!(packed.constellations.iter().all(|c| c.code != "XYZ"));

    let and = constellation(&packed, "AND");
    assert!(and.polygons.is_empty());
    assert_eq!(and.aabb, Aabb::default());

    assert_eq!(packed.polygon_count, 2);
    let with_polygons = packed
        .constellations
        .iter()
        .filter(|c| !c.polygons.is_empty())
        .count();
    assert_eq!(with_polygons, 2);
}

#[test]
fn rings_are_closed_with_four_or_more_vertices() {
    let packed = sample_boundaries();
    for p in packed.constellations.iter().flat_map(|c| &c.polygons) {
        assert!(p.vertices.len() >= MIN_POLYGON_VERTICES);
        assert!(p.vertices[0].approx_eq(p.vertices.last().unwrap()));
        for pair in p.vertices.windows(2) {
            assert!(!pair[0].approx_eq(&pair[1]));
        }
    }
    let vertices: usize = packed
        .constellations
        .iter()
        .flat_map(|c| &c.polygons)
        .map(|p| p.vertices.len())
        .sum();
    assert_eq!(packed.vertex_count, vertices);
}

#[test]
fn plain_box_bounds() {
    let packed = sample_boundaries();
    let ori = constellation(&packed, "ORI");
    assert_eq!(ori.polygons.len(), 1);
    assert_eq!(ori.polygons[0].vertices.len(), 5);
    assert_eq!(ori.aabb, Aabb::new(75.0, 95.0, -10.0, 15.0));
}

#[test]
fn seam_box_is_bridged_and_wraps() {
    let packed = sample_boundaries();
    let psc = constellation(&packed, "PSC");
    let ring = &psc.polygons[0].vertices;
    // two seam crossings, two vertices each
    assert_eq!(ring.len(), 9);
    assert!(ring.iter().any(|v| v.ra == 360.0));
    assert!(ring.iter().any(|v| v.ra == 0.0));
    assert!(psc.aabb.wraps());
    assert_eq!(psc.aabb, Aabb::new(350.0, 10.0, 20.0, 30.0));
}

#[test]
fn codes_match_case_insensitively() {
    let packed = BoundaryProcessor::prepare(&[parsed("ori", box_edges(80.0, 90.0, 0.0, 5.0))], 0.05);
    assert_eq!(constellation(&packed, "ORI").polygons.len(), 1);
}

#[test]
fn degenerate_chains_are_dropped() {
    // A there-and-back path closes to three vertices; a triangle keeps four.
    let input = vec![
        parsed("CRU", vec![edge(180.0, -60.0, 185.0, -60.0), edge(185.0, -60.0, 180.0, -60.0)]),
        parsed(
            "TRI",
            vec![
                edge(30.0, 30.0, 35.0, 30.0),
                edge(35.0, 30.0, 32.0, 35.0),
                edge(32.0, 35.0, 30.0, 30.0),
            ],
        ),
    ];
    let packed = BoundaryProcessor::prepare(&input, 0.05);
    assert!(constellation(&packed, "CRU").polygons.is_empty());
    assert_eq!(constellation(&packed, "TRI").polygons[0].vertices.len(), 4);
}

#[test]
fn collinear_runs_collapse() {
    let mut edges = Vec::new();
    for i in 0..10 {
        let ra = 100.0 + f64::from(i);
        edges.push(edge(ra, 0.0, ra + 1.0, 0.0));
    }
    edges.push(edge(110.0, 0.0, 110.0, 10.0));
    edges.push(edge(110.0, 10.0, 100.0, 10.0));
    edges.push(edge(100.0, 10.0, 100.0, 0.0));

    for epsilon in [1e-9, 0.05] {
        let packed = BoundaryProcessor::prepare(&[parsed("SEX", edges.clone())], epsilon);
        let ring = &constellation(&packed, "SEX").polygons[0].vertices;
        assert_eq!(ring.len(), 5, "epsilon {epsilon}");
    }
}

#[test]
fn epsilon_removes_small_wiggles() {
    let edges = vec![
        edge(100.0, 0.0, 105.0, 0.02),
        edge(105.0, 0.02, 110.0, 0.0),
        edge(110.0, 0.0, 110.0, 10.0),
        edge(110.0, 10.0, 100.0, 10.0),
        edge(100.0, 10.0, 100.0, 0.0),
    ];
    let exact = BoundaryProcessor::prepare(&[parsed("LEO", edges.clone())], 0.0);
    let coarse = BoundaryProcessor::prepare(&[parsed("LEO", edges)], 0.05);
    assert_eq!(constellation(&exact, "LEO").polygons[0].vertices.len(), 6);
    assert_eq!(constellation(&coarse, "LEO").polygons[0].vertices.len(), 5);
}

#[test]
fn wide_polygon_keeps_its_own_side() {
    let packed = BoundaryProcessor::prepare(&[parsed("OCT", wide_ring_edges(0.5))], 0.05);
    let oct = constellation(&packed, "OCT");
    assert_eq!(oct.polygons.len(), 1);
    assert_eq!(oct.polygons[0].aabb, Aabb::new(10.0, 350.0, 0.0, 10.0));
    assert_eq!(oct.aabb, Aabb::new(10.0, 350.0, 0.0, 10.0));
    assert!(!oct.aabb.wraps());
}

#[test]
fn straight_parallels_are_not_bridged() {
    let packed = BoundaryProcessor::prepare(&[parsed("OCT", wide_ring_edges(0.0))], 0.05);
    let oct = constellation(&packed, "OCT");
    let ring = &oct.polygons[0].vertices;
    assert!(ring.iter().all(|v| v.ra >= 10.0 && v.ra <= 350.0), "{ring:?}");
    for pair in ring.windows(2) {
        assert!((pair[1].ra - pair[0].ra).abs() < 180.0, "{pair:?}");
    }
    assert_eq!(oct.aabb, Aabb::new(10.0, 350.0, 0.0, 10.0));
}
