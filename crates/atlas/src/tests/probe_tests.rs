use super::helpers::*;
use crate::*;
use sky::Equatorial;

fn atlas() -> Atlas {
    Atlas::from_bytes(&star_bytes(), &boundary_bytes())
}

#[test]
fn probe_reports_hits_and_constellation() {
    let probe = atlas().probe(Equatorial::new(101.3, -16.7), 1.0, None, 10);
    assert_eq!(probe.constellation.as_deref(), Some("CMA"));
    assert_eq!(probe.hits.len(), 2);

    let sirius = &probe.hits[1];
    assert_eq!(sirius.id, 32349);
    assert_eq!(sirius.label, "Sirius");
    assert_eq!(sirius.name.as_deref(), Some("Sirius"));
    assert_eq!(sirius.designation.as_deref(), Some("Alp CMA"));
    assert_eq!(sirius.constellation, Some("CMA"));
    assert!(sirius.separation_deg < 0.05);
    assert!(probe.hits[0].separation_deg <= sirius.separation_deg);
}

#[test]
fn probe_respects_limits() {
    let a = atlas();
    let probe = a.probe(Equatorial::new(101.3, -16.7), 1.0, Some(2.0), 10);
    assert_eq!(probe.hits.len(), 1);
    assert_eq!(probe.hits[0].id, 32349);

    let probe = a.probe(Equatorial::new(101.3, -16.7), 1.0, None, 1);
    assert_eq!(probe.hits.len(), 1);

    let probe = a.probe(Equatorial::new(0.0, 80.0), 1.0, None, 10);
    assert!(probe.hits.is_empty());
    assert_eq!(probe.constellation, None);
}

#[test]
fn probe_designation_falls_back_to_flamsteed() {
    let probe = atlas().probe(Equatorial::new(79.0, -8.0), 0.1, None, 1);
    let hit = &probe.hits[0];
    assert_eq!(hit.designation.as_deref(), Some("20"));
    assert_eq!(hit.label, "20");
}

#[test]
fn self_test_passes_on_good_catalogs() {
    let results = atlas().self_test();
    let names: Vec<&str> = results.iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        [
            "Sirius proximity",
            "Arcturus proximity",
            "Rigel proximity",
            "Constellation lookup"
        ]
    );
    for r in &results {
        assert!(r.passed, "{} failed: {}", r.name, r.detail);
    }
    assert!(results[0].detail.starts_with("hit=32349, sep="));
    assert_eq!(results[3].detail, "ORI");
}

#[test]
fn self_test_fails_on_empty_atlas() {
    let results = Atlas::from_bytes(&[], &[]).self_test();
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| !r.passed));
    assert_eq!(results[0].detail, "no-match");
    assert_eq!(results[3].detail, "none");
}
