use super::helpers::*;
use crate::*;
use config::{CatalogPaths, CONSTELLATIONS_FILE, STARS_FILE};
use sky::Equatorial;
use std::fs;
use tempfile::tempdir;

#[test]
fn opens_both_catalogs_from_dir() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(STARS_FILE), star_bytes()).unwrap();
    fs::write(dir.path().join(CONSTELLATIONS_FILE), boundary_bytes()).unwrap();

    let atlas = Atlas::open(&CatalogPaths::new(dir.path()));
    let diag = atlas.diagnostics();
    assert!(diag.stars_ok());
    assert!(diag.boundaries_ok());
    assert_eq!(diag.star_metadata.unwrap().star_count, 5);
    assert_eq!(diag.boundary_metadata.unwrap().polygon_count, 2);
    assert_eq!(atlas.stars().len(), 5);

    let hits = atlas.nearby(Equatorial::new(101.3, -16.7), 1.0, None);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, 32000);
    assert_eq!(
        atlas.find_constellation(Equatorial::new(90.0, 0.0)),
        Some("ORI")
    );
}

#[test]
fn missing_files_fall_back_to_empty() {
    let dir = tempdir().unwrap();
    let atlas = Atlas::open(&CatalogPaths::new(dir.path()));
    let diag = atlas.diagnostics();

    assert!(!diag.stars_ok());
    assert!(!diag.boundaries_ok());
    assert!(diag.star_status.reason().unwrap().starts_with("io error"));
    assert!(diag.star_metadata.is_none());
    assert!(diag.boundary_metadata.is_none());
    assert!(atlas.stars().is_empty());
    assert!(atlas
        .nearby(Equatorial::new(101.3, -16.7), 5.0, None)
        .is_empty());
    assert_eq!(atlas.find_constellation(Equatorial::new(90.0, 0.0)), None);
}

#[test]
fn corrupt_star_file_keeps_boundaries() {
    let mut stars = star_bytes();
    let last = stars.len() - 1;
    stars[last] ^= 0xFF;

    let atlas = Atlas::from_bytes(&stars, &boundary_bytes());
    let diag = atlas.diagnostics();
    assert!(!diag.stars_ok());
    assert!(diag.star_status.reason().unwrap().starts_with("crc mismatch"));
    assert!(diag.boundaries_ok());
    assert_eq!(
        atlas.find_constellation(Equatorial::new(100.0, -20.0)),
        Some("CMA")
    );
}

#[test]
fn corrupt_boundaries_keep_stars() {
    let atlas = Atlas::from_bytes(&star_bytes(), b"PTSKCONS");
    let diag = atlas.diagnostics();
    assert!(diag.stars_ok());
    assert!(matches!(diag.boundary_status, LoadStatus::Fallback { .. }));
    assert_eq!(atlas.stars().len(), 5);
    assert_eq!(atlas.find_constellation(Equatorial::new(90.0, 0.0)), None);
}

#[test]
fn from_parts_uses_given_lookups() {
    let boxes = boundary::RegionBoxes::new(vec![boundary::Region::new(
        "PSC", 350.0, 10.0, -5.0, 5.0,
    )]);
    let atlas = Atlas::from_parts(Box::new(EmptyStarCatalog), Box::new(boxes));
    assert!(atlas.diagnostics().stars_ok());
    assert_eq!(atlas.diagnostics().star_load_time, std::time::Duration::ZERO);
    assert_eq!(
        atlas.find_constellation(Equatorial::new(355.0, 0.0)),
        Some("PSC")
    );
    assert!(atlas.stars().is_empty());
}

#[test]
fn load_status_accessors() {
    assert!(LoadStatus::Loaded.is_loaded());
    assert_eq!(LoadStatus::Loaded.reason(), None);
    let fallback = LoadStatus::Fallback {
        reason: "gone".to_string(),
    };
    assert!(!fallback.is_loaded());
    assert_eq!(fallback.reason(), Some("gone"));
}

#[test]
fn atlas_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Atlas>();

    let atlas = Atlas::from_bytes(&star_bytes(), &boundary_bytes());
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let hits = atlas.nearby(Equatorial::new(213.9, 19.2), 1.0, None);
                assert_eq!(hits[0].id, 69673);
            });
        }
    });
}

#[test]
fn debug_shows_status() {
    let atlas = Atlas::from_bytes(&star_bytes(), &[]);
    let text = format!("{atlas:?}");
    assert!(text.contains("Atlas"));
    assert!(text.contains("star_count: 5"));
    assert!(text.contains("Fallback"));
}
