use boundary::{BoundaryProcessor, BoundaryWriter};
use config::PackConfig;
use ingest::{BoundaryEdge, CatalogSource, ParsedConstellation, StarInput};
use sky::Equatorial;
use starcat::StarCatalogWriter;

pub fn bright_stars() -> Vec<StarInput> {
    vec![
        StarInput::new(CatalogSource::Hyg, 101.287, -16.716, -1.46)
            .with_hip(32349)
            .with_name("Sirius")
            .with_bayer("Alp")
            .with_flamsteed("9")
            .with_constellation("CMa"),
        StarInput::new(CatalogSource::Hyg, 213.915, 19.182, -0.05)
            .with_hip(69673)
            .with_name("Arcturus")
            .with_bayer("Alp")
            .with_flamsteed("16")
            .with_constellation("Boo"),
        StarInput::new(CatalogSource::Hyg, 78.634, -8.202, 0.13)
            .with_hip(24436)
            .with_name("Rigel")
            .with_bayer("Bet")
            .with_flamsteed("19")
            .with_constellation("Ori"),
        // faint neighbour of Sirius, below the self-test magnitude limit
        StarInput::new(CatalogSource::Hyg, 101.3, -16.7, 5.0).with_hip(32000),
        StarInput::new(CatalogSource::Hyg, 79.0, -8.0, 4.5).with_flamsteed("20"),
    ]
}

pub fn star_bytes() -> Vec<u8> {
    StarCatalogWriter::pack(&bright_stars(), &PackConfig::default())
        .unwrap()
        .bytes
}

fn edge(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> BoundaryEdge {
    BoundaryEdge {
        start: Equatorial::new(ra1, dec1),
        end: Equatorial::new(ra2, dec2),
    }
}

fn boxed(code: &str, ra_min: f64, ra_max: f64, dec_min: f64, dec_max: f64) -> ParsedConstellation {
    ParsedConstellation {
        code: code.to_string(),
        edges: vec![
            edge(ra_min, dec_min, ra_max, dec_min),
            edge(ra_max, dec_min, ra_max, dec_max),
            edge(ra_max, dec_max, ra_min, dec_max),
            edge(ra_min, dec_max, ra_min, dec_min),
        ],
    }
}

/// Orion as a box around (90, 0), Canis Major around Sirius.
pub fn boundary_bytes() -> Vec<u8> {
    let packed = BoundaryProcessor::prepare(
        &[
            boxed("ORI", 70.0, 95.0, -11.0, 23.0),
            boxed("CMA", 95.0, 110.0, -33.0, -11.0),
        ],
        0.05,
    );
    BoundaryWriter::encode(&packed).unwrap()
}
