//! `packer const`: IAU boundary file to `const_v1.bin`

use anyhow::{Context, Result};
use boundary::{BoundaryProcessor, BoundaryWriter};
use config::{CatalogPaths, PackConfig};
use ingest::parse_iau_boundaries_reader;
use std::fs::{self, File};
use std::io::BufReader;

use crate::cli::ConstArgs;

pub fn run(args: &ConstArgs) -> Result<()> {
    let cfg = PackConfig::default().with_rdp_epsilon(args.rdp_epsilon);
    cfg.validate()?;

    let file = File::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    let parsed = parse_iau_boundaries_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    let packed = BoundaryProcessor::prepare(&parsed, cfg.rdp_epsilon);

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;
    let path = CatalogPaths::new(&args.out_dir).constellations();
    let bytes = BoundaryWriter::write_to_path(&path, &packed)?;

    let populated = packed
        .constellations
        .iter()
        .filter(|c| !c.polygons.is_empty())
        .count();
    println!(
        "wrote {} constellations, {} polygons, {} vertices ({} bytes) to {}",
        populated,
        packed.polygon_count,
        packed.vertex_count,
        bytes.len(),
        path.display()
    );
    Ok(())
}
