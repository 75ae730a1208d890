//! `packer stars`: CSV export to `stars_v1.bin`

use anyhow::{bail, Context, Result};
use config::{CatalogPaths, PackConfig};
use ingest::{read_stars_path, CatalogSource};
use log::info;
use starcat::StarCatalogWriter;
use std::fs;

use crate::cli::StarsArgs;

pub fn run(args: &StarsArgs) -> Result<()> {
    let cfg = PackConfig::default()
        .with_mag_limit(args.mag_limit)
        .with_constellation_codes(!args.no_constellation_codes)
        .with_rdp_epsilon(args.rdp_epsilon);
    cfg.validate()?;
    let source = CatalogSource::from(args.source);

    let report = read_stars_path(source, &args.input, cfg.mag_limit)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    info!(
        "[{source}] {} rows: {} kept, {} fainter than {}, {} invalid, {} incomplete",
        report.total_rows,
        report.stars.len(),
        report.skipped_faint,
        cfg.mag_limit,
        report.skipped_invalid,
        report.skipped_incomplete
    );
    if report.stars.is_empty() {
        bail!(
            "no stars left in {} at magnitude limit {}",
            args.input.display(),
            cfg.mag_limit
        );
    }

    let mut packed = StarCatalogWriter::pack(&report.stars, &cfg)?;
    packed.meta.input = Some(args.input.display().to_string());

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;
    let paths = CatalogPaths::new(&args.out_dir);
    StarCatalogWriter::write_to_path(&paths.stars(), &packed)?;
    if args.meta {
        StarCatalogWriter::write_meta_json(&paths.star_meta(), &packed.meta)?;
    }

    println!(
        "wrote {} stars ({} bytes, crc32 {:08x}) to {}",
        packed.meta.star_count,
        packed.bytes.len(),
        packed.meta.crc32,
        paths.stars().display()
    );
    Ok(())
}
