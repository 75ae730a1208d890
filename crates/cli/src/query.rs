//! `packer query` and `packer self-test`: runtime lookups over a catalog dir

use anyhow::{bail, Result};
use atlas::{Atlas, Probe};
use config::CatalogPaths;
use log::warn;
use serde_json::json;
use sky::Equatorial;

use crate::cli::{OutputFormat, QueryArgs, SelfTestArgs};

fn open(dir: &std::path::Path) -> Atlas {
    let atlas = Atlas::open(&CatalogPaths::new(dir));
    let diag = atlas.diagnostics();
    if let Some(reason) = diag.star_status.reason() {
        warn!("no star catalog: {reason}");
    }
    if let Some(reason) = diag.boundary_status.reason() {
        warn!("no constellation boundaries: {reason}");
    }
    atlas
}

pub fn run(args: &QueryArgs) -> Result<()> {
    let center = Equatorial::new(args.ra, args.dec);
    if !center.is_finite() {
        bail!("position must be finite, got ra={} dec={}", args.ra, args.dec);
    }
    let atlas = open(&args.catalog_dir);
    let probe = atlas.probe(center, args.radius, args.mag_limit, args.limit);

    match args.format {
        OutputFormat::Table => print_table(&probe),
        OutputFormat::Json => print_json(center, &probe)?,
    }
    Ok(())
}

fn print_table(probe: &Probe) {
    println!(
        "constellation: {}",
        probe.constellation.as_deref().unwrap_or("-")
    );
    for (i, hit) in probe.hits.iter().enumerate() {
        println!(
            "{:3}: {:>8} {:<24} {:<14} mag={:5.2} sep={:.4}°",
            i + 1,
            hit.id,
            hit.label,
            hit.designation.as_deref().unwrap_or("-"),
            hit.mag,
            hit.separation_deg
        );
    }
    if probe.hits.is_empty() {
        println!("no stars found");
    } else {
        println!("{} stars", probe.hits.len());
    }
}

fn print_json(center: Equatorial, probe: &Probe) -> Result<()> {
    let stars: Vec<_> = probe
        .hits
        .iter()
        .map(|h| {
            json!({
                "id": h.id,
                "label": h.label,
                "name": h.name.as_deref(),
                "designation": h.designation,
                "mag": h.mag,
                "separationDeg": h.separation_deg,
                "constellation": h.constellation,
            })
        })
        .collect();
    let out = json!({
        "ra": center.ra_deg,
        "dec": center.dec_deg,
        "constellation": probe.constellation,
        "stars": stars,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

pub fn self_test(args: &SelfTestArgs) -> Result<()> {
    let atlas = open(&args.catalog_dir);
    let results = atlas.self_test();
    for r in &results {
        let mark = if r.passed { "PASS" } else { "FAIL" };
        println!("{mark} {:<22} {}", r.name, r.detail);
    }
    let failed = results.iter().filter(|r| !r.passed).count();
    if failed > 0 {
        bail!("{failed} of {} self-test checks failed", results.len());
    }
    Ok(())
}
