//! `packer inspect`: header and metadata of either packed format

use anyhow::{bail, Context, Result};
use boundary::BoundaryCatalog;
use format::{CONSTELLATION_MAGIC, STAR_MAGIC};
use starcat::StarCatalog;
use std::fs;

use crate::cli::InspectArgs;

pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("failed to read {}", args.file.display()))?;
    let what = args.file.display();

    match bytes.get(..8) {
        Some(m) if m == STAR_MAGIC.as_slice() => {
            let catalog = StarCatalog::load(&bytes).with_context(|| what.to_string())?;
            print_stars(&catalog);
        }
        Some(m) if m == CONSTELLATION_MAGIC.as_slice() => {
            let catalog = BoundaryCatalog::load(&bytes).with_context(|| what.to_string())?;
            print_boundaries(&catalog, args.verbose);
        }
        _ => bail!("{what} is neither a star nor a constellation catalog"),
    }
    Ok(())
}

fn print_stars(catalog: &StarCatalog) {
    let meta = catalog.metadata();
    println!("format:        PTSKSTAR v1");
    println!("size:          {} bytes", meta.size_bytes);
    println!("stars:         {}", meta.star_count);
    println!("string pool:   {} bytes", meta.string_pool_bytes);
    println!("index:         {} bytes at {}", meta.index_size, meta.index_offset);
    println!("index entries: {}", meta.band_entry_count);
    println!("crc32:         {:08x}", meta.payload_crc32);
    if let Some(s) = &meta.summary {
        println!("bands:         {}", s.band_count);
        println!("magnitude:     {:.2} .. {:.2}", s.min_mag, s.max_mag);
        println!("ra:            {:.4} .. {:.4}", s.min_ra, s.max_ra);
        println!("dec:           {:.4} .. {:.4}", s.min_dec, s.max_dec);
    }
}

fn print_boundaries(catalog: &BoundaryCatalog, verbose: bool) {
    let meta = catalog.metadata();
    let populated = catalog.summaries().filter(|s| s.polygon_count > 0).count();
    println!("format:         PTSKCONS v1");
    println!("size:           {} bytes", meta.size_bytes);
    println!(
        "constellations: {} ({} with polygons)",
        meta.constellation_count, populated
    );
    println!("polygons:       {}", meta.polygon_count);
    println!("vertices:       {}", meta.vertex_count);
    println!("crc32:          {:08x}", meta.data_crc32);
    if verbose {
        for s in catalog.summaries().filter(|s| s.polygon_count > 0) {
            let b = s.aabb;
            println!(
                "  {} {:>3} polygons {:>5} vertices  ra {:8.4}..{:8.4}  dec {:+8.4}..{:+8.4}",
                s.code, s.polygon_count, s.vertex_count, b.ra_min, b.ra_max, b.dec_min, b.dec_max
            );
        }
    }
}
