//! # packer - sky catalog packing tool
//!
//! Converts source catalogs into the binary files read by the `atlas`
//! crate, and inspects or queries the result.
//!
//! ```text
//! packer stars --source hyg --input hyg.csv --out-dir catalog --meta
//! packer const --input bound_20.dat --out-dir catalog
//! packer inspect catalog/stars_v1.bin
//! packer query --catalog-dir catalog --ra 88.79 --dec 7.41 --radius 2
//! packer self-test --catalog-dir catalog
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`, written to stderr).

mod cli;
mod constellations;
mod inspect;
mod query;
mod stars;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Stars(args) => stars::run(args),
        Commands::Const(args) => constellations::run(args),
        Commands::Inspect(args) => inspect::run(args),
        Commands::Query(args) => query::run(args),
        Commands::SelfTest(args) => query::self_test(args),
    }
}
