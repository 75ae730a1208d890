//! CLI argument definitions for packer

use clap::{Parser, Subcommand, ValueEnum};
use config::{DEFAULT_MAG_LIMIT, DEFAULT_RDP_EPSILON};
use ingest::CatalogSource;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "packer")]
#[command(about = "Pack star catalogs and constellation boundaries into binary files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a BSC or HYG CSV export into stars_v1.bin
    Stars(StarsArgs),

    /// Pack IAU constellation boundaries into const_v1.bin
    Const(ConstArgs),

    /// Print the header and metadata of a packed file
    Inspect(InspectArgs),

    /// Nearby stars and the containing constellation for one position
    Query(QueryArgs),

    /// Run the built-in bright-star and constellation checks
    SelfTest(SelfTestArgs),
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SourceArg {
    Bsc,
    Hyg,
}

impl From<SourceArg> for CatalogSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Bsc => CatalogSource::Bsc,
            SourceArg::Hyg => CatalogSource::Hyg,
        }
    }
}

#[derive(Parser)]
pub struct StarsArgs {
    /// Source catalog the CSV was exported from
    #[arg(long, value_enum)]
    pub source: SourceArg,

    /// CSV file to read
    #[arg(long)]
    pub input: PathBuf,

    /// Directory the packed files are written to
    #[arg(long)]
    pub out_dir: PathBuf,

    /// Drop stars fainter than this magnitude
    #[arg(long, default_value_t = DEFAULT_MAG_LIMIT, allow_hyphen_values = true)]
    pub mag_limit: f64,

    /// Store -1 instead of the constellation index in every record
    #[arg(long)]
    pub no_constellation_codes: bool,

    /// Boundary simplification tolerance, recorded in the metadata
    #[arg(long, default_value_t = DEFAULT_RDP_EPSILON)]
    pub rdp_epsilon: f64,

    /// Also write stars_v1.meta.json
    #[arg(long)]
    pub meta: bool,
}

#[derive(Parser)]
pub struct ConstArgs {
    /// IAU boundary file (ASCII, one vertex per line)
    #[arg(long)]
    pub input: PathBuf,

    /// Directory the packed file is written to
    #[arg(long)]
    pub out_dir: PathBuf,

    /// Simplification tolerance in degrees, 0 keeps every vertex
    #[arg(long, default_value_t = DEFAULT_RDP_EPSILON)]
    pub rdp_epsilon: f64,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Packed star or constellation file
    pub file: PathBuf,

    /// List every non-empty constellation of a boundary file
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser)]
pub struct QueryArgs {
    /// Directory holding stars_v1.bin and const_v1.bin
    #[arg(long)]
    pub catalog_dir: PathBuf,

    /// Right ascension in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub ra: f64,

    /// Declination in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub dec: f64,

    /// Search radius in degrees
    #[arg(long, default_value_t = 1.0)]
    pub radius: f64,

    /// Only stars at least this bright
    #[arg(long, allow_hyphen_values = true)]
    pub mag_limit: Option<f64>,

    /// Maximum number of stars printed
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Parser)]
pub struct SelfTestArgs {
    /// Directory holding stars_v1.bin and const_v1.bin
    #[arg(long)]
    pub catalog_dir: PathBuf,
}
