use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};
use sky::normalize_ra;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::row::{normalize_headers, CsvRow};
use crate::source::{CatalogSource, StarInput};
use crate::validate::validate_star;
use crate::IngestError;

/// Outcome of reading one source file.
#[derive(Debug, Clone, Default)]
pub struct StarReadReport {
    /// Accepted rows, in file order.
    pub stars: Vec<StarInput>,
    /// Data rows seen (header excluded, blank lines ignored).
    pub total_rows: usize,
    /// Rows rejected by validation (logged at `warn`).
    pub skipped_invalid: usize,
    /// Rows fainter than the magnitude limit.
    pub skipped_faint: usize,
    /// Rows missing magnitude, RA or Dec.
    pub skipped_incomplete: usize,
}

/// Reads a BSC or HYG CSV export from `reader`.
///
/// Rows with `mag > mag_limit` are dropped silently; rows that fail
/// [`validate_star`] are dropped with a warning. RA is normalised into
/// `[0, 360)`.
///
/// # Errors
///
/// Only I/O and CSV framing errors are returned; bad rows never abort the
/// read.
pub fn read_stars<R: Read>(
    source: CatalogSource,
    reader: R,
    mag_limit: f64,
) -> Result<StarReadReport, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = normalize_headers(rdr.headers()?);

    let mut report = StarReadReport::default();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        report.total_rows += 1;
        let row = CsvRow::new(&headers, &record);

        let Some(fields) = extract(source, &row) else {
            debug!("[{source}] row {}: missing magnitude or position", i + 1);
            report.skipped_incomplete += 1;
            continue;
        };
        if fields.mag > mag_limit {
            report.skipped_faint += 1;
            continue;
        }
        if let Err(e) = validate_star(fields.ra, fields.dec, fields.mag) {
            warn!("[{source}] skipping row {}: {e}", i + 1);
            report.skipped_invalid += 1;
            continue;
        }

        report.stars.push(StarInput {
            source,
            ra_deg: normalize_ra(fields.ra),
            dec_deg: fields.dec,
            mag: fields.mag,
            hip: fields.hip,
            name: fields.name,
            bayer: row.string(&["Bayer", "bayer"]),
            flamsteed: row.string(&["Flamsteed", "flamsteed"]),
            constellation: row.string(&["Con", "con", "Constellation"]),
        });
    }

    if report.skipped_invalid > 0 {
        info!(
            "[{source}] skipped {} / {} rows due to validation failures",
            report.skipped_invalid, report.total_rows
        );
    }
    Ok(report)
}

/// File-based form of [`read_stars`].
pub fn read_stars_path<P: AsRef<Path>>(
    source: CatalogSource,
    path: P,
    mag_limit: f64,
) -> Result<StarReadReport, IngestError> {
    let file = File::open(path.as_ref())?;
    read_stars(source, BufReader::new(file), mag_limit)
}

struct RowFields {
    mag: f64,
    ra: f64,
    dec: f64,
    hip: i32,
    name: Option<String>,
}

fn extract(source: CatalogSource, row: &CsvRow<'_>) -> Option<RowFields> {
    match source {
        CatalogSource::Bsc => Some(RowFields {
            mag: row.double(&["Vmag", "vmag", "Vmag (Johnson)"])?,
            ra: bsc_ra(row)?,
            dec: bsc_dec(row)?,
            hip: row.int(&["HIP", "hip"]).unwrap_or(-1),
            name: row.string(&["Name", "proper", "ProperName"]),
        }),
        CatalogSource::Hyg => Some(RowFields {
            mag: row.double(&["mag", "vmag"])?,
            ra: row
                .double(&["ra_deg"])
                .or_else(|| row.double(&["ra"]).map(|h| h * 15.0))?,
            dec: row.double(&["dec_deg"]).or_else(|| row.double(&["dec"]))?,
            hip: row.int(&["hip"]).unwrap_or(-1),
            name: row.string(&["proper", "Name"]),
        }),
    }
}

/// Decimal degrees, then sexagesimal hours, then a generic `RA` column
/// (treated as degrees above 24, hours otherwise).
fn bsc_ra(row: &CsvRow<'_>) -> Option<f64> {
    if let Some(deg) = row.double(&["RAdeg", "RA (deg)", "RA_deg", "ra_deg"]) {
        return Some(deg);
    }
    if let Some(h) = row.double(&["RAh", "RA (hours)", "RAhour", "rah"]) {
        let m = row.double(&["RAm", "RAmin", "ram"]).unwrap_or(0.0);
        let s = row.double(&["RAs", "RAsec", "ras"]).unwrap_or(0.0);
        return Some((h + m / 60.0 + s / 3600.0) * 15.0);
    }
    let generic = row.double(&["RA", "ra"])?;
    Some(if generic > 24.0 { generic } else { generic * 15.0 })
}

/// Decimal degrees, then signed sexagesimal degrees, then a generic `Dec`.
fn bsc_dec(row: &CsvRow<'_>) -> Option<f64> {
    if let Some(deg) = row.double(&["DEdeg", "DE (deg)", "DE_deg", "dec", "decdeg", "Dec (deg)"]) {
        return Some(deg);
    }
    if let Some(d) = row.double(&["DEd", "ded"]) {
        let sign = match row.value(&["DE-", "DecSign"]) {
            Some("-") | Some("-1") => -1.0,
            _ => 1.0,
        };
        let m = row.double(&["DEm", "dem"]).unwrap_or(0.0);
        let s = row.double(&["DEs", "des"]).unwrap_or(0.0);
        let abs = d.abs() + m / 60.0 + s / 3600.0;
        return Some(if d < 0.0 { -abs } else { sign * abs });
    }
    row.double(&["Dec", "DEC", "decl"])
}
