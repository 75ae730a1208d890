//! # Sky - equatorial coordinate primitives
//!
//! Shared building blocks for the star and constellation catalogs:
//!
//! - [`Equatorial`] positions (right ascension / declination in degrees),
//! - right-ascension normalisation into `[0, 360)`,
//! - great-circle separation via the spherical law of cosines,
//! - the canonical table of the 88 IAU constellation codes.
//!
//! Everything here is pure and allocation-free.

/// Number of IAU constellations.
pub const CONSTELLATION_COUNT: usize = 88;

/// The 88 IAU constellation abbreviations in canonical (alphabetical) order.
///
/// A star record stores its constellation as an index into this table, and the
/// constellation boundary directory is written in this order.
pub const IAU_CODES: [&str; CONSTELLATION_COUNT] = [
    "AND", "ANT", "APS", "AQL", "AQR", "ARA", "ARI", "AUR", "BOO",
    "CAE", "CAM", "CAP", "CAR", "CAS", "CEN", "CEP", "CET",
    "CHA", "CIR", "CMA", "CMI", "CNC", "COL", "COM", "CRA",
    "CRB", "CRT", "CRU", "CRV", "CVN", "CYG", "DEL", "DOR",
    "DRA", "EQU", "ERI", "FOR", "GEM", "GRU", "HER", "HOR",
    "HYA", "HYI", "IND", "LAC", "LEO", "LEP", "LIB", "LMI",
    "LUP", "LYN", "LYR", "MEN", "MIC", "MON", "MUS", "NOR",
    "OCT", "OPH", "ORI", "PAV", "PEG", "PER", "PHE", "PIC",
    "PSA", "PSC", "PUP", "PYX", "RET", "SCL", "SCO", "SCT",
    "SER", "SEX", "SGE", "SGR", "TAU", "TEL", "TRA", "TRI",
    "TUC", "UMA", "UMI", "VEL", "VIR", "VOL", "VUL",
];

/// Returns the table index of an IAU code (case-insensitive, surrounding
/// whitespace ignored), or `None` if the code is unknown.
#[must_use]
pub fn constellation_index(code: &str) -> Option<usize> {
    let code = code.trim();
    IAU_CODES.iter().position(|c| c.eq_ignore_ascii_case(code))
}

/// Returns the IAU code stored at `index`, or `None` for negative or
/// out-of-range indices (the on-disk "unknown" markers).
#[must_use]
pub fn constellation_code(index: i32) -> Option<&'static str> {
    usize::try_from(index).ok().and_then(|i| IAU_CODES.get(i).copied())
}

/// Wraps a right ascension into `[0, 360)`.
///
/// `rem_euclid` can round tiny negative inputs up to exactly `360.0`, which is
/// folded back to `0.0`.
#[must_use]
pub fn normalize_ra(ra_deg: f64) -> f64 {
    let ra = ra_deg.rem_euclid(360.0);
    if ra >= 360.0 {
        0.0
    } else {
        ra
    }
}

/// A position on the celestial sphere in equatorial coordinates (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    /// Right ascension in degrees.
    pub ra_deg: f64,
    /// Declination in degrees.
    pub dec_deg: f64,
}

impl Equatorial {
    pub fn new(ra_deg: f64, dec_deg: f64) -> Self {
        Self { ra_deg, dec_deg }
    }

    /// Returns a copy with RA wrapped into `[0, 360)` and Dec clamped to
    /// `[-90, 90]`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            ra_deg: normalize_ra(self.ra_deg),
            dec_deg: self.dec_deg.clamp(-90.0, 90.0),
        }
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.ra_deg.is_finite() && self.dec_deg.is_finite()
    }

    /// Great-circle distance to `other`, in degrees.
    #[must_use]
    pub fn separation_deg(&self, other: &Equatorial) -> f64 {
        angular_separation_deg(*self, *other)
    }
}

/// Great-circle distance between two positions, in degrees.
///
/// Uses the spherical law of cosines. The cosine is clamped to `[-1, 1]`
/// before `acos` so rounding never produces NaN for coincident or antipodal
/// points.
#[must_use]
pub fn angular_separation_deg(a: Equatorial, b: Equatorial) -> f64 {
    let a_dec = a.dec_deg.to_radians();
    let b_dec = b.dec_deg.to_radians();
    separation_from_parts(
        a.ra_deg.to_radians(),
        a_dec.sin(),
        a_dec.cos(),
        b.ra_deg.to_radians(),
        b_dec.sin(),
        b_dec.cos(),
    )
}

/// Law-of-cosines separation from precomputed terms (RA in radians plus
/// sine/cosine of each declination). Returns degrees.
///
/// Hot loops precompute the per-star terms once and call this directly; the
/// result is bit-identical to [`angular_separation_deg`] for the same inputs.
#[inline]
#[must_use]
pub fn separation_from_parts(
    a_ra_rad: f64,
    a_sin_dec: f64,
    a_cos_dec: f64,
    b_ra_rad: f64,
    b_sin_dec: f64,
    b_cos_dec: f64,
) -> f64 {
    let cosine = a_sin_dec * b_sin_dec + a_cos_dec * b_cos_dec * (a_ra_rad - b_ra_rad).cos();
    cosine.clamp(-1.0, 1.0).acos().to_degrees()
}
