use thiserror::Error;

/// Brightest magnitude accepted (Sirius is -1.46).
pub const MAG_MIN: f64 = -2.0;

/// Faintest magnitude accepted.
pub const MAG_MAX: f64 = 15.0;

/// Why a source row was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is not finite: {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("dec out of range [-90, 90]: {0}")]
    DecOutOfRange(f64),

    #[error("magnitude out of range [-2, 15]: {0}")]
    MagOutOfRange(f64),
}

/// Checks a star's position and magnitude.
///
/// RA is not range-checked: any finite RA is accepted and normalised by the
/// caller, so `400` becomes `40`.
pub fn validate_star(ra_deg: f64, dec_deg: f64, mag: f64) -> Result<(), ValidationError> {
    for (field, value) in [("ra", ra_deg), ("dec", dec_deg), ("magnitude", mag)] {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field, value });
        }
    }
    if !(-90.0..=90.0).contains(&dec_deg) {
        return Err(ValidationError::DecOutOfRange(dec_deg));
    }
    if !(MAG_MIN..=MAG_MAX).contains(&mag) {
        return Err(ValidationError::MagOutOfRange(mag));
    }
    Ok(())
}
