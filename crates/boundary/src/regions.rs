use sky::{normalize_ra, Equatorial};

/// A named RA/Dec box. `ra_min > ra_max` wraps through 0/360.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub code: String,
    pub ra_min: f64,
    pub ra_max: f64,
    pub dec_min: f64,
    pub dec_max: f64,
}

impl Region {
    /// RA bounds are normalised into `[0, 360)`.
    pub fn new(code: impl Into<String>, ra_min: f64, ra_max: f64, dec_min: f64, dec_max: f64) -> Self {
        Self {
            code: code.into(),
            ra_min: normalize_ra(ra_min),
            ra_max: normalize_ra(ra_max),
            dec_min,
            dec_max,
        }
    }

    /// Inclusive test; `ra` must already be normalised.
    #[must_use]
    pub fn contains(&self, ra: f64, dec: f64) -> bool {
        let ra_ok = if self.ra_min <= self.ra_max {
            ra >= self.ra_min && ra <= self.ra_max
        } else {
            ra >= self.ra_min || ra <= self.ra_max
        };
        ra_ok && dec >= self.dec_min && dec <= self.dec_max
    }
}

/// Coarse constellation lookup over bounding boxes only.
///
/// Boxes of neighbouring constellations overlap, so the answer is the first
/// region in table order that contains the point.
#[derive(Debug, Clone, Default)]
pub struct RegionBoxes {
    regions: Vec<Region>,
}

impl RegionBoxes {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn find_by_eq(&self, eq: Equatorial) -> Option<&str> {
        let ra = normalize_ra(eq.ra_deg);
        self.regions
            .iter()
            .find(|r| r.contains(ra, eq.dec_deg))
            .map(|r| r.code.as_str())
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
