use sky::{angular_separation_deg, Equatorial};
use starcat::Star;
use std::sync::Arc;

use crate::Atlas;

/// Magnitude limit used by the self-test star cases.
const SELF_TEST_MAG_LIMIT: f64 = 2.0;
const SELF_TEST_RADIUS_DEG: f64 = 1.0;

/// One star returned by [`Atlas::probe`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeHit {
    pub id: i32,
    /// Display label, see [`Star::label`].
    pub label: String,
    pub name: Option<Arc<str>>,
    pub designation: Option<String>,
    pub mag: f32,
    pub separation_deg: f64,
    pub constellation: Option<&'static str>,
}

/// Everything known about one direction on the sky.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    pub constellation: Option<String>,
    pub hits: Vec<ProbeHit>,
}

/// Result of one self-test check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfTestResult {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

struct StarCase {
    name: &'static str,
    center: Equatorial,
    expected_id: i32,
}

const STAR_CASES: [StarCase; 3] = [
    StarCase {
        name: "Sirius proximity",
        center: Equatorial {
            ra_deg: 101.3,
            dec_deg: -16.7,
        },
        expected_id: 32349,
    },
    StarCase {
        name: "Arcturus proximity",
        center: Equatorial {
            ra_deg: 213.9,
            dec_deg: 19.2,
        },
        expected_id: 69673,
    },
    StarCase {
        name: "Rigel proximity",
        center: Equatorial {
            ra_deg: 78.6,
            dec_deg: -8.2,
        },
        expected_id: 24436,
    },
];

/// A point well inside Orion.
const ORION_POINT: Equatorial = Equatorial {
    ra_deg: 90.0,
    dec_deg: 0.0,
};

impl Atlas {
    /// Nearest stars around `center` (at most `max_results`) plus the
    /// constellation containing it.
    pub fn probe(
        &self,
        center: Equatorial,
        radius_deg: f64,
        mag_limit: Option<f64>,
        max_results: usize,
    ) -> Probe {
        let hits = self
            .nearby(center, radius_deg, mag_limit)
            .into_iter()
            .take(max_results)
            .map(|star| hit(center, star))
            .collect();
        Probe {
            constellation: self.find_constellation(center).map(str::to_string),
            hits,
        }
    }

    /// Checks a few bright stars and one constellation against the loaded
    /// catalogs. Each case passes when the top hit has the expected id.
    pub fn self_test(&self) -> Vec<SelfTestResult> {
        let mut results: Vec<SelfTestResult> = STAR_CASES
            .iter()
            .map(|case| {
                let probe = self.probe(
                    case.center,
                    SELF_TEST_RADIUS_DEG,
                    Some(SELF_TEST_MAG_LIMIT),
                    1,
                );
                let top = probe.hits.first();
                SelfTestResult {
                    name: case.name,
                    passed: top.map(|h| h.id) == Some(case.expected_id),
                    detail: top.map_or_else(
                        || "no-match".to_string(),
                        |h| format!("hit={}, sep={:.2}°", h.id, h.separation_deg),
                    ),
                }
            })
            .collect();

        let found = self.find_constellation(ORION_POINT);
        results.push(SelfTestResult {
            name: "Constellation lookup",
            passed: found == Some("ORI"),
            detail: found.unwrap_or("none").to_string(),
        });
        results
    }
}

fn hit(center: Equatorial, star: Star) -> ProbeHit {
    let at = Equatorial::new(f64::from(star.ra_deg), f64::from(star.dec_deg));
    ProbeHit {
        id: star.id,
        label: star.label(),
        separation_deg: angular_separation_deg(center.normalized(), at),
        designation: designation_label(&star),
        name: star.name,
        mag: star.mag,
        constellation: star.constellation,
    }
}

/// `"Alp CMA"`, `"53 AQL"` or the bare part when no constellation is known.
fn designation_label(star: &Star) -> Option<String> {
    match (&star.bayer, &star.flamsteed, star.constellation) {
        (Some(b), _, Some(c)) => Some(format!("{b} {c}")),
        (Some(b), _, None) => Some(b.clone()),
        (None, Some(f), _) => Some(f.clone()),
        (None, None, _) => None,
    }
}
