//! Map projection onto the fixed logical canvas.
//!
//! Longitude maps linearly onto x in [0, 1000]; latitude goes through a
//! Mercator transform onto y in [0, 500], with north at the top.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use geo_types::Coord;
use glam::DVec2;

use crate::data::Airport;
use crate::error::AtlasError;

/// Width of the logical canvas.
pub const CANVAS_WIDTH: f64 = 1000.0;
/// Height of the logical canvas.
pub const CANVAS_HEIGHT: f64 = 500.0;

/// Latitude at which the Mercator transform reaches the canvas edge.
///
/// Beyond it y leaves [0, 500] and diverges toward the pole.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Projects a geographic position to logical canvas units.
///
/// Rejects non-finite values, longitudes outside [-180, 180] and latitudes
/// beyond [`MAX_LATITUDE`].
pub fn project(longitude: f64, latitude: f64) -> Result<DVec2, AtlasError> {
    if !longitude.is_finite()
        || !latitude.is_finite()
        || longitude.abs() > 180.0
        || latitude.abs() > MAX_LATITUDE
    {
        return Err(AtlasError::InvalidCoordinate {
            longitude,
            latitude,
        });
    }

    Ok(DVec2::new(longitude_to_x(longitude), latitude_to_y(latitude)))
}

/// [`project`] for a `geo_types` coordinate (x = longitude, y = latitude).
pub fn project_coord(coord: Coord<f64>) -> Result<DVec2, AtlasError> {
    project(coord.x, coord.y)
}

/// Like [`project`], but clamps finite out-of-range input onto the canvas edge.
pub fn project_clamped(longitude: f64, latitude: f64) -> Result<DVec2, AtlasError> {
    if !longitude.is_finite() || !latitude.is_finite() {
        return Err(AtlasError::InvalidCoordinate {
            longitude,
            latitude,
        });
    }
    project(
        longitude.clamp(-180.0, 180.0),
        latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE),
    )
}

/// Inverse of [`project`]. Points outside the canvas extrapolate.
pub fn unproject(point: DVec2) -> Coord<f64> {
    let longitude = point.x * 360.0 / CANVAS_WIDTH - 180.0;
    let k = (CANVAS_HEIGHT / 2.0 - point.y) * 2.0 * PI / CANVAS_HEIGHT;
    let latitude = (2.0 * k.exp().atan() - FRAC_PI_2).to_degrees();
    Coord {
        x: longitude,
        y: latitude,
    }
}

fn longitude_to_x(longitude: f64) -> f64 {
    (longitude + 180.0) * (CANVAS_WIDTH / 360.0)
}

fn latitude_to_y(latitude: f64) -> f64 {
    let phi = latitude.to_radians();
    let y = CANVAS_HEIGHT / 2.0 - (CANVAS_HEIGHT / (2.0 * PI)) * (FRAC_PI_4 + phi / 2.0).tan().ln();
    // Rounding at MAX_LATITUDE can land a hair outside the canvas
    y.clamp(0.0, CANVAS_HEIGHT)
}

/// An airport together with its position on the logical canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedAirport {
    pub airport: Airport,
    pub position: DVec2,
}

/// Projected positions for every airport that could be projected.
#[derive(Debug, Clone, Default)]
pub struct ProjectedAirports {
    by_id: BTreeMap<String, ProjectedAirport>,
    /// Identifiers whose coordinates were rejected.
    rejected: Vec<String>,
}

impl ProjectedAirports {
    pub fn get(&self, id: &str) -> Option<&ProjectedAirport> {
        self.by_id.get(id)
    }

    pub fn position(&self, id: &str) -> Option<DVec2> {
        self.by_id.get(id).map(|p| p.position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectedAirport> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }
}

/// Projects a whole airport table. Airports with unusable coordinates are
/// skipped and logged.
pub fn project_airports(airports: &BTreeMap<String, Airport>) -> ProjectedAirports {
    let mut projected = ProjectedAirports::default();

    for (id, airport) in airports {
        match project_coord(airport.coord()) {
            Ok(position) => {
                projected.by_id.insert(
                    id.clone(),
                    ProjectedAirport {
                        airport: airport.clone(),
                        position,
                    },
                );
            }
            Err(e) => {
                log::warn!("Skipping airport {}: {}", id, e);
                projected.rejected.push(id.clone());
            }
        }
    }

    log::debug!(
        "Projected {} airports ({} rejected)",
        projected.len(),
        projected.rejected.len()
    );
    projected
}

/// Meridians and parallels every `step_deg` degrees, as canvas polylines.
pub fn graticule(step_deg: f64) -> Vec<Vec<DVec2>> {
    let mut lines = Vec::new();
    if !(step_deg.is_finite() && step_deg > 0.0) {
        return lines;
    }

    let mut lon = -180.0;
    while lon <= 180.0 {
        let mut meridian = Vec::new();
        let mut lat = -80.0;
        while lat <= 80.0 {
            if let Ok(p) = project(lon, lat) {
                meridian.push(p);
            }
            lat += 5.0;
        }
        lines.push(meridian);
        lon += step_deg;
    }

    let mut lat = -90.0 + step_deg;
    while lat < 90.0 {
        if let (Ok(west), Ok(east)) = (project(-180.0, lat), project(180.0, lat)) {
            lines.push(vec![west, east]);
        }
        lat += step_deg;
    }

    lines
}
