use serde::Deserialize;

use super::Center;
use super::recenter::NormalizedBuilding;

/// Unit of the horizontal scene coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Local meters around the scene origin
    #[default]
    Meters,
    /// Raw longitude/latitude deltas
    Degrees,
}

/// Equirectangular scaling of degree deltas to local meters
///
/// Uses approximation suitable for city-scale scenes:
/// - x = dlon * cos(origin_lat) * 111320
/// - y = dlat * 111320
///
/// Deltas are small once buildings are re-centered, so applying the scale
/// after re-centering keeps magnitudes small.
#[derive(Debug, Clone)]
pub struct Projector {
    cos_lat: f64,
}

impl Projector {
    // Meters per degree at equator
    const METERS_PER_DEGREE: f64 = 111320.0;

    /// Create a projector for deltas around the given origin
    pub fn new(origin: Center) -> Self {
        Self {
            cos_lat: origin.center_y.to_radians().cos(),
        }
    }

    /// Scale a (dlon, dlat) delta to (dx, dy) meters
    pub fn project_delta(&self, [dx, dy]: [f64; 2]) -> [f64; 2] {
        [
            dx * self.cos_lat * Self::METERS_PER_DEGREE,
            dy * Self::METERS_PER_DEGREE,
        ]
    }

    /// Express a normalized building in meters
    pub fn project_building(&self, building: &NormalizedBuilding) -> NormalizedBuilding {
        NormalizedBuilding {
            center: building.center,
            polygons: building
                .polygons
                .iter()
                .map(|polygon| polygon.map_points(|p| self.project_delta(p)))
                .collect(),
            depth: building.depth,
            offset: self.project_delta(building.offset),
        }
    }
}
