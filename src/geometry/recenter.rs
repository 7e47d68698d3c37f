use serde::Deserialize;

use super::center::{Center, calculate_center, dataset_center};
use crate::domain::{Feature, Geometry, Position};
use crate::error::GeometryError;

/// Which center the whole scene is positioned around
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SceneOrigin {
    /// Center of the first feature with a usable footprint
    #[default]
    #[value(name = "first")]
    #[serde(alias = "first")]
    FirstFeature,
    /// Bounding-box center of the whole dataset
    #[value(name = "dataset")]
    #[serde(alias = "dataset")]
    DatasetCenter,
}

/// Resolve the scene origin for a dataset
///
/// Returns `None` for a dataset without any usable footprint, in which case
/// nothing is placed in the scene.
pub fn resolve_origin(features: &[Feature], origin: SceneOrigin) -> Option<Center> {
    match origin {
        SceneOrigin::FirstFeature => features
            .iter()
            .find_map(|feature| calculate_center(feature).ok()),
        SceneOrigin::DatasetCenter => dataset_center(features),
    }
}

/// Shift every vertex of a ring so that `center` becomes the local origin
pub fn recenter_ring(ring: &[Position], center: Center) -> Vec<[f64; 2]> {
    ring.iter()
        .map(|p| [p.x - center.center_x, p.y - center.center_y])
        .collect()
}

/// Translation placing a building relative to the scene origin
pub fn scene_offset(building: Center, origin: Center) -> [f64; 2] {
    [
        building.center_x - origin.center_x,
        building.center_y - origin.center_y,
    ]
}

/// A polygon expressed around its building's center
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPolygon {
    pub outer: Vec<[f64; 2]>,
    pub holes: Vec<Vec<[f64; 2]>>,
}

impl LocalPolygon {
    /// Apply `f` to every vertex of the outer ring and holes
    pub fn map_points(&self, f: impl Fn([f64; 2]) -> [f64; 2]) -> LocalPolygon {
        LocalPolygon {
            outer: self.outer.iter().map(|&p| f(p)).collect(),
            holes: self
                .holes
                .iter()
                .map(|hole| hole.iter().map(|&p| f(p)).collect())
                .collect(),
        }
    }
}

/// Everything the mesh stage needs to extrude and place one building
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBuilding {
    pub center: Center,
    pub polygons: Vec<LocalPolygon>,
    /// Extrusion depth
    pub depth: f64,
    /// Translation of the building relative to the scene origin
    pub offset: [f64; 2],
}

fn resolve_height(feature: &Feature, default_height: Option<f64>) -> Result<f64, GeometryError> {
    let height = feature
        .height()
        .or(default_height)
        .ok_or(GeometryError::MissingHeight)?;

    if !height.is_finite() || height < 0.0 {
        return Err(GeometryError::InvalidHeight(height));
    }
    Ok(height)
}

/// Re-center a feature around its own center and compute its placement
///
/// Every polygon of the feature is kept, each with its holes. Empty rings
/// are dropped; polygons without an outer ring are skipped.
pub fn normalize_feature(
    feature: &Feature,
    origin: Center,
    default_height: Option<f64>,
) -> Result<NormalizedBuilding, GeometryError> {
    let center = calculate_center(feature)?;
    let depth = resolve_height(feature, default_height)?;

    let polygons = match &feature.geometry {
        Some(geometry @ (Geometry::Polygon { .. } | Geometry::MultiPolygon { .. })) => geometry
            .polygons()
            .iter()
            .filter_map(|rings| {
                let (outer, holes) = rings.split_first()?;
                if outer.is_empty() {
                    return None;
                }
                Some(LocalPolygon {
                    outer: recenter_ring(outer, center),
                    holes: holes
                        .iter()
                        .filter(|hole| !hole.is_empty())
                        .map(|hole| recenter_ring(hole, center))
                        .collect(),
                })
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(NormalizedBuilding {
        center,
        polygons,
        depth,
        offset: scene_offset(center, origin),
    })
}
