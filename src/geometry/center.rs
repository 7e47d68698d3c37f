use super::Bounds;
use crate::domain::{Feature, Geometry, Position};
use crate::error::GeometryError;

/// Bounding-box center of a building footprint
///
/// This is the midpoint of the axis-aligned extents, not the area centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Center {
    pub center_x: f64,
    pub center_y: f64,
}

impl Center {
    pub fn new(center_x: f64, center_y: f64) -> Self {
        Self { center_x, center_y }
    }

    fn of_bounds(bounds: &Bounds) -> Self {
        let (center_x, center_y) = bounds.center();
        Self { center_x, center_y }
    }
}

/// Outer rings of every polygon of the feature
fn outer_ring_positions(feature: &Feature) -> Result<impl Iterator<Item = &Position>, GeometryError> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or(GeometryError::MissingGeometry)?;

    if matches!(geometry, Geometry::Unsupported) {
        return Err(GeometryError::UnsupportedGeometry);
    }

    Ok(geometry
        .polygons()
        .iter()
        .filter_map(|polygon| polygon.first())
        .flatten())
}

/// Bounding box over the outer ring of every polygon of a feature
pub fn feature_bounds(feature: &Feature) -> Result<Bounds, GeometryError> {
    Bounds::from_positions(outer_ring_positions(feature)?).ok_or(GeometryError::EmptyGeometry)
}

/// Calculate the bounding-box center of a building
///
/// Every position of the outer ring of every polygon takes part in the
/// min/max scan; holes lie inside their outer ring and cannot widen the box.
pub fn calculate_center(feature: &Feature) -> Result<Center, GeometryError> {
    feature_bounds(feature).map(|bounds| Center::of_bounds(&bounds))
}

/// Bounding-box center of a whole dataset, skipping features without a
/// usable footprint
pub fn dataset_center(features: &[Feature]) -> Option<Center> {
    features
        .iter()
        .filter_map(|feature| feature_bounds(feature).ok())
        .reduce(|acc, bounds| acc.union(&bounds))
        .map(|bounds| Center::of_bounds(&bounds))
}
