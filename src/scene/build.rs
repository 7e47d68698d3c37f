use super::{BuildingNode, Scene};
use crate::domain::Feature;
use crate::error::GeometryError;
use crate::geometry::{
    Center, NormalizedBuilding, Projector, SceneOrigin, Units, normalize_feature, resolve_origin,
    simplify_polygon,
};
use crate::mesh::{MeshReport, extract_edges, extrude_polygon, prepare_ring, validate_and_fix};

/// How features are turned into scene nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneOptions {
    pub origin: SceneOrigin,
    pub units: Units,
    /// Extrusion depth for features without a height property
    pub default_height: Option<f64>,
    /// Douglas-Peucker tolerance in scene units
    pub simplify: Option<f64>,
}

/// Outcome of filling a scene from a dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSummary {
    pub rendered: usize,
    pub skipped: Vec<(String, GeometryError)>,
    pub mesh: MeshReport,
}

/// Extrude a normalized building into a node
///
/// Returns `None` when no polygon survives ring preparation.
pub fn build_node(
    label: String,
    building: &NormalizedBuilding,
    simplify: Option<f64>,
) -> Option<(BuildingNode, MeshReport)> {
    let depth = building.depth as f32;
    let mut triangles = Vec::new();
    let mut edges = Vec::new();

    for polygon in &building.polygons {
        let polygon = match simplify {
            Some(epsilon) => simplify_polygon(polygon, epsilon),
            None => polygon.clone(),
        };

        let Some(outer) = prepare_ring(&polygon.outer, true) else {
            continue;
        };
        let holes: Vec<Vec<[f32; 2]>> = polygon
            .holes
            .iter()
            .filter_map(|hole| prepare_ring(hole, false))
            .collect();

        triangles.extend(extrude_polygon(&outer, &holes, 0.0, depth));
        edges.extend(extract_edges(&outer, &holes, 0.0, depth));
    }

    if triangles.is_empty() {
        return None;
    }

    let (mesh, report) = validate_and_fix(triangles);
    let node = BuildingNode {
        label,
        depth: building.depth,
        position: [building.offset[0], building.offset[1], 0.0],
        mesh,
        edges,
    };
    Some((node, report))
}

/// Replace the scene content with the given features
///
/// Features that cannot be placed are skipped and reported; an empty
/// dataset leaves an empty scene without an origin.
pub fn populate_scene(scene: &mut Scene, features: &[Feature], options: &SceneOptions) -> LoadSummary {
    let origin = resolve_origin(features, options.origin);
    scene.reset(origin);

    let mut summary = LoadSummary::default();
    let Some(origin) = origin else {
        if !features.is_empty() {
            tracing::warn!(count = features.len(), "No feature has a usable footprint");
        }
        summary.skipped = features
            .iter()
            .enumerate()
            .map(|(i, f)| (f.label(i), skip_reason(f, options)))
            .collect();
        return summary;
    };

    let projector = match options.units {
        Units::Meters => Some(Projector::new(origin)),
        Units::Degrees => None,
    };

    for (index, feature) in features.iter().enumerate() {
        let label = feature.label(index);

        let building = match normalize_feature(feature, origin, options.default_height) {
            Ok(building) => building,
            Err(err) => {
                tracing::warn!(feature = %label, error = %err, "Skipping building");
                summary.skipped.push((label, err));
                continue;
            }
        };
        let building = match &projector {
            Some(projector) => projector.project_building(&building),
            None => building,
        };

        match build_node(label.clone(), &building, options.simplify) {
            Some((node, report)) => {
                tracing::trace!(
                    feature = %label,
                    triangles = node.mesh.len(),
                    x = node.position[0],
                    y = node.position[1],
                    "Placed building"
                );
                summary.mesh.merge(&report);
                scene.add(node);
                summary.rendered += 1;
            }
            None => {
                tracing::warn!(feature = %label, "Skipping building with degenerate footprint");
                summary.skipped.push((label, GeometryError::EmptyGeometry));
            }
        }
    }

    if summary.mesh.has_issues() {
        tracing::debug!(
            degenerate = summary.mesh.degenerate,
            invalid_coords = summary.mesh.invalid_coords,
            bad_normals = summary.mesh.bad_normals,
            "Repaired building meshes"
        );
    }

    summary
}

fn skip_reason(feature: &Feature, options: &SceneOptions) -> GeometryError {
    // Without an origin every feature failed to produce a center
    normalize_feature(feature, Center::new(0.0, 0.0), options.default_height)
        .err()
        .unwrap_or(GeometryError::EmptyGeometry)
}
