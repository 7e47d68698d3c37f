//! Mesh validation and repair
//!
//! Building footprints from real datasets contain spikes, repeated vertices
//! and slivers. Triangles produced from them are checked here before they
//! reach a renderer.

use super::Triangle;
use super::builder::{calculate_normal, triangle_area};

/// A triangle is flat when the sine of every one of its angles is below this
///
/// Depends on shape only, so footprints in degrees and in meters are judged
/// alike.
const MIN_ANGLE_SINE: f32 = 1e-6;

/// What validation found in a mesh
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MeshReport {
    pub total: usize,
    /// Flat: collinear or repeated vertices
    pub degenerate: usize,
    /// NaN or infinite coordinates
    pub invalid_coords: usize,
    /// Normals that were not unit length
    pub bad_normals: usize,
}

impl MeshReport {
    pub fn has_issues(&self) -> bool {
        self.degenerate > 0 || self.invalid_coords > 0 || self.bad_normals > 0
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: &MeshReport) {
        self.total += other.total;
        self.degenerate += other.degenerate;
        self.invalid_coords += other.invalid_coords;
        self.bad_normals += other.bad_normals;
    }
}

fn has_invalid_coords(tri: &Triangle) -> bool {
    tri.vertices
        .iter()
        .flatten()
        .chain(tri.normal.iter())
        .any(|c| !c.is_finite())
}

fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    (0..3).map(|i| (b[i] - a[i]) * (b[i] - a[i])).sum::<f32>().sqrt()
}

fn is_degenerate(tri: &Triangle) -> bool {
    let [p, q, r] = tri.vertices;
    [(p, q, r), (q, r, p), (r, p, q)].into_iter().all(|(apex, b, c)| {
        let twice_area = 2.0 * triangle_area(&[apex, b, c]);
        twice_area <= MIN_ANGLE_SINE * distance(apex, b) * distance(apex, c)
    })
}

fn is_normal_valid(normal: &[f32; 3]) -> bool {
    let len_sq = normal.iter().map(|n| n * n).sum::<f32>();
    len_sq.is_finite() && (0.99..=1.01).contains(&len_sq)
}

/// Count problems in a mesh without modifying it
pub fn validate_mesh(triangles: &[Triangle]) -> MeshReport {
    let mut report = MeshReport {
        total: triangles.len(),
        ..Default::default()
    };

    for tri in triangles {
        if has_invalid_coords(tri) {
            report.invalid_coords += 1;
            continue;
        }
        if is_degenerate(tri) {
            report.degenerate += 1;
        }
        if !is_normal_valid(&tri.normal) {
            report.bad_normals += 1;
        }
    }

    report
}

/// Validate a mesh, recalculate normals and drop unusable triangles
pub fn validate_and_fix(triangles: Vec<Triangle>) -> (Vec<Triangle>, MeshReport) {
    let report = validate_mesh(&triangles);
    let cleaned = triangles
        .into_iter()
        .filter(|tri| !has_invalid_coords(tri) && !is_degenerate(tri))
        .map(|mut tri| {
            tri.normal = calculate_normal(&tri.vertices);
            tri
        })
        .collect();
    (cleaned, report)
}
