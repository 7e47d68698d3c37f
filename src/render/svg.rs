use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Renderer, Viewport};
use crate::error::RenderError;
use crate::scene::{PerspectiveCamera, Scene};

/// Draws the scene through the camera into SVG files
///
/// Faces are painted back to front with back faces culled, then every
/// outline edge is drawn on top. With `sequence` each frame goes to its
/// own numbered file (`city_0001.svg`, `city_0002.svg`, ...).
pub struct SvgRenderer {
    path: PathBuf,
    viewport: Viewport,
    sequence: bool,
    frame: u64,
}

impl SvgRenderer {
    pub fn new(path: impl Into<PathBuf>, viewport: Viewport, sequence: bool) -> Self {
        Self {
            path: path.into(),
            viewport,
            sequence,
            frame: 0,
        }
    }

    /// File the given frame (1-based) is written to
    pub fn frame_path(&self, frame: u64) -> PathBuf {
        if !self.sequence {
            return self.path.clone();
        }
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "frame".to_string());
        self.path.with_file_name(format!("{}_{:04}.svg", stem, frame))
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        self.frame += 1;
        let path = self.frame_path(self.frame);
        let svg = draw(scene, camera, self.viewport);
        write_file(&path, &svg)?;
        tracing::trace!(path = %path.display(), frame = self.frame, "Wrote SVG frame");
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), RenderError> {
    fs::write(path, contents).map_err(|e| RenderError::io(path, e))
}

fn to_world(v: [f32; 3]) -> [f64; 3] {
    v.map(f64::from)
}

/// Render the scene to an SVG document
pub fn draw(scene: &Scene, camera: &PerspectiveCamera, viewport: Viewport) -> String {
    let (width, height) = (viewport.width as f64, viewport.height as f64);
    let material = scene.material;

    // Projected, front-facing triangles with their mean depth
    let mut faces: Vec<(f64, [[f64; 2]; 3])> = scene
        .world_triangles()
        .filter_map(|tri| {
            let mut points = [[0.0; 2]; 3];
            let mut depth = 0.0;
            for (slot, vertex) in points.iter_mut().zip(tri.vertices) {
                let [x, y, z] = camera.project_to_screen(to_world(vertex), width, height)?;
                *slot = [x, y];
                depth += z / 3.0;
            }
            let [a, b, c] = points;
            // Screen y points down, so front faces wind clockwise here
            let winding = (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]);
            (winding < 0.0).then_some((depth, points))
        })
        .collect();
    faces.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = viewport.width,
        h = viewport.height
    );
    let _ = writeln!(
        svg,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        material.background.to_hex()
    );

    let _ = writeln!(svg, r#"<g fill="{}" stroke="none">"#, material.fill.to_hex());
    for (_, [a, b, c]) in &faces {
        let _ = writeln!(
            svg,
            r#"<polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}"/>"#,
            a[0], a[1], b[0], b[1], c[0], c[1]
        );
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(
        svg,
        r#"<g stroke="{}" stroke-width="1" fill="none">"#,
        material.edge.to_hex()
    );
    for edge in scene.world_edges() {
        let start = camera.project_to_screen(to_world(edge.start), width, height);
        let end = camera.project_to_screen(to_world(edge.end), width, height);
        if let (Some(s), Some(e)) = (start, end) {
            let _ = writeln!(
                svg,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"/>"#,
                s[0], s[1], e[0], e[1]
            );
        }
    }
    let _ = writeln!(svg, "</g>");
    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{extract_edges, extrude_polygon};
    use crate::scene::BuildingNode;
    use tempfile::tempdir;

    fn box_scene() -> Scene {
        let square = vec![[-5.0, -5.0], [5.0, -5.0], [5.0, 5.0], [-5.0, 5.0]];
        let mut scene = Scene::default();
        scene.add(BuildingNode {
            label: "box".to_string(),
            depth: 10.0,
            position: [0.0, 0.0, 0.0],
            mesh: extrude_polygon(&square, &[], 0.0, 10.0),
            edges: extract_edges(&square, &[], 0.0, 10.0),
        });
        scene
    }

    #[test]
    fn test_draw_box_from_above() {
        let svg = draw(&box_scene(), &PerspectiveCamera::default(), Viewport::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r##"fill="#433f81""##));
        // Only the top cap faces a camera looking straight down the z axis
        assert_eq!(svg.matches("<polygon").count(), 2);
        // Vertical edges collapse to points but are still drawn
        assert_eq!(svg.matches("<line").count(), 12);
    }

    #[test]
    fn test_draw_skips_geometry_behind_camera() {
        let mut camera = PerspectiveCamera::default();
        camera.position = [0.0, 0.0, -100.0];
        camera.target = [0.0, 0.0, -200.0];

        let svg = draw(&box_scene(), &camera, Viewport::default());
        assert_eq!(svg.matches("<polygon").count(), 0);
        assert_eq!(svg.matches("<line").count(), 0);
    }

    #[test]
    fn test_sequence_writes_numbered_frames() {
        let dir = tempdir().unwrap();
        let mut renderer = SvgRenderer::new(dir.path().join("city.svg"), Viewport::default(), true);
        let scene = box_scene();
        let camera = PerspectiveCamera::default();

        renderer.render(&scene, &camera).unwrap();
        renderer.render(&scene, &camera).unwrap();

        assert!(dir.path().join("city_0001.svg").exists());
        assert!(dir.path().join("city_0002.svg").exists());
        assert!(!dir.path().join("city.svg").exists());
    }

    #[test]
    fn test_single_file_is_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("city.svg");
        let mut renderer = SvgRenderer::new(&path, Viewport::default(), false);

        renderer
            .render(&box_scene(), &PerspectiveCamera::default())
            .unwrap();
        renderer
            .render(&Scene::default(), &PerspectiveCamera::default())
            .unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert_eq!(svg.matches("<polygon").count(), 0);
    }
}
