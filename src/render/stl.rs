use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{Renderer, needs_export};
use crate::error::RenderError;
use crate::scene::{PerspectiveCamera, Scene};

/// Exports every building mesh to a binary STL file
///
/// The camera is ignored; the file is rewritten only when the scene changes.
pub struct StlRenderer {
    path: PathBuf,
    exported: Option<u64>,
}

impl StlRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            exported: None,
        }
    }
}

impl Renderer for StlRenderer {
    fn render(&mut self, scene: &Scene, _camera: &PerspectiveCamera) -> Result<(), RenderError> {
        if !needs_export(&mut self.exported, scene) {
            return Ok(());
        }
        write_stl(&self.path, scene)
    }
}

/// Write the scene meshes in world coordinates as binary STL
pub fn write_stl(path: &Path, scene: &Scene) -> Result<(), RenderError> {
    let mesh: Vec<stl_io::Triangle> = scene
        .world_triangles()
        .map(|tri| stl_io::Triangle {
            normal: stl_io::Normal::new(tri.normal),
            vertices: tri.vertices.map(stl_io::Vertex::new),
        })
        .collect();

    let file = File::create(path).map_err(|e| RenderError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    stl_io::write_stl(&mut writer, mesh.iter()).map_err(|e| RenderError::io(path, e))?;
    writer.flush().map_err(|e| RenderError::io(path, e))?;

    tracing::debug!(path = %path.display(), triangles = mesh.len(), "Wrote STL");
    Ok(())
}

/// File size of a binary STL with the given number of triangles
pub fn estimate_stl_size(triangle_count: usize) -> usize {
    // 80 (header) + 4 (count) + triangles * (12 normal + 36 vertices + 2 attribute)
    80 + 4 + triangle_count * 50
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;
    use crate::scene::BuildingNode;
    use std::fs;
    use tempfile::tempdir;

    fn scene() -> Scene {
        let mut scene = Scene::default();
        scene.add(BuildingNode {
            label: "a".to_string(),
            depth: 1.0,
            position: [5.0, 0.0, 0.0],
            mesh: vec![
                Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
                Triangle::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
            ],
            edges: vec![],
        });
        scene
    }

    #[test]
    fn test_write_stl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.stl");

        write_stl(&path, &scene()).unwrap();

        let metadata = fs::metadata(&path).unwrap();
        assert_eq!(metadata.len(), estimate_stl_size(2) as u64);

        let mut file = File::open(&path).unwrap();
        let mesh = stl_io::read_stl(&mut file).unwrap();
        assert_eq!(mesh.faces.len(), 2);
        // Node position is applied
        assert!(mesh.vertices.iter().any(|v| v[0] == 6.0));
    }

    #[test]
    fn test_renderer_skips_unchanged_scene() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.stl");
        let scene = scene();
        let camera = PerspectiveCamera::default();

        let mut renderer = StlRenderer::new(&path);
        renderer.render(&scene, &camera).unwrap();
        fs::remove_file(&path).unwrap();

        renderer.render(&scene, &camera).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_estimate_size() {
        assert_eq!(estimate_stl_size(0), 84);
        assert_eq!(estimate_stl_size(1), 134);
    }
}
