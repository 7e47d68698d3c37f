use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{Renderer, needs_export};
use crate::error::RenderError;
use crate::scene::{Color, PerspectiveCamera, Scene};

/// Exports the scene as Wavefront OBJ with a companion MTL file
///
/// Each building becomes an object whose faces use the `building` material
/// and whose outline is written as `l` line elements using `edges`.
pub struct ObjRenderer {
    path: PathBuf,
    exported: Option<u64>,
}

impl ObjRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            exported: None,
        }
    }
}

impl Renderer for ObjRenderer {
    fn render(&mut self, scene: &Scene, _camera: &PerspectiveCamera) -> Result<(), RenderError> {
        if !needs_export(&mut self.exported, scene) {
            return Ok(());
        }
        write_obj(&self.path, scene)
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, RenderError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| RenderError::io(path, e))
}

/// Write `path` and the `.mtl` next to it
pub fn write_obj(path: &Path, scene: &Scene) -> Result<(), RenderError> {
    let mtl_path = path.with_extension("mtl");
    write_mtl(&mtl_path, scene).map_err(|e| RenderError::io(&mtl_path, e))?;

    let mut out = create(path)?;
    write_obj_body(&mut out, scene, &mtl_path).map_err(|e| RenderError::io(path, e))?;

    tracing::debug!(path = %path.display(), nodes = scene.len(), "Wrote OBJ");
    Ok(())
}

fn write_mtl(path: &Path, scene: &Scene) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_material(&mut out, "building", scene.material.fill)?;
    write_material(&mut out, "edges", scene.material.edge)?;
    out.flush()
}

fn write_material(out: &mut impl Write, name: &str, color: Color) -> std::io::Result<()> {
    let [r, g, b] = color.to_unit();
    writeln!(out, "newmtl {}", name)?;
    writeln!(out, "Kd {:.4} {:.4} {:.4}", r, g, b)?;
    writeln!(out)
}

fn write_obj_body(out: &mut impl Write, scene: &Scene, mtl_path: &Path) -> std::io::Result<()> {
    writeln!(out, "# footprint3d")?;
    if let Some(name) = mtl_path.file_name() {
        writeln!(out, "mtllib {}", name.to_string_lossy())?;
    }

    // OBJ indices are 1-based and global to the file
    let mut next_index = 1usize;

    for node in scene.nodes() {
        writeln!(out, "o {}", sanitize(&node.label))?;

        let face_start = next_index;
        for tri in node.world_triangles() {
            for [x, y, z] in tri.vertices {
                writeln!(out, "v {} {} {}", x, y, z)?;
            }
            next_index += 3;
        }
        writeln!(out, "usemtl building")?;
        for first in (face_start..next_index).step_by(3) {
            writeln!(out, "f {} {} {}", first, first + 1, first + 2)?;
        }

        let edge_start = next_index;
        for edge in node.world_edges() {
            for [x, y, z] in [edge.start, edge.end] {
                writeln!(out, "v {} {} {}", x, y, z)?;
            }
            next_index += 2;
        }
        writeln!(out, "usemtl edges")?;
        for first in (edge_start..next_index).step_by(2) {
            writeln!(out, "l {} {}", first, first + 1)?;
        }
    }

    out.flush()
}

/// OBJ names end at whitespace
fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
