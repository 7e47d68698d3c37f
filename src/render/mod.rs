//! Renderer boundary
//!
//! A [`Renderer`] receives the whole scene and the camera once per frame.
//! The bundled renderers write files: STL and OBJ exports of the extruded
//! buildings, and SVG frames drawn through the camera.

pub mod obj;
pub mod stl;
pub mod svg;

use std::path::Path;

use crate::error::RenderError;
use crate::scene::{PerspectiveCamera, Scene};

pub use obj::ObjRenderer;
pub use stl::StlRenderer;
pub use svg::SvgRenderer;

pub trait Renderer {
    /// Draw the scene as seen from `camera`
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError>;

    /// Free resources held by the renderer; no frames follow
    fn release(&mut self) {}
}

/// Output viewport in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Pick a renderer from the output file extension
///
/// `sequence` makes frame renderers write one numbered file per frame.
pub fn renderer_for_path(
    path: &Path,
    viewport: Viewport,
    sequence: bool,
) -> Result<Box<dyn Renderer + Send>, RenderError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "stl" => Ok(Box::new(StlRenderer::new(path))),
        "obj" => Ok(Box::new(ObjRenderer::new(path))),
        "svg" => Ok(Box::new(SvgRenderer::new(path, viewport, sequence))),
        _ => Err(RenderError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Whether a static export must be rewritten for this scene revision
pub(crate) fn needs_export(last: &mut Option<u64>, scene: &Scene) -> bool {
    if *last == Some(scene.revision()) {
        return false;
    }
    *last = Some(scene.revision());
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_for_path() {
        let viewport = Viewport::default();
        assert!(renderer_for_path(Path::new("city.stl"), viewport, false).is_ok());
        assert!(renderer_for_path(Path::new("city.OBJ"), viewport, false).is_ok());
        assert!(renderer_for_path(Path::new("frames/city.svg"), viewport, true).is_ok());
        assert!(matches!(
            renderer_for_path(Path::new("city.png"), viewport, false),
            Err(RenderError::UnsupportedFormat(_))
        ));
        assert!(renderer_for_path(Path::new("city"), viewport, false).is_err());
    }

    #[test]
    fn test_needs_export_once_per_revision() {
        let mut scene = Scene::default();
        let mut last = None;

        assert!(needs_export(&mut last, &scene));
        assert!(!needs_export(&mut last, &scene));
        scene.reset(None);
        assert!(needs_export(&mut last, &scene));
    }
}
