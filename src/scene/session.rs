use super::build::{LoadSummary, SceneOptions, populate_scene};
use super::{Material, OrbitControls, PerspectiveCamera, Scene};
use crate::domain::Feature;
use crate::error::RenderError;
use crate::render::Renderer;

/// A visualization session
///
/// Owns the scene, the camera, the orbit controls and the renderer. The
/// session is built once; reloading data rebuilds the scene nodes in place
/// and [`Session::teardown`] releases the renderer.
pub struct Session {
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    renderer: Option<Box<dyn Renderer + Send>>,
    options: SceneOptions,
    frames: u64,
}

impl Session {
    pub fn new(
        renderer: Box<dyn Renderer + Send>,
        camera: PerspectiveCamera,
        controls: OrbitControls,
        options: SceneOptions,
        material: Material,
    ) -> Self {
        Self {
            scene: Scene::new(material),
            camera,
            controls,
            renderer: Some(renderer),
            options,
            frames: 0,
        }
    }

    /// Replace the displayed buildings with `features`
    pub fn load(&mut self, features: &[Feature]) -> LoadSummary {
        let summary = populate_scene(&mut self.scene, features, &self.options);
        tracing::info!(
            rendered = summary.rendered,
            skipped = summary.skipped.len(),
            triangles = self.scene.triangle_count(),
            "Scene updated"
        );
        summary
    }

    /// Apply orbit input and draw one frame
    pub fn render_frame(&mut self) -> Result<(), RenderError> {
        let renderer = self.renderer.as_mut().ok_or(RenderError::Closed)?;
        self.controls.update(&mut self.camera);
        renderer.render(&self.scene, &self.camera)?;
        self.frames += 1;
        Ok(())
    }

    /// Release the renderer and drop the scene content
    ///
    /// Calling it more than once is a no-op.
    pub fn teardown(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.release();
            self.scene.reset(None);
            tracing::debug!(frames = self.frames, "Session torn down");
        }
    }

    pub fn is_active(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}
