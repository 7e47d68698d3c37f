use nalgebra::{Point3, Vector3};

/// Perspective camera looking from `position` towards `target`
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov_deg: f64,
    /// Viewport width / height
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: [f64; 3],
    pub target: [f64; 3],
    pub up: [f64; 3],
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 100.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            fov_deg,
            aspect,
            near,
            far,
            ..Default::default()
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f64 / height as f64;
        }
    }

    /// Orthonormal (right, up, forward) basis of the view
    fn basis(&self) -> Option<(Vector3<f64>, Vector3<f64>, Vector3<f64>)> {
        let forward = (Point3::from(self.target) - Point3::from(self.position)).try_normalize(1e-12)?;
        let right = forward.cross(&Vector3::from(self.up)).try_normalize(1e-12)?;
        let up = right.cross(&forward);
        Some((right, up, forward))
    }

    /// Project a world point to normalized device coordinates
    ///
    /// Returns `[x, y, depth]` with x and y in -1..=1 inside the frustum and
    /// depth the view-space distance along the viewing axis. Points outside
    /// the near/far range yield `None`.
    pub fn project(&self, point: [f64; 3]) -> Option<[f64; 3]> {
        let (right, up, forward) = self.basis()?;
        let d = Point3::from(point) - Point3::from(self.position);

        let depth = d.dot(&forward);
        if depth < self.near || depth > self.far {
            return None;
        }

        let f = 1.0 / (self.fov_deg.to_radians() / 2.0).tan();
        Some([
            f / self.aspect * d.dot(&right) / depth,
            f * d.dot(&up) / depth,
            depth,
        ])
    }

    /// Project to pixel coordinates of a `width` x `height` viewport
    pub fn project_to_screen(&self, point: [f64; 3], width: f64, height: f64) -> Option<[f64; 3]> {
        let [x, y, depth] = self.project(point)?;
        Some([(x + 1.0) / 2.0 * width, (1.0 - y) / 2.0 * height, depth])
    }
}
