use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

use super::PerspectiveCamera;

const EPS: f64 = 1e-6;

/// Orbit the camera around a target on a sphere
///
/// Input (drag, wheel, auto-rotation) accumulates as pending deltas which
/// are applied to the camera on the next [`OrbitControls::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: [f64; 3],
    pub min_distance: f64,
    pub max_distance: f64,
    /// Polar angle range in radians, measured from the up (+y) axis
    pub min_polar_angle: f64,
    pub max_polar_angle: f64,
    /// Azimuth change applied on every update, in radians
    pub auto_rotate_speed: Option<f64>,
    pending_theta: f64,
    pending_phi: f64,
    pending_scale: f64,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: [0.0, 0.0, 0.0],
            min_distance: 0.0,
            max_distance: f64::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            auto_rotate_speed: None,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new(target: [f64; 3]) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    pub fn with_auto_rotate(mut self, radians_per_update: f64) -> Self {
        self.auto_rotate_speed = Some(radians_per_update);
        self
    }

    /// Orbit horizontally; positive angles move the camera to the left
    pub fn rotate_left(&mut self, angle: f64) {
        self.pending_theta -= angle;
    }

    /// Orbit vertically; positive angles move the camera up
    pub fn rotate_up(&mut self, angle: f64) {
        self.pending_phi -= angle;
    }

    /// Move towards the target by `scale` (> 1 moves closer)
    pub fn dolly_in(&mut self, scale: f64) {
        if scale > 0.0 {
            self.pending_scale /= scale;
        }
    }

    pub fn dolly_out(&mut self, scale: f64) {
        if scale > 0.0 {
            self.pending_scale *= scale;
        }
    }

    /// Apply pending input to the camera
    ///
    /// Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        if let Some(speed) = self.auto_rotate_speed {
            self.rotate_left(speed);
        }

        let target = Point3::from(self.target);
        let offset = Point3::from(camera.position) - target;
        let mut radius = offset.norm();
        let (mut theta, mut phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };

        theta += self.pending_theta;
        phi += self.pending_phi;
        let min_phi = self.min_polar_angle.max(EPS);
        let max_phi = self.max_polar_angle.min(PI - EPS);
        phi = phi.clamp(min_phi, max_phi.max(min_phi));

        radius = (radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        let new_position = target
            + Vector3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );

        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_scale = 1.0;

        let moved = (new_position - Point3::from(camera.position)).norm() > EPS
            || (Point3::from(camera.target) - target).norm() > EPS;
        camera.position = [new_position.x, new_position.y, new_position.z];
        camera.target = self.target;
        moved
    }
}
