use std::f32::consts::PI;

use glam::{Mat4, Vec3};

use crate::math::Transform;
use crate::types::CameraUniform;

pub const DEFAULT_FOV_DEGREES: f32 = 75.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 2000.0;
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 1.0, 5.0);
pub const DEFAULT_DAMPING_FACTOR: f32 = 0.05;

/// Keeps the polar angle off the poles so `look_at` never degenerates
const POLAR_EPSILON: f32 = 1e-6;
/// Wheel dolly step for one notch
const ZOOM_STEP: f32 = 0.95;

#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    aspect: f32,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: DEFAULT_POSITION,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_degrees: DEFAULT_FOV_DEGREES,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            aspect,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Match the projection to a viewport; zero-sized viewports are ignored
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect = width as f32 / height as f32;
        true
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Placement of the camera itself, the inverse of the view
    pub fn world_transform(&self) -> Transform {
        Transform::from_rigid(&self.view_matrix().inverse())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn to_uniform(&self, time: f32) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            position: self.position.to_array(),
            time,
        }
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Azimuth/polar/radius around a target, y up
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y
    phi: f32,
    /// Azimuth around +Y, measured from +Z
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self { radius, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let ring = self.phi.sin() * self.radius;
        Vec3::new(ring * self.theta.sin(), self.phi.cos() * self.radius, ring * self.theta.cos())
    }
}

/// Damped orbit camera control
///
/// Gestures accumulate into pending deltas. Every [`update`](Self::update)
/// applies `damping_factor` of the pending rotation and pan, then decays
/// them by `1 - damping_factor`, so the camera keeps gliding for a while
/// after the pointer stops.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_damping: true,
            damping_factor: DEFAULT_DAMPING_FACTOR,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }

    pub fn with_damping_factor(mut self, damping_factor: f32) -> Self {
        self.damping_factor = damping_factor.clamp(0.0, 1.0);
        self
    }

    /// Pointer drag with the primary button, in pixels
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: u32) {
        let height = viewport_height.max(1) as f32;
        self.delta_theta -= 2.0 * PI * dx / height * self.rotate_speed;
        self.delta_phi -= 2.0 * PI * dy / height * self.rotate_speed;
    }

    /// Pointer drag with the secondary button, in pixels
    pub fn pan(&mut self, dx: f32, dy: f32, camera: &PerspectiveCamera, viewport_height: u32) {
        let height = viewport_height.max(1) as f32;
        let distance = (camera.position - self.target).length();
        // World units covered by the viewport's half height at the target
        let half_extent = distance * (camera.fov_degrees.to_radians() / 2.0).tan();
        let right = camera.right();
        let up = right.cross(camera.forward());
        self.pan_offset +=
            -right * (2.0 * dx * half_extent / height) + up * (2.0 * dy * half_extent / height);
    }

    /// Wheel input; negative `delta_y` moves toward the target
    pub fn dolly(&mut self, delta_y: f32) {
        let step = ZOOM_STEP.powf(self.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= step;
        } else if delta_y > 0.0 {
            self.scale /= step;
        }
    }

    pub fn is_settled(&self) -> bool {
        const EPS: f32 = 1e-6;
        self.delta_theta.abs() < EPS
            && self.delta_phi.abs() < EPS
            && self.pan_offset.length_squared() < EPS * EPS
            && self.scale == 1.0
    }

    /// Move `camera` one step; returns whether it moved
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = (camera.position, camera.target);
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        let factor = if self.enable_damping { self.damping_factor } else { 1.0 };
        spherical.theta += self.delta_theta * factor;
        spherical.phi += self.delta_phi * factor;
        let min_polar = self.min_polar_angle.max(POLAR_EPSILON);
        let max_polar = self.max_polar_angle.min(PI - POLAR_EPSILON);
        spherical.phi = spherical.phi.clamp(min_polar, max_polar.max(min_polar));
        spherical.radius =
            (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * factor;

        camera.target = self.target;
        camera.position = self.target + spherical.to_offset();

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.delta_theta *= decay;
            self.delta_phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        (camera.position, camera.target) != before
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = PerspectiveCamera::new(800.0 / 600.0);
        assert_eq!(camera.fov_degrees, 75.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 2000.0);
        assert_eq!(camera.position, Vec3::new(0.0, 1.0, 5.0));
        assert!((camera.aspect() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_set_viewport_updates_aspect() {
        let mut camera = PerspectiveCamera::default();
        assert!(camera.set_viewport(1920, 1080));
        assert!((camera.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
        assert!(!camera.set_viewport(0, 1080));
        assert!((camera.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let mut camera = PerspectiveCamera::default();
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        let clip = camera.view_projection() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_spherical_round_trip() {
        let offset = Vec3::new(0.0, 1.0, 5.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!(back.abs_diff_eq(offset, 1e-5));
    }

    #[test]
    fn test_update_without_input_keeps_camera() {
        let mut camera = PerspectiveCamera::default();
        let mut controls = OrbitControls::default();
        let start = camera.position;
        assert!(controls.is_settled());
        controls.update(&mut camera);
        assert!(camera.position.abs_diff_eq(start, 1e-5));
    }

    #[test]
    fn test_rotation_is_damped() {
        let mut camera = PerspectiveCamera::default();
        let mut controls = OrbitControls::default();
        let radius = camera.position.length();

        controls.rotate(100.0, 0.0, 600);
        let pending = controls.delta_theta;
        controls.update(&mut camera);

        let theta = Spherical::from_offset(camera.position).theta;
        assert!((theta - pending * 0.05).abs() < 1e-5);
        assert!((controls.delta_theta - pending * 0.95).abs() < 1e-6);
        assert!((camera.position.length() - radius).abs() < 1e-4);

        // Keeps gliding after the gesture ends, then settles
        controls.update(&mut camera);
        assert!(Spherical::from_offset(camera.position).theta < theta);
        for _ in 0..2000 {
            controls.update(&mut camera);
        }
        assert!(controls.is_settled());
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let mut camera = PerspectiveCamera::default();
        let mut controls = OrbitControls::default();
        controls.enable_damping = false;
        controls.rotate(0.0, -10_000.0, 600);
        controls.update(&mut camera);
        let phi = Spherical::from_offset(camera.position).phi;
        assert!(phi <= PI && phi > PI - 1e-3);
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn test_dolly_respects_distance_limits() {
        let mut camera = PerspectiveCamera::default();
        let mut controls = OrbitControls::default();
        controls.min_distance = 4.0;
        for _ in 0..20 {
            controls.dolly(-1.0);
            controls.update(&mut camera);
        }
        assert!((camera.position.length() - 4.0).abs() < 1e-4);

        controls.max_distance = 6.0;
        for _ in 0..20 {
            controls.dolly(1.0);
            controls.update(&mut camera);
        }
        assert!((camera.position.length() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_pan_moves_target() {
        let mut camera = PerspectiveCamera::default();
        let mut controls = OrbitControls::default();
        controls.enable_damping = false;
        controls.pan(-50.0, 0.0, &camera, 600);
        controls.update(&mut camera);
        // Dragging left slides the view right
        assert!(controls.target.x > 0.0);
        assert_eq!(camera.target, controls.target);
    }
}
