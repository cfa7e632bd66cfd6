//! Light rig: one ambient light and three shadow-casting lights, each with a
//! shadow-projection volume hand-fitted to the fixed scene.
//!
//! Volumes are validated when built. A light whose near plane is not strictly
//! in front of its far plane never reaches the renderer.

use glam::{Mat4, Vec3, Vec4Swizzles};
use log::debug;

use crate::error::ShadowConfigError;
use crate::math::hex_to_rgb;

pub const DEFAULT_SHADOW_MAP_SIZE: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    Ambient,
    Directional,
    Spot,
    Point,
}

impl LightKind {
    /// The shadow-casting kinds in rig order
    pub const SHADOW_CASTERS: [LightKind; 3] =
        [LightKind::Directional, LightKind::Spot, LightKind::Point];

    pub fn label(&self) -> &'static str {
        match self {
            LightKind::Ambient => "ambient",
            LightKind::Directional => "directional",
            LightKind::Spot => "spot",
            LightKind::Point => "point",
        }
    }
}

/// Shape of a shadow-projection volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadowProjection {
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
    },
    Perspective {
        fov_degrees: f32,
        aspect: f32,
    },
    /// Six 90 degree perspective faces around the light
    Cube,
}

/// Validated shadow camera: projection, clip planes and a fixed depth buffer size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowVolume {
    projection: ShadowProjection,
    near: f32,
    far: f32,
    map_size: u32,
}

impl ShadowVolume {
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
        map_size: u32,
    ) -> Result<Self, ShadowConfigError> {
        if !(left < right && bottom < top) {
            return Err(ShadowConfigError::EmptyBounds {
                left,
                right,
                bottom,
                top,
            });
        }
        Self::validated(
            ShadowProjection::Orthographic {
                left,
                right,
                bottom,
                top,
            },
            near,
            far,
            map_size,
        )
    }

    pub fn perspective(
        fov_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
        map_size: u32,
    ) -> Result<Self, ShadowConfigError> {
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(ShadowConfigError::FieldOfView(fov_degrees));
        }
        Self::validated(
            ShadowProjection::Perspective { fov_degrees, aspect },
            near,
            far,
            map_size,
        )
    }

    pub fn cube(near: f32, far: f32, map_size: u32) -> Result<Self, ShadowConfigError> {
        Self::validated(ShadowProjection::Cube, near, far, map_size)
    }

    fn validated(
        projection: ShadowProjection,
        near: f32,
        far: f32,
        map_size: u32,
    ) -> Result<Self, ShadowConfigError> {
        if map_size == 0 {
            return Err(ShadowConfigError::MapSize {
                width: map_size,
                height: map_size,
            });
        }
        // Written so that NaN planes are rejected too
        if !(near < far) {
            return Err(ShadowConfigError::NearNotBeforeFar { near, far });
        }
        if !matches!(projection, ShadowProjection::Orthographic { .. }) && !(near > 0.0) {
            return Err(ShadowConfigError::NonPositiveNear(near));
        }
        Ok(Self {
            projection,
            near,
            far,
            map_size,
        })
    }

    pub fn projection(&self) -> ShadowProjection {
        self.projection
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// Square shadow buffer edge, fixed for the life of the light
    pub fn map_size(&self) -> u32 {
        self.map_size
    }

    /// Number of depth renders this volume needs per frame
    pub fn view_count(&self) -> usize {
        match self.projection {
            ShadowProjection::Cube => 6,
            _ => 1,
        }
    }

    /// Depth range mapped to [0, 1]
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            ShadowProjection::Orthographic {
                left,
                right,
                bottom,
                top,
            } => Mat4::orthographic_rh(left, right, bottom, top, self.near, self.far),
            ShadowProjection::Perspective { fov_degrees, aspect } => {
                Mat4::perspective_rh(fov_degrees.to_radians(), aspect, self.near, self.far)
            }
            ShadowProjection::Cube => {
                Mat4::perspective_rh(90f32.to_radians(), 1.0, self.near, self.far)
            }
        }
    }
}

/// Slack for points that sit exactly on a shadow view boundary, such as cube face seams
pub const ENCLOSE_EPSILON: f32 = 1e-5;

/// Forward and up vectors of the six cube faces, in +X, -X, +Y, -Y, +Z, -Z order
pub const CUBE_FACES: [(Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Y),
    (Vec3::NEG_X, Vec3::NEG_Y),
    (Vec3::Y, Vec3::Z),
    (Vec3::NEG_Y, Vec3::NEG_Z),
    (Vec3::Z, Vec3::NEG_Y),
    (Vec3::NEG_Z, Vec3::NEG_Y),
];

/// Right-handed look-at that survives a view direction parallel to +Y
fn look_at(eye: Vec3, target: Vec3) -> Mat4 {
    let forward = (target - eye).normalize_or_zero();
    let up = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    Mat4::look_at_rh(eye, target, up)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    /// Linear RGB
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
    /// Cut-off distance for spot and point lights, 0 = unlimited
    pub range: f32,
    /// Spot cone half-angle in radians
    pub angle: f32,
    shadow: Option<ShadowVolume>,
}

impl Light {
    pub fn ambient(color: u32, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color: hex_to_rgb(color),
            intensity,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            range: 0.0,
            angle: 0.0,
            shadow: None,
        }
    }

    /// Parallel light shining from `position` toward the origin
    pub fn directional(color: u32, intensity: f32, position: Vec3) -> Self {
        Self {
            kind: LightKind::Directional,
            position,
            ..Self::ambient(color, intensity)
        }
    }

    pub fn spot(color: u32, intensity: f32, position: Vec3, range: f32, angle: f32) -> Self {
        Self {
            kind: LightKind::Spot,
            position,
            range,
            angle,
            ..Self::ambient(color, intensity)
        }
    }

    pub fn point(color: u32, intensity: f32, position: Vec3) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            ..Self::ambient(color, intensity)
        }
    }

    pub fn with_shadow(mut self, volume: ShadowVolume) -> Self {
        self.shadow = Some(volume);
        self
    }

    pub fn shadow(&self) -> Option<&ShadowVolume> {
        self.shadow.as_ref()
    }

    pub fn casts_shadow(&self) -> bool {
        self.shadow.is_some()
    }

    /// Unit vector the light travels along (directional and spot)
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// View-projection of each shadow view; empty for lights without shadows
    pub fn shadow_view_projections(&self) -> Vec<Mat4> {
        let Some(volume) = &self.shadow else {
            return Vec::new();
        };
        let projection = volume.projection_matrix();
        match volume.projection {
            ShadowProjection::Cube => CUBE_FACES
                .iter()
                .map(|(forward, up)| {
                    projection * Mat4::look_at_rh(self.position, self.position + *forward, *up)
                })
                .collect(),
            _ => vec![projection * look_at(self.position, self.target)],
        }
    }

    /// World-space corners of every shadow view frustum, near face first
    pub fn shadow_frustum_corners(&self) -> Vec<[Vec3; 8]> {
        self.shadow_view_projections()
            .iter()
            .map(|view_proj| {
                let inverse = view_proj.inverse();
                let mut corners = [Vec3::ZERO; 8];
                for (i, corner) in corners.iter_mut().enumerate() {
                    let ndc = glam::Vec4::new(
                        if i & 1 == 0 { -1.0 } else { 1.0 },
                        if i & 2 == 0 { -1.0 } else { 1.0 },
                        if i & 4 == 0 { 0.0 } else { 1.0 },
                        1.0,
                    );
                    let world = inverse * ndc;
                    *corner = world.xyz() / world.w;
                }
                corners
            })
            .collect()
    }

    /// True when every point falls inside at least one shadow view
    ///
    /// Points on a view's boundary count as inside, within [`ENCLOSE_EPSILON`]
    /// in normalized device coordinates.
    pub fn shadow_encloses(&self, points: &[Vec3]) -> bool {
        let views = self.shadow_view_projections();
        if views.is_empty() {
            return false;
        }
        points.iter().all(|p| {
            views.iter().any(|view_proj| {
                let clip = *view_proj * p.extend(1.0);
                if clip.w <= 0.0 {
                    return false;
                }
                let ndc = clip.xyz() / clip.w;
                let limit = 1.0 + ENCLOSE_EPSILON;
                ndc.x.abs() <= limit
                    && ndc.y.abs() <= limit
                    && (-ENCLOSE_EPSILON..=limit).contains(&ndc.z)
            })
        })
    }
}

/// Debug frustum visualisation for one shadow-casting light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowHelper {
    pub light: LightKind,
    pub visible: bool,
}

/// The scene's lights, built once at startup
#[derive(Debug, Clone)]
pub struct LightRig {
    ambient: Light,
    directional: Light,
    spot: Light,
    point: Light,
    helpers: [ShadowHelper; 3],
}

impl LightRig {
    /// Standard rig with every shadow buffer `map_size` pixels square
    pub fn new(map_size: u32) -> Result<Self, ShadowConfigError> {
        let ambient = Light::ambient(0xffffff, 0.3);

        let directional = Light::directional(0xffffff, 0.4, Vec3::new(2.0, 2.0, -1.0))
            .with_shadow(ShadowVolume::orthographic(-2.0, 2.0, -2.0, 2.0, 1.0, 6.0, map_size)?);

        let spot_angle = std::f32::consts::PI * 0.3;
        let spot = Light::spot(0xffffff, 0.4, Vec3::new(0.0, 2.0, 2.0), 10.0, spot_angle)
            .with_shadow(ShadowVolume::perspective(
                (spot_angle * 2.0).to_degrees(),
                1.0,
                1.0,
                6.0,
                map_size,
            )?);

        let point = Light::point(0xffffff, 0.3, Vec3::new(-1.0, 1.0, 0.0))
            .with_shadow(ShadowVolume::cube(0.1, 5.0, map_size)?);

        Ok(Self::from_lights(ambient, directional, spot, point))
    }

    /// Assemble a rig from lights whose volumes were already validated
    pub fn from_lights(ambient: Light, directional: Light, spot: Light, point: Light) -> Self {
        let rig = Self {
            ambient,
            directional,
            spot,
            point,
            helpers: LightKind::SHADOW_CASTERS.map(|light| ShadowHelper {
                light,
                visible: false,
            }),
        };
        for light in rig.shadow_casters() {
            if let Some(volume) = light.shadow() {
                debug!(
                    "{} light shadow: {:?}, near {}, far {}, {}px",
                    light.kind.label(),
                    volume.projection(),
                    volume.near(),
                    volume.far(),
                    volume.map_size()
                );
            }
        }
        rig
    }

    pub fn ambient(&self) -> &Light {
        &self.ambient
    }

    pub fn get(&self, kind: LightKind) -> &Light {
        match kind {
            LightKind::Ambient => &self.ambient,
            LightKind::Directional => &self.directional,
            LightKind::Spot => &self.spot,
            LightKind::Point => &self.point,
        }
    }

    pub fn lights(&self) -> [&Light; 4] {
        [&self.ambient, &self.directional, &self.spot, &self.point]
    }

    pub fn shadow_casters(&self) -> impl Iterator<Item = &Light> {
        [&self.directional, &self.spot, &self.point]
            .into_iter()
            .filter(|l| l.casts_shadow())
    }

    /// Total depth renders per frame across all lights
    pub fn shadow_view_count(&self) -> usize {
        self.shadow_casters()
            .filter_map(Light::shadow)
            .map(ShadowVolume::view_count)
            .sum()
    }

    pub fn helpers(&self) -> &[ShadowHelper] {
        &self.helpers
    }

    pub fn helper_visible(&self, light: LightKind) -> bool {
        self.helpers
            .iter()
            .any(|h| h.light == light && h.visible)
    }

    /// Toggle a debug frustum; has no effect on shading
    pub fn set_helper_visible(&mut self, light: LightKind, visible: bool) {
        for helper in self.helpers.iter_mut().filter(|h| h.light == light) {
            helper.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rig_volumes() {
        let rig = LightRig::new(DEFAULT_SHADOW_MAP_SIZE).unwrap();
        assert!(!rig.ambient().casts_shadow());
        assert_eq!(rig.shadow_casters().count(), 3);
        for light in rig.shadow_casters() {
            let volume = light.shadow().unwrap();
            assert!(volume.near() < volume.far());
            assert_eq!(volume.map_size(), 1024);
        }
        assert_eq!(rig.shadow_view_count(), 8);
    }

    #[test]
    fn test_near_not_before_far_rejected() {
        assert_eq!(
            ShadowVolume::orthographic(-2.0, 2.0, -2.0, 2.0, 6.0, 1.0, 1024),
            Err(ShadowConfigError::NearNotBeforeFar { near: 6.0, far: 1.0 })
        );
        assert!(ShadowVolume::perspective(60.0, 1.0, 3.0, 3.0, 1024).is_err());
        assert!(ShadowVolume::cube(f32::NAN, 5.0, 1024).is_err());
    }

    #[test]
    fn test_other_invalid_volumes_rejected() {
        assert!(matches!(
            ShadowVolume::cube(0.0, 5.0, 1024),
            Err(ShadowConfigError::NonPositiveNear(_))
        ));
        assert!(matches!(
            ShadowVolume::orthographic(2.0, -2.0, -2.0, 2.0, 1.0, 6.0, 1024),
            Err(ShadowConfigError::EmptyBounds { .. })
        ));
        assert!(matches!(
            ShadowVolume::perspective(180.0, 1.0, 1.0, 6.0, 1024),
            Err(ShadowConfigError::FieldOfView(_))
        ));
        assert!(matches!(
            ShadowVolume::cube(0.1, 5.0, 0),
            Err(ShadowConfigError::MapSize { .. })
        ));
        // Orthographic volumes may start behind the light
        assert!(ShadowVolume::orthographic(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0, 512).is_ok());
    }

    #[test]
    fn test_rig_rejects_bad_map_size() {
        assert!(LightRig::new(0).is_err());
    }

    #[test]
    fn test_spot_fov_is_twice_cone_angle() {
        let rig = LightRig::new(512).unwrap();
        match rig.get(LightKind::Spot).shadow().unwrap().projection() {
            ShadowProjection::Perspective { fov_degrees, aspect } => {
                assert!((fov_degrees - 108.0).abs() < 1e-3);
                assert_eq!(aspect, 1.0);
            }
            other => panic!("unexpected projection {:?}", other),
        }
    }

    #[test]
    fn test_point_light_has_six_views() {
        let rig = LightRig::new(512).unwrap();
        let point = rig.get(LightKind::Point);
        assert_eq!(point.shadow_view_projections().len(), 6);
        assert_eq!(point.shadow_frustum_corners().len(), 6);
    }

    #[test]
    fn test_frustum_corners_lie_on_clip_planes() {
        let rig = LightRig::new(512).unwrap();
        let light = rig.get(LightKind::Directional);
        let corners = light.shadow_frustum_corners()[0];
        let dir = light.direction();
        for (i, c) in corners.iter().enumerate() {
            let depth = (*c - light.position).dot(dir);
            let expected = if i < 4 { 1.0 } else { 6.0 };
            assert!((depth - expected).abs() < 1e-3, "corner {} depth {}", i, depth);
        }
    }

    #[test]
    fn test_straight_down_light_has_valid_view() {
        let light = Light::directional(0xffffff, 1.0, Vec3::new(0.0, 5.0, 0.0))
            .with_shadow(ShadowVolume::orthographic(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0, 256).unwrap());
        let view_proj = light.shadow_view_projections()[0];
        assert!(!view_proj.is_nan());
        assert!(light.shadow_encloses(&[Vec3::ZERO]));
    }

    #[test]
    fn test_encloses_rejects_points_outside() {
        let rig = LightRig::new(512).unwrap();
        let light = rig.get(LightKind::Directional);
        assert!(light.shadow_encloses(&[Vec3::ZERO]));
        assert!(!light.shadow_encloses(&[Vec3::new(50.0, 0.0, 0.0)]));
        assert!(!rig.ambient().shadow_encloses(&[Vec3::ZERO]));
    }

    #[test]
    fn test_helpers_default_hidden_and_toggle_independently() {
        let mut rig = LightRig::new(512).unwrap();
        assert!(rig.helpers().iter().all(|h| !h.visible));

        rig.set_helper_visible(LightKind::Spot, true);
        assert!(rig.helper_visible(LightKind::Spot));
        assert!(!rig.helper_visible(LightKind::Directional));
        assert!(!rig.helper_visible(LightKind::Point));

        rig.set_helper_visible(LightKind::Spot, false);
        assert!(!rig.helper_visible(LightKind::Spot));
    }
}
