use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use glam::Vec3;

use crate::error::SceneError;
use crate::geometry::Geometry;
use crate::loaders::EnvironmentMap;
use crate::material::{Material, SharedMaterial};
use crate::math::{hex_to_rgb, Transform, AABB};

pub const SPHERE: &str = "sphere";
pub const PLANE: &str = "plane";
pub const TORUS: &str = "torus";

/// A shape + material pair with its placement in the scene
#[derive(Debug, Clone)]
pub struct Renderable {
    pub name: &'static str,
    pub geometry: Geometry,
    pub material: SharedMaterial,
    pub transform: Transform,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    /// Spun by the frame loop
    pub animated: bool,
}

impl Renderable {
    pub fn world_bounds(&self) -> AABB {
        self.geometry.local_bounds().transformed(&self.transform.matrix())
    }
}

/// Fixed catalog of the scene's renderables, built once at startup
///
/// The sphere and the torus share one material instance; the ground plane
/// has its own.
#[derive(Debug)]
pub struct Catalog {
    shared_material: SharedMaterial,
    entries: Vec<Renderable>,
}

impl Catalog {
    pub fn new(env_map: Option<Rc<EnvironmentMap>>) -> Self {
        let shared_material = Material::standard("standard")
            .with_metalness(0.7)
            .with_roughness(0.2)
            .with_env_map(env_map)
            .into_shared();

        let ground = Material::standard("ground")
            .with_color(hex_to_rgb(0x888888))
            .into_shared();

        let entries = vec![
            Renderable {
                name: SPHERE,
                geometry: Geometry::sphere(0.5, 16, 16),
                material: Rc::clone(&shared_material),
                transform: Transform::from_position(Vec3::new(-1.5, 0.0, 0.0)),
                cast_shadow: true,
                receive_shadow: false,
                animated: true,
            },
            Renderable {
                name: PLANE,
                geometry: Geometry::plane(5.0, 5.0),
                material: ground,
                transform: Transform::from_position(Vec3::new(0.0, -0.5, 0.0))
                    .with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
                cast_shadow: false,
                receive_shadow: true,
                animated: true,
            },
            Renderable {
                name: TORUS,
                geometry: Geometry::torus(0.3, 0.2, 16, 32),
                material: Rc::clone(&shared_material),
                transform: Transform::from_position(Vec3::new(1.5, 0.0, 0.0)),
                cast_shadow: true,
                receive_shadow: false,
                animated: true,
            },
        ];

        Self {
            shared_material,
            entries,
        }
    }

    pub fn entries(&self) -> &[Renderable] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Result<&Renderable, SceneError> {
        self.entries
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| SceneError::UnknownRenderable(name.to_string()))
    }

    /// The material bound to the parameter panel
    pub fn shared_material(&self) -> SharedMaterial {
        Rc::clone(&self.shared_material)
    }

    /// Union of every renderable's bounds at its base placement
    pub fn bounds(&self) -> AABB {
        self.entries
            .iter()
            .map(Renderable::world_bounds)
            .reduce(|a, b| a.union(&b))
            .unwrap_or(AABB::new(Vec3::ZERO, Vec3::ZERO))
    }
}
