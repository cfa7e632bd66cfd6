use std::cell::RefCell;
use std::rc::Rc;

use crate::loaders::EnvironmentMap;

/// A material shared by several nodes; a write through one handle is seen by all of them
pub type SharedMaterial = Rc<RefCell<Material>>;

/// Numeric material parameters that can be bound to a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialParam {
    Metalness,
    Roughness,
}

impl MaterialParam {
    pub const ALL: [MaterialParam; 2] = [MaterialParam::Metalness, MaterialParam::Roughness];

    pub fn label(&self) -> &'static str {
        match self {
            MaterialParam::Metalness => "metalness",
            MaterialParam::Roughness => "roughness",
        }
    }
}

/// Metal/rough surface description
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    /// Linear RGB base colour
    pub color: [f32; 3],
    metalness: f32,
    roughness: f32,
    env_map: Option<Rc<EnvironmentMap>>,
}

impl Material {
    /// White dielectric, fully rough, no reflections
    pub fn standard(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: [1.0, 1.0, 1.0],
            metalness: 0.0,
            roughness: 1.0,
            env_map: None,
        }
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_metalness(mut self, value: f32) -> Self {
        self.set(MaterialParam::Metalness, value);
        self
    }

    pub fn with_roughness(mut self, value: f32) -> Self {
        self.set(MaterialParam::Roughness, value);
        self
    }

    pub fn with_env_map(mut self, env_map: Option<Rc<EnvironmentMap>>) -> Self {
        self.env_map = env_map;
        self
    }

    pub fn into_shared(self) -> SharedMaterial {
        Rc::new(RefCell::new(self))
    }

    pub fn metalness(&self) -> f32 {
        self.metalness
    }

    pub fn roughness(&self) -> f32 {
        self.roughness
    }

    pub fn env_map(&self) -> Option<&Rc<EnvironmentMap>> {
        self.env_map.as_ref()
    }

    pub fn get(&self, param: MaterialParam) -> f32 {
        match param {
            MaterialParam::Metalness => self.metalness,
            MaterialParam::Roughness => self.roughness,
        }
    }

    /// Store a parameter clamped to [0, 1]; NaN is treated as 0
    pub fn set(&mut self, param: MaterialParam, value: f32) {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        match param {
            MaterialParam::Metalness => self.metalness = value,
            MaterialParam::Roughness => self.roughness = value,
        }
    }
}
