pub mod cube_map;

pub use cube_map::{EnvironmentMap, FACE_NAMES};
