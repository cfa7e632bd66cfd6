mod aabb;
mod color;
mod transform;

pub use aabb::AABB;
pub use color::{hex_to_rgb, srgb_to_linear};
pub use transform::{euler_xyz, normal_matrix, Transform};
