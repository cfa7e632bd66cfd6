mod showcase;

pub use showcase::{create_showcase_scene, Showcase};
