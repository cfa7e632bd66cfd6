pub mod animation;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod geometry;
pub mod lights;
pub mod loaders;
pub mod material;
pub mod math;
pub mod panel;
pub mod registry;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod session;
pub mod traits;
pub mod types;
pub mod viewport;
pub mod window;

pub use scenes::{create_showcase_scene, Showcase};
pub use session::Session;
