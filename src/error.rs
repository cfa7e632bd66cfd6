use std::path::PathBuf;

use thiserror::Error;

/// Failure to load the environment cube map
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read cube face {face} from {path}: {source}")]
    Decode {
        face: &'static str,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cube face {face} is {width}x{height}, faces must be square")]
    NotSquare {
        face: &'static str,
        width: u32,
        height: u32,
    },

    #[error("cube face {face} is {actual}px wide, expected {expected}px like +X")]
    SizeMismatch {
        face: &'static str,
        expected: u32,
        actual: u32,
    },

    #[error("cube map needs 6 faces, got {0}")]
    FaceCount(usize),
}

/// Invalid shadow-projection volume, rejected when the light is built
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShadowConfigError {
    #[error("shadow near plane {near} must be closer than far plane {far}")]
    NearNotBeforeFar { near: f32, far: f32 },

    #[error("perspective shadow near plane must be positive, got {0}")]
    NonPositiveNear(f32),

    #[error("orthographic shadow bounds are empty: x {left}..{right}, y {bottom}..{top}")]
    EmptyBounds {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
    },

    #[error("shadow field of view {0} degrees is outside (0, 180)")]
    FieldOfView(f32),

    #[error("shadow map size must be non-zero, got {width}x{height}")]
    MapSize { width: u32, height: u32 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("node {0} does not exist in this scene")]
    UnknownNode(usize),

    #[error("no renderable named {0:?} in the catalog")]
    UnknownRenderable(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The display declined a fullscreen change; never fatal
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FullscreenError {
    #[error("no monitor available for fullscreen")]
    NoMonitor,

    #[error("fullscreen request refused: {0}")]
    Refused(String),
}

/// Per-frame submission failure; the loop logs it and moves on to the next tick
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface unavailable: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("render target has zero area")]
    ZeroSized,
}

/// Anything that aborts session start
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Shadow(#[from] ShadowConfigError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to create window: {0}")]
    Window(String),

    #[error("failed to create render surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("display reported a zero-sized viewport ({width}x{height})")]
    ZeroViewport { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_error_message_names_planes() {
        let err = ShadowConfigError::NearNotBeforeFar { near: 6.0, far: 1.0 };
        let msg = err.to_string();
        assert!(msg.contains('6'));
        assert!(msg.contains('1'));
    }

    #[test]
    fn test_startup_error_wraps_shadow_error() {
        let err: StartupError = ShadowConfigError::NonPositiveNear(0.0).into();
        assert!(matches!(err, StartupError::Shadow(_)));
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_asset_error_mentions_face() {
        let err = AssetError::NotSquare {
            face: "ny",
            width: 64,
            height: 32,
        };
        assert!(err.to_string().contains("ny"));
    }
}
