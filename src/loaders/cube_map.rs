use std::path::Path;

use image::RgbaImage;
use log::{debug, info};

use crate::error::AssetError;

/// Face file stems in GPU layer order: +X, -X, +Y, -Y, +Z, -Z
pub const FACE_NAMES: [&str; 6] = ["px", "nx", "py", "ny", "pz", "nz"];

/// Six decoded, equally sized square faces of a reflection environment
#[derive(Debug, Clone)]
pub struct EnvironmentMap {
    size: u32,
    faces: Vec<RgbaImage>,
}

impl EnvironmentMap {
    /// Load `px.png` .. `nz.png` from a directory
    ///
    /// Any missing, undecodable, non-square or mismatched face is an error;
    /// there is no partial cube map.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        info!("Loading environment map from {}", dir.display());
        let faces = FACE_NAMES
            .iter()
            .map(|face| {
                let path = dir.join(format!("{face}.png"));
                debug!("Reading cube face {}", path.display());
                image::open(&path)
                    .map(|img| img.to_rgba8())
                    .map_err(|source| AssetError::Decode {
                        face: *face,
                        path,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_faces(faces)
    }

    /// Validate already decoded faces (ordered like [`FACE_NAMES`])
    pub fn from_faces(faces: Vec<RgbaImage>) -> Result<Self, AssetError> {
        if faces.len() != FACE_NAMES.len() {
            return Err(AssetError::FaceCount(faces.len()));
        }

        let size = faces[0].width();
        for (face, img) in FACE_NAMES.iter().zip(&faces) {
            let (width, height) = img.dimensions();
            if width != height {
                return Err(AssetError::NotSquare {
                    face: *face,
                    width,
                    height,
                });
            }
            if width != size {
                return Err(AssetError::SizeMismatch {
                    face: *face,
                    expected: size,
                    actual: width,
                });
            }
        }

        Ok(Self { size, faces })
    }

    /// Edge length of each face in pixels
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn faces(&self) -> &[RgbaImage] {
        &self.faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn faces(size: u32) -> Vec<RgbaImage> {
        (0..6)
            .map(|i| RgbaImage::from_pixel(size, size, Rgba([i * 40, 0, 0, 255])))
            .collect()
    }

    #[test]
    fn test_accepts_six_square_faces() {
        let env = EnvironmentMap::from_faces(faces(8)).unwrap();
        assert_eq!(env.size(), 8);
        assert_eq!(env.faces().len(), 6);
        // Order is preserved
        assert_eq!(env.faces()[3].get_pixel(0, 0)[0], 120);
    }

    #[test]
    fn test_rejects_wrong_face_count() {
        let mut five = faces(8);
        five.pop();
        assert!(matches!(EnvironmentMap::from_faces(five), Err(AssetError::FaceCount(5))));
    }

    #[test]
    fn test_rejects_non_square_face() {
        let mut f = faces(8);
        f[2] = RgbaImage::new(8, 4);
        match EnvironmentMap::from_faces(f) {
            Err(AssetError::NotSquare { face, .. }) => assert_eq!(face, "py"),
            other => panic!("expected NotSquare, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_mismatched_sizes() {
        let mut f = faces(8);
        f[5] = RgbaImage::new(16, 16);
        match EnvironmentMap::from_faces(f) {
            Err(AssetError::SizeMismatch { face, expected, actual }) => {
                assert_eq!(face, "nz");
                assert_eq!(expected, 8);
                assert_eq!(actual, 16);
            }
            other => panic!("expected SizeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = std::env::temp_dir().join("shadow-showcase-no-such-env-map");
        match EnvironmentMap::load(&dir) {
            Err(AssetError::Decode { face, .. }) => assert_eq!(face, "px"),
            other => panic!("expected Decode error, got {:?}", other),
        }
    }
}
