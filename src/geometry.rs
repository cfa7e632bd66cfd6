use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::math::AABB;
use crate::types::Vertex;

/// Static shape descriptor; tessellated once when the renderer first draws it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// UV sphere centred on the origin
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Single quad in the XY plane facing +Z
    Plane { width: f32, height: f32 },
    /// Ring around the Z axis
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
}

/// Indexed triangle list, counter-clockwise front faces
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Geometry {
    pub const fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments,
            height_segments,
        }
    }

    pub const fn plane(width: f32, height: f32) -> Self {
        Self::Plane { width, height }
    }

    pub const fn torus(
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    ) -> Self {
        Self::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Plane { .. } => "plane",
            Self::Torus { .. } => "torus",
        }
    }

    /// Bounds in the geometry's own space
    pub fn local_bounds(&self) -> AABB {
        match *self {
            Self::Sphere { radius, .. } => AABB::new(Vec3::splat(-radius), Vec3::splat(radius)),
            Self::Plane { width, height } => {
                let half = Vec3::new(width * 0.5, height * 0.5, 0.0);
                AABB::new(-half, half)
            }
            Self::Torus { radius, tube, .. } => {
                let outer = radius + tube;
                let half = Vec3::new(outer, outer, tube);
                AABB::new(-half, half)
            }
        }
    }

    pub fn tessellate(&self) -> MeshData {
        match *self {
            Self::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere_mesh(radius, width_segments.max(3), height_segments.max(2)),
            Self::Plane { width, height } => plane_mesh(width, height),
            Self::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => torus_mesh(radius, tube, radial_segments.max(3), tubular_segments.max(3)),
        }
    }
}

fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let row = width_segments + 1;
    let mut mesh = MeshData::default();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let p = Vec3::new(
                -radius * (u * TAU).cos() * (v * PI).sin(),
                radius * (v * PI).cos(),
                radius * (u * TAU).sin() * (v * PI).sin(),
            );
            let n = p.normalize_or_zero();
            mesh.vertices.push(Vertex::new(p.to_array(), n.to_array()));
        }
    }

    // Poles get one triangle per quad instead of two
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

fn plane_mesh(width: f32, height: f32) -> MeshData {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let normal = [0.0, 0.0, 1.0];
    MeshData {
        vertices: vec![
            Vertex::new([-hw, hh, 0.0], normal),
            Vertex::new([hw, hh, 0.0], normal),
            Vertex::new([-hw, -hh, 0.0], normal),
            Vertex::new([hw, -hh, 0.0], normal),
        ],
        indices: vec![0, 2, 1, 2, 3, 1],
    }
}

fn torus_mesh(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let row = tubular_segments + 1;
    let mut mesh = MeshData::default();

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let n = (p - center).normalize_or_zero();
            mesh.vertices.push(Vertex::new(p.to_array(), n.to_array()));
        }
    }

    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(mesh: &MeshData, tri: usize) -> Vec3 {
        let p = |i: usize| {
            Vec3::from_array(mesh.vertices[mesh.indices[tri * 3 + i] as usize].position)
        };
        (p(1) - p(0)).cross(p(2) - p(0))
    }

    #[test]
    fn test_sphere_counts() {
        let mesh = Geometry::sphere(0.5, 16, 16).tessellate();
        assert_eq!(mesh.vertices.len(), 17 * 17);
        // Two triangles per quad, minus one per quad on each polar row
        assert_eq!(mesh.triangle_count(), 16 * 16 * 2 - 16 * 2);
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let mesh = Geometry::sphere(0.5, 16, 16).tessellate();
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - 0.5).abs() < 1e-5);
            assert!((Vec3::from_array(v.normal) - p / 0.5).length() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_faces_point_outward() {
        let mesh = Geometry::sphere(1.0, 8, 6).tessellate();
        for tri in 0..mesh.triangle_count() {
            let centroid = (0..3)
                .map(|i| {
                    Vec3::from_array(mesh.vertices[mesh.indices[tri * 3 + i] as usize].position)
                })
                .sum::<Vec3>();
            assert!(face_normal(&mesh, tri).dot(centroid) > 0.0, "triangle {} faces inward", tri);
        }
    }

    #[test]
    fn test_plane_faces_positive_z() {
        let mesh = Geometry::plane(5.0, 5.0).tessellate();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        for tri in 0..2 {
            assert!(face_normal(&mesh, tri).z > 0.0);
        }
    }

    #[test]
    fn test_torus_counts() {
        let mesh = Geometry::torus(0.3, 0.2, 16, 32).tessellate();
        assert_eq!(mesh.vertices.len(), 17 * 33);
        assert_eq!(mesh.triangle_count(), 16 * 32 * 2);
        let max_index = *mesh.indices.iter().max().unwrap() as usize;
        assert!(max_index < mesh.vertices.len());
    }

    #[test]
    fn test_torus_vertices_within_bounds() {
        let geometry = Geometry::torus(0.3, 0.2, 16, 32);
        let bounds = geometry.local_bounds();
        for v in geometry.tessellate().vertices {
            assert!(bounds.contains_point(Vec3::from_array(v.position), 1e-5));
        }
    }

    #[test]
    fn test_degenerate_segment_counts_are_raised() {
        let mesh = Geometry::sphere(1.0, 0, 0).tessellate();
        assert_eq!(mesh.vertices.len(), 4 * 3);
    }
}
