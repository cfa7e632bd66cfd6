use glam::{Mat3, Mat4, Vec3};

/// Local transform of a scene node
///
/// Rotation is stored as Euler angles in radians and applied X first, then Y,
/// then Z (`R = Rx * Ry * Rz`), so animating one axis never disturbs another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Position and orientation of a rigid `world` matrix; scale stays one
    pub fn from_rigid(world: &Mat4) -> Self {
        Self {
            position: world.w_axis.truncate(),
            rotation: euler_xyz(&Mat3::from_mat4(*world)),
            scale: Vec3::ONE,
        }
    }

    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
    }

    /// `T * R * S`
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * self.rotation_matrix()
            * Mat4::from_scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Euler angles of a pure rotation, in the same `Rx * Ry * Rz` order as [`Transform`]
pub fn euler_xyz(rotation: &Mat3) -> Vec3 {
    let m13 = rotation.z_axis.x.clamp(-1.0, 1.0);
    let y = m13.asin();
    if m13.abs() < 0.999_999_9 {
        let x = (-rotation.z_axis.y).atan2(rotation.z_axis.z);
        let z = (-rotation.y_axis.x).atan2(rotation.x_axis.x);
        Vec3::new(x, y, z)
    } else {
        // Gimbal lock: fold all of the remaining turn into X
        let x = rotation.y_axis.z.atan2(rotation.y_axis.y);
        Vec3::new(x, y, 0.0)
    }
}

/// Inverse-transpose of the upper 3x3, padded back to a 4x4 for uniform upload
pub fn normal_matrix(model: &Mat4) -> Mat4 {
    let m = Mat3::from_mat4(*model);
    let det = m.determinant();
    if det.abs() <= f32::EPSILON {
        return Mat4::IDENTITY;
    }
    Mat4::from_mat3(m.inverse().transpose())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Transform::IDENTITY.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_translation_applies_after_rotation() {
        let t = Transform::from_position(Vec3::new(1.0, 0.0, 0.0))
            .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        // +X rotated a quarter turn about Y points to -Z, then shifted by +X
        let p = t.matrix().transform_point3(Vec3::X);
        assert!(approx(p, Vec3::new(1.0, 0.0, -1.0)));
    }

    #[test]
    fn test_plane_laid_flat() {
        // A +Z facing plane rotated -90 degrees about X faces +Y
        let t = Transform::IDENTITY.with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0));
        let n = t.matrix().transform_vector3(Vec3::Z);
        assert!(approx(n, Vec3::Y));
    }

    #[test]
    fn test_euler_order_is_xyz() {
        let r = Vec3::new(0.3, 0.7, -0.2);
        let t = Transform::IDENTITY.with_rotation(r);
        let expected =
            Mat4::from_rotation_x(r.x) * Mat4::from_rotation_y(r.y) * Mat4::from_rotation_z(r.z);
        assert!(t.matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_euler_xyz_recovers_angles() {
        let r = Vec3::new(0.3, 0.7, -0.2);
        let m =
            Mat3::from_rotation_x(r.x) * Mat3::from_rotation_y(r.y) * Mat3::from_rotation_z(r.z);
        assert!(approx(euler_xyz(&m), r));
    }

    #[test]
    fn test_from_rigid_rebuilds_matrix() {
        let world = Mat4::look_at_rh(Vec3::new(-4.0, 1.0, -2.0), Vec3::ZERO, Vec3::Y).inverse();
        let t = Transform::from_rigid(&world);
        assert!(approx(t.position, Vec3::new(-4.0, 1.0, -2.0)));
        assert!(t.matrix().abs_diff_eq(world, 1e-5));
    }

    #[test]
    fn test_normal_matrix_undoes_non_uniform_scale() {
        let mut t = Transform::IDENTITY;
        t.scale = Vec3::new(2.0, 1.0, 1.0);
        let n = normal_matrix(&t.matrix()).transform_vector3(Vec3::X);
        assert!(approx(n, Vec3::new(0.5, 0.0, 0.0)));
    }
}
