//! Math utilities and types
//!
//! Fundamental math types for the scene graph, built on nalgebra.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion, UnitQuaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;

/// An affine transform: translation, rotation, and scale.
///
/// Every entity carries two of these, a local transform (relative to the
/// immediate parent) and a global transform (composed along the path from
/// the scene root). The mutation methods apply deltas; composition into a
/// matrix is always translation ∘ rotation ∘ scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Translation component
    pub translation: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only a translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Move the transform by a delta
    pub fn translate(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    /// Overwrite the translation component
    pub fn set_translation(&mut self, x: f32, y: f32, z: f32) {
        self.translation = Vec3::new(x, y, z);
    }

    /// Rotate by Euler angles in radians (pitch, yaw, roll)
    pub fn rotate(&mut self, euler: Vec3) {
        self.rotation = UnitQuaternion::from_euler_angles(euler.x, euler.y, euler.z) * self.rotation;
    }

    /// Rotate by Euler angles in degrees
    ///
    /// Converts to radians exactly once, then applies [`Transform::rotate`].
    pub fn rotate_degrees(&mut self, euler: Vec3) {
        self.rotate(euler * DEG_TO_RAD);
    }

    /// Multiply the scale by a non-uniform factor
    pub fn scale(&mut self, multiplier: Vec3) {
        self.scale = self.scale.component_mul(&multiplier);
    }

    /// Multiply the scale by a uniform factor
    pub fn scale_uniform(&mut self, scalar: f32) {
        self.scale(Vec3::new(scalar, scalar, scalar));
    }

    /// Convert to a transformation matrix (translation ∘ rotation ∘ scale)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.translation)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Compose this transform with a child transform
    ///
    /// The result maps the child's local space through this transform.
    pub fn compose(&self, child: &Transform) -> Transform {
        Transform {
            translation: self.translation + self.rotation * self.scale.component_mul(&child.translation),
            rotation: self.rotation * child.rotation,
            scale: self.scale.component_mul(&child.scale),
        }
    }

    /// Get the inverse transform
    pub fn inverse(&self) -> Transform {
        let inv_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
        let inv_rotation = self.rotation.inverse();
        let inv_translation = inv_rotation * (-self.translation).component_mul(&inv_scale);

        Transform {
            translation: inv_translation,
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }
}
