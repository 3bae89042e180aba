//! Transform component and utilities for spatial positioning.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Rotation about +Y by an angle in degrees.
    pub fn yaw_degrees(angle: f32) -> Quat {
        Quat::from_axis_angle(Vec3::Y, angle.to_radians())
    }

    /// Builder-style scale override.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }
}

/// Raw transform data for GPU upload (instance data).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TransformRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&Transform> for TransformRaw {
    fn from(transform: &Transform) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
        }
    }
}

impl From<Transform> for TransformRaw {
    fn from(transform: Transform) -> Self {
        Self::from(&transform)
    }
}
