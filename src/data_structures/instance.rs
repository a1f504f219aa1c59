//! Rigid pose applied to a model object by its animations.
//!
//! Animation transforms build an [`Instance`] each render call and hand the
//! resulting matrix to the host, which multiplies it onto its current state.

use std::ops::Mul;

use cgmath::{Deg, ElementWise, InnerSpace, Matrix4, One, Quaternion, Rotation3, Vector3};

/// Translation, rotation (as quaternion) and per-axis scale.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Instance {
    /// The identity pose (no move, rotate or scale).
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_rotation(axis: Vector3<f32>, angle: Deg<f32>) -> Self {
        let rotation = if axis.magnitude2() == 0.0 {
            Quaternion::one()
        } else {
            Quaternion::from_axis_angle(axis.normalize(), angle)
        };
        Self {
            rotation,
            ..Default::default()
        }
    }

    pub fn from_scale(scale: Vector3<f32>) -> Self {
        Self {
            scale,
            ..Default::default()
        }
    }

    /// Rotation about `center` instead of the origin.
    pub fn rotation_about(center: Vector3<f32>, axis: Vector3<f32>, angle: Deg<f32>) -> Self {
        Instance::from(center) * Instance::from_rotation(axis, angle) * Instance::from(-center)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::new()
    }

    /// Translation, then rotation, then scale, applied right to left.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        let Vector3 { x, y, z } = self.scale;
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(x, y, z)
    }
}

impl Mul<Instance> for Instance {
    type Output = Self;

    fn mul(self, rhs: Instance) -> Self::Output {
        &self * &rhs
    }
}

/// `a * b` applies `b` first, then `a`, like the matrices they produce.
impl Mul<&Instance> for &Instance {
    type Output = Instance;

    fn mul(self, rhs: &Instance) -> Self::Output {
        Instance {
            position: self.position + self.rotation * self.scale.mul_element_wise(rhs.position),
            rotation: self.rotation * rhs.rotation,
            scale: self.scale.mul_element_wise(rhs.scale),
        }
    }
}

impl From<Vector3<f32>> for Instance {
    fn from(position: Vector3<f32>) -> Self {
        Instance {
            position,
            ..Default::default()
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}
