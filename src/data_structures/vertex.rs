//! Vertex layout shared with the host's geometry cache.

use cgmath::{EuclideanSpace, Point3};

/// A single model vertex as the host's parser emits it: position, texture
/// coordinates and normal, eight packed floats in total.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl ModelVertex {
    /// Number of `f32`s making up one vertex.
    pub const FLOATS: usize = 8;

    pub fn new(position: [f32; 3], tex_coords: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            tex_coords,
            normal,
        }
    }

    /// Reinterprets a flat float buffer as vertices without copying.
    ///
    /// Returns `None` if the buffer length is not a multiple of [`Self::FLOATS`].
    pub fn from_floats(floats: &[f32]) -> Option<&[ModelVertex]> {
        bytemuck::try_cast_slice(floats).ok()
    }

    pub fn as_floats(vertices: &[ModelVertex]) -> &[f32] {
        bytemuck::cast_slice(vertices)
    }

    pub fn point(&self) -> Point3<f32> {
        Point3::from(self.position)
    }
}

/// Average position of all vertices, the origin for an empty slice.
pub fn centroid(vertices: &[ModelVertex]) -> Point3<f32> {
    if vertices.is_empty() {
        return Point3::origin();
    }
    let sum = vertices
        .iter()
        .fold(Point3::origin().to_vec(), |acc, v| acc + v.point().to_vec());
    Point3::from_vec(sum / vertices.len() as f32)
}

/// Axis-aligned `(min, max)` corners, `None` for an empty slice.
pub fn bounds(vertices: &[ModelVertex]) -> Option<(Point3<f32>, Point3<f32>)> {
    let first = vertices.first()?.position;
    let (min, max) = vertices.iter().fold((first, first), |(mut min, mut max), v| {
        for axis in 0..3 {
            min[axis] = min[axis].min(v.position[axis]);
            max[axis] = max[axis].max(v.position[axis]);
        }
        (min, max)
    });
    Some((Point3::from(min), Point3::from(max)))
}

/// Copies triangles with reversed winding and flipped normals so the faces can
/// be seen from the other side.
pub fn reverse_winding(vertices: &[ModelVertex]) -> Vec<ModelVertex> {
    vertices
        .chunks(3)
        .flat_map(|triangle| triangle.iter().rev())
        .map(|v| ModelVertex {
            normal: [-v.normal[0], -v.normal[1], -v.normal[2]],
            ..*v
        })
        .collect()
}
