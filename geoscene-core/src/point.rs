//! Point and vertex types

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use bytemuck::{Pod, Zeroable};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// A packed vertex as baked into a primitive's vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct ColoredVertex {
    pub position: Point3f,
    pub normal: Vector3f,
    pub color: [u8; 4],
}

unsafe impl Pod for ColoredVertex {}
unsafe impl Zeroable for ColoredVertex {}

impl Default for ColoredVertex {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            normal: Vector3f::new(0.0, 0.0, 1.0),
            color: [255, 255, 255, 255],
        }
    }
}
