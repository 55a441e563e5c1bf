//! Triangle geometry and the constructors used by dynamic scene objects

use crate::error::{Error, Result};
use crate::point::{Point3f, Vector3f};
use serde::{Deserialize, Serialize};

/// An indexed triangle geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
}

impl Geometry {
    /// Create an empty geometry
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: None,
        }
    }

    /// Create a geometry from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the geometry is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Append another geometry, rebasing its face indices
    pub fn append(&mut self, other: &Geometry) {
        let base = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.faces
            .extend(other.faces.iter().map(|f| [f[0] + base, f[1] + base, f[2] + base]));
        match (&mut self.normals, &other.normals) {
            (Some(ours), Some(theirs)) => ours.extend_from_slice(theirs),
            (Some(ours), None) => ours.extend(
                std::iter::repeat(Vector3f::new(0.0, 0.0, 1.0)).take(other.vertices.len()),
            ),
            _ => {}
        }
    }

    /// Tessellate an ellipsoid centered at the origin with the given radii.
    ///
    /// `stacks` latitude bands (>= 2) and `slices` longitude segments (>= 3).
    pub fn ellipsoid(radii: Vector3f, stacks: usize, slices: usize) -> Result<Self> {
        if stacks < 2 || slices < 3 {
            return Err(Error::InvalidGeometry(format!(
                "ellipsoid requires stacks >= 2 and slices >= 3, got {} and {}",
                stacks, slices
            )));
        }
        if radii.x <= 0.0 || radii.y <= 0.0 || radii.z <= 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "ellipsoid radii must be positive, got {:?}",
                radii
            )));
        }

        let mut vertices = Vec::with_capacity((stacks + 1) * (slices + 1));
        let mut normals = Vec::with_capacity((stacks + 1) * (slices + 1));
        for i in 0..=stacks {
            let phi = std::f32::consts::PI * i as f32 / stacks as f32;
            for j in 0..=slices {
                let theta = 2.0 * std::f32::consts::PI * j as f32 / slices as f32;
                let unit = Vector3f::new(
                    phi.sin() * theta.cos(),
                    phi.sin() * theta.sin(),
                    phi.cos(),
                );
                vertices.push(Point3f::new(
                    radii.x * unit.x,
                    radii.y * unit.y,
                    radii.z * unit.z,
                ));
                normals.push(unit);
            }
        }

        let ring = slices + 1;
        let mut faces = Vec::with_capacity(stacks * slices * 2);
        for i in 0..stacks {
            for j in 0..slices {
                let a = i * ring + j;
                let b = a + ring;
                faces.push([a, b, a + 1]);
                faces.push([a + 1, b, b + 1]);
            }
        }

        Ok(Self {
            vertices,
            faces,
            normals: Some(normals),
        })
    }

    /// Triangulate a simple polygon ring as a fan around its first vertex.
    ///
    /// The ring is expected to be planar and non-self-intersecting; this is
    /// not validated beyond the minimum vertex count.
    pub fn polygon(ring: &[Point3f]) -> Result<Self> {
        if ring.len() < 3 {
            return Err(Error::InvalidGeometry(format!(
                "polygon requires at least 3 vertices, got {}",
                ring.len()
            )));
        }

        let vertices = ring.to_vec();
        let faces = (1..ring.len() - 1).map(|i| [0, i, i + 1]).collect();
        let mut geometry = Self {
            vertices,
            faces,
            normals: None,
        };
        geometry.normals = Some(geometry.face_normal_per_vertex());
        Ok(geometry)
    }

    /// One shared normal per vertex, taken from the first non-degenerate face
    fn face_normal_per_vertex(&self) -> Vec<Vector3f> {
        let normal = self
            .faces
            .iter()
            .find_map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];
                let n = (v1 - v0).cross(&(v2 - v0));
                (n.norm() > 1e-10).then(|| n.normalize())
            })
            .unwrap_or_else(|| Vector3f::new(0.0, 0.0, 1.0));
        vec![normal; self.vertices.len()]
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}
