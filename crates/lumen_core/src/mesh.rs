//! Triangle mesh geometry for visibility tests.
//!
//! Lights hand the renderer a coarse triangle mesh once at scene-build time
//! so the visibility structure can include them. Meshes are never used for
//! sampling.

use lumen_math::{Aabb, Interval, Ray, Vec3};

/// Rays closer to parallel than this are treated as missing a triangle.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A mesh consisting of vertex positions and triangle indices.
///
/// Triangles are wound counter-clockwise: the geometric normal of
/// `[v0, v1, v2]` is `(v1 - v0) × (v2 - v0)`.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Axis-aligned bounding box
    pub bounds: Aabb,
}

impl TriangleMesh {
    /// Create a new mesh from positions and indices.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let bounds = Aabb::from_points(&positions);
        Self {
            positions,
            indices,
            bounds,
        }
    }

    /// Create a mesh from an ordered list of vertex triples.
    ///
    /// Vertices are not shared between triangles.
    pub fn from_triangles(triangles: &[[Vec3; 3]]) -> Self {
        let positions: Vec<Vec3> = triangles.iter().flatten().copied().collect();
        let indices = (0..positions.len() as u32).collect();
        Self::new(positions, indices)
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Extract triangle vertices as flat array of [Vec3; 3] triplets.
    ///
    /// Triangles referencing missing vertices are skipped with a warning.
    pub fn extract_triangle_vertices(&self) -> Vec<[Vec3; 3]> {
        let mut triangles = Vec::with_capacity(self.triangle_count());

        for chunk in self.indices.chunks_exact(3) {
            let i0 = chunk[0] as usize;
            let i1 = chunk[1] as usize;
            let i2 = chunk[2] as usize;

            match (
                self.positions.get(i0),
                self.positions.get(i1),
                self.positions.get(i2),
            ) {
                (Some(&v0), Some(&v1), Some(&v2)) => triangles.push([v0, v1, v2]),
                _ => log::warn!(
                    "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                    i0,
                    i1,
                    i2,
                    self.positions.len()
                ),
            }
        }

        triangles
    }

    /// Unit geometric normal of every triangle, following the winding order.
    pub fn face_normals(&self) -> Vec<Vec3> {
        self.extract_triangle_vertices()
            .iter()
            .map(|[v0, v1, v2]| (*v1 - *v0).cross(*v2 - *v0).normalize_or_zero())
            .collect()
    }

    /// Total area of all triangles.
    pub fn surface_area(&self) -> f32 {
        self.extract_triangle_vertices()
            .iter()
            .map(|[v0, v1, v2]| 0.5 * (*v1 - *v0).cross(*v2 - *v0).length())
            .sum()
    }

    /// Find the closest triangle hit along `ray` within `ray_t`.
    ///
    /// Uses the Möller-Trumbore algorithm and hits both faces. Returns the
    /// ray parameter of the hit.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        if !self.bounds.hit(ray, ray_t) {
            return None;
        }

        let mut closest: Option<f32> = None;
        let mut range = ray_t;

        for [v0, v1, v2] in self.extract_triangle_vertices() {
            if let Some(t) = intersect_triangle(ray, v0, v1, v2, range) {
                closest = Some(t);
                range = range.with_max(t);
            }
        }

        closest
    }

    /// Returns true if anything in the mesh lies along `ray` within `ray_t`.
    pub fn occludes(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.intersect(ray, ray_t).is_some()
    }
}

/// Möller-Trumbore ray-triangle intersection.
fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3, ray_t: Interval) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < PARALLEL_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    ray_t.contains(t).then_some(t)
}
