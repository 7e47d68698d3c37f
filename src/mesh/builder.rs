/// A mesh triangle with its facet normal
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Three vertices: [[x, y, z], [x, y, z], [x, y, z]]
    pub vertices: [[f32; 3]; 3],
    /// Normal vector [nx, ny, nz]
    pub normal: [f32; 3],
}

impl Triangle {
    /// Create a new triangle and calculate its normal
    pub fn new(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> Self {
        let vertices = [v0, v1, v2];
        Self {
            normal: calculate_normal(&vertices),
            vertices,
        }
    }

    /// Copy of this triangle moved by `offset`
    pub fn translated(&self, offset: [f32; 3]) -> Self {
        Self {
            vertices: self.vertices.map(|v| add(v, offset)),
            normal: self.normal,
        }
    }
}

/// A line segment drawn over a building outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: [f32; 3],
    pub end: [f32; 3],
}

impl Edge {
    pub fn new(start: [f32; 3], end: [f32; 3]) -> Self {
        Self { start, end }
    }

    pub fn translated(&self, offset: [f32; 3]) -> Self {
        Self {
            start: add(self.start, offset),
            end: add(self.end, offset),
        }
    }
}

fn add(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Unit normal of a triangle using the cross product
///
/// Degenerate triangles get an up-pointing normal.
pub fn calculate_normal(vertices: &[[f32; 3]; 3]) -> [f32; 3] {
    let [nx, ny, nz] = cross(vertices);

    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len > 0.0 && len.is_finite() {
        [nx / len, ny / len, nz / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

/// Area of a triangle from its vertices
pub fn triangle_area(vertices: &[[f32; 3]; 3]) -> f32 {
    let [cx, cy, cz] = cross(vertices);
    0.5 * (cx * cx + cy * cy + cz * cz).sqrt()
}

fn cross(vertices: &[[f32; 3]; 3]) -> [f32; 3] {
    let [v0, v1, v2] = vertices;
    let u = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let v = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

/// Accumulator for building triangle meshes
#[derive(Debug, Default)]
pub struct MeshBuilder {
    triangles: Vec<Triangle>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triangle from three vertices
    pub fn add_triangle(&mut self, v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) {
        self.triangles.push(Triangle::new(v0, v1, v2));
    }

    /// Add a quad (two triangles) from four vertices
    /// Vertices should be in counter-clockwise order when viewed from outside
    pub fn add_quad(&mut self, v0: [f32; 3], v1: [f32; 3], v2: [f32; 3], v3: [f32; 3]) {
        self.add_triangle(v0, v1, v2);
        self.add_triangle(v0, v2, v3);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Consume the builder and return the triangles
    pub fn finish(self) -> Vec<Triangle> {
        self.triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_normal() {
        // A triangle in the XY plane should have a Z-pointing normal
        let tri = Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);

        assert!((tri.normal[0]).abs() < 0.001);
        assert!((tri.normal[1]).abs() < 0.001);
        assert!((tri.normal[2] - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_degenerate_normal_points_up() {
        let tri = Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert_eq!(tri.normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_translated() {
        let tri = Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let moved = tri.translated([10.0, -2.0, 0.5]);
        assert_eq!(moved.vertices[1], [11.0, -2.0, 0.5]);
        assert_eq!(moved.normal, tri.normal);

        let edge = Edge::new([0.0, 0.0, 0.0], [0.0, 0.0, 3.0]).translated([1.0, 1.0, 1.0]);
        assert_eq!(edge.end, [1.0, 1.0, 4.0]);
    }

    #[test]
    fn test_triangle_area() {
        let vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert!((triangle_area(&vertices) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_mesh_builder() {
        let mut builder = MeshBuilder::new();
        builder.add_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        builder.add_quad(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        );

        assert_eq!(builder.len(), 3); // 1 triangle + 2 from quad
        assert!(!builder.is_empty());
    }
}
