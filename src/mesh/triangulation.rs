use earcutr::earcut;

/// Triangulate a polygon with holes
///
/// Returns vertex indices into `outer` followed by every hole, three per
/// triangle. An empty result means earcut could not triangulate the input.
pub fn triangulate_polygon(outer: &[[f32; 2]], holes: &[Vec<[f32; 2]>]) -> Vec<usize> {
    if outer.len() < 3 {
        return Vec::new();
    }

    let mut vertices: Vec<f64> =
        Vec::with_capacity((outer.len() + holes.iter().map(|h| h.len()).sum::<usize>()) * 2);
    let mut hole_indices: Vec<usize> = Vec::with_capacity(holes.len());

    for &[x, y] in outer {
        vertices.push(x as f64);
        vertices.push(y as f64);
    }

    for hole in holes {
        hole_indices.push(vertices.len() / 2);
        for &[x, y] in hole {
            vertices.push(x as f64);
            vertices.push(y as f64);
        }
    }

    earcut(&vertices, &hole_indices, 2).unwrap_or_default()
}
