use super::Edge;

/// Vertices turning by less than this (in degrees) get no vertical edge
const CREASE_ANGLE_DEG: f32 = 1.0;

/// Outline edges of an extruded polygon
///
/// Emits the bottom and top loop of every ring and a vertical edge at each
/// vertex where the outline actually bends, so flat wall faces split by
/// collinear vertices are not outlined.
pub fn extract_edges(
    outer: &[[f32; 2]],
    holes: &[Vec<[f32; 2]>],
    z_bottom: f32,
    z_top: f32,
) -> Vec<Edge> {
    let mut edges = Vec::new();
    for ring in std::iter::once(outer).chain(holes.iter().map(Vec::as_slice)) {
        ring_edges(&mut edges, ring, z_bottom, z_top);
    }
    edges
}

fn ring_edges(edges: &mut Vec<Edge>, ring: &[[f32; 2]], z_bottom: f32, z_top: f32) {
    let n = ring.len();
    if n < 3 {
        return;
    }

    let flat = z_top <= z_bottom;
    let threshold = CREASE_ANGLE_DEG.to_radians().sin();

    for i in 0..n {
        let [x1, y1] = ring[i];
        let [x2, y2] = ring[(i + 1) % n];

        edges.push(Edge::new([x1, y1, z_bottom], [x2, y2, z_bottom]));
        if flat {
            continue;
        }
        edges.push(Edge::new([x1, y1, z_top], [x2, y2, z_top]));

        if is_crease(ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n], threshold) {
            edges.push(Edge::new([x1, y1, z_bottom], [x1, y1, z_top]));
        }
    }
}

fn is_crease(prev: [f32; 2], at: [f32; 2], next: [f32; 2], threshold: f32) -> bool {
    let a = [at[0] - prev[0], at[1] - prev[1]];
    let b = [next[0] - at[0], next[1] - at[1]];
    let len_a = (a[0] * a[0] + a[1] * a[1]).sqrt();
    let len_b = (b[0] * b[0] + b[1] * b[1]).sqrt();
    if len_a == 0.0 || len_b == 0.0 {
        return false;
    }

    let sin = (a[0] * b[1] - a[1] * b[0]) / (len_a * len_b);
    let cos = (a[0] * b[0] + a[1] * b[1]) / (len_a * len_b);
    // A reversal (cos < 0, sin ~ 0) is still a crease
    sin.abs() > threshold || cos < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_edges() {
        let square = vec![[0.0, 0.0], [4.0, 0.0], [4.0, 2.0], [0.0, 2.0]];
        let edges = extract_edges(&square, &[], 0.0, 10.0);
        // 4 bottom + 4 top + 4 vertical
        assert_eq!(edges.len(), 12);

        let vertical = edges
            .iter()
            .filter(|e| e.start[0] == e.end[0] && e.start[1] == e.end[1])
            .count();
        assert_eq!(vertical, 4);
    }

    #[test]
    fn test_collinear_vertex_has_no_vertical_edge() {
        let ring = vec![[0.0, 0.0], [2.0, 0.0], [4.0, 0.0], [4.0, 2.0], [0.0, 2.0]];
        let edges = extract_edges(&ring, &[], 0.0, 3.0);
        // 5 bottom + 5 top + 4 vertical
        assert_eq!(edges.len(), 14);
    }

    #[test]
    fn test_hole_edges() {
        let outer = vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        let hole = vec![[2.0, 2.0], [2.0, 8.0], [8.0, 8.0], [8.0, 2.0]];
        assert_eq!(extract_edges(&outer, &[hole], 0.0, 1.0).len(), 24);
    }

    #[test]
    fn test_flat_outline() {
        let square = vec![[0.0, 0.0], [4.0, 0.0], [4.0, 2.0], [0.0, 2.0]];
        assert_eq!(extract_edges(&square, &[], 0.0, 0.0).len(), 4);
    }
}
