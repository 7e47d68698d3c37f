use geo::{LineString, Simplify};

use super::LocalPolygon;

/// Douglas-Peucker simplification of a closed ring
///
/// Rings that would collapse below a triangle are returned unchanged.
pub fn simplify_ring(ring: &[[f64; 2]], epsilon: f64) -> Vec<[f64; 2]> {
    if ring.len() < 5 || epsilon <= 0.0 {
        return ring.to_vec();
    }

    let line: LineString<f64> = ring
        .iter()
        .map(|&[x, y]| geo::coord! { x: x, y: y })
        .collect();

    let simplified: Vec<[f64; 2]> = line
        .simplify(&epsilon)
        .0
        .into_iter()
        .map(|c| [c.x, c.y])
        .collect();

    // A closed triangle needs four points (first repeated at the end)
    if simplified.len() < 4 {
        return ring.to_vec();
    }

    simplified
}

pub fn simplify_polygon(polygon: &LocalPolygon, epsilon: f64) -> LocalPolygon {
    LocalPolygon {
        outer: simplify_ring(&polygon.outer, epsilon),
        holes: polygon
            .holes
            .iter()
            .map(|hole| simplify_ring(hole, epsilon))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplify_short_ring() {
        let ring = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        assert_eq!(simplify_ring(&ring, 1.0), ring);
    }

    #[test]
    fn test_simplify_drops_collinear_points() {
        let ring = vec![
            [0.0, 0.0],
            [5.0, 0.01],
            [10.0, 0.0],
            [10.0, 10.0],
            [0.0, 10.0],
            [0.0, 0.0],
        ];
        let result = simplify_ring(&ring, 0.1);
        assert_eq!(result.len(), 5);
        assert_eq!(result.first(), result.last());
    }

    #[test]
    fn test_simplify_preserves_minimum() {
        let sliver = vec![
            [0.0, 0.0],
            [1.0, 0.001],
            [2.0, 0.0],
            [1.0, -0.001],
            [0.0, 0.0],
        ];
        let result = simplify_ring(&sliver, 10.0);
        assert_eq!(result, sliver);
    }

    #[test]
    fn test_simplify_disabled() {
        let ring = vec![[0.0, 0.0], [5.0, 0.01], [10.0, 0.0], [10.0, 10.0], [0.0, 0.0]];
        assert_eq!(simplify_ring(&ring, 0.0), ring);
    }
}
