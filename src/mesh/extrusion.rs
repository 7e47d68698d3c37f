use super::MeshBuilder;
use super::Triangle;
use super::triangulation::triangulate_polygon;

/// Extrude a polygon between two heights
///
/// `outer` must be counter-clockwise and `holes` clockwise, both as open
/// loops (see [`super::prepare_ring`]). Produces top and bottom caps plus
/// side walls for the outer ring and every hole, all facing outward.
pub fn extrude_polygon(
    outer: &[[f32; 2]],
    holes: &[Vec<[f32; 2]>],
    z_bottom: f32,
    z_top: f32,
) -> Vec<Triangle> {
    let indices = triangulate_polygon(outer, holes);
    if indices.is_empty() {
        return Vec::new();
    }

    let all_points: Vec<[f32; 2]> = outer
        .iter()
        .chain(holes.iter().flatten())
        .copied()
        .collect();

    let mut builder = MeshBuilder::new();

    for tri in indices.chunks_exact(3) {
        let [x0, y0] = all_points[tri[0]];
        let [x1, y1] = all_points[tri[1]];
        let [x2, y2] = all_points[tri[2]];

        // earcut winding is not guaranteed, orient the caps explicitly
        let ccw = (x1 - x0) * (y2 - y0) - (x2 - x0) * (y1 - y0) >= 0.0;
        let (a, b, c) = if ccw {
            ([x0, y0], [x1, y1], [x2, y2])
        } else {
            ([x0, y0], [x2, y2], [x1, y1])
        };

        builder.add_triangle(
            [a[0], a[1], z_top],
            [b[0], b[1], z_top],
            [c[0], c[1], z_top],
        );
        builder.add_triangle(
            [a[0], a[1], z_bottom],
            [c[0], c[1], z_bottom],
            [b[0], b[1], z_bottom],
        );
    }

    add_side_walls(&mut builder, outer, z_bottom, z_top);
    for hole in holes {
        // Clockwise holes make the same winding face into the hole
        add_side_walls(&mut builder, hole, z_bottom, z_top);
    }

    builder.finish()
}

fn add_side_walls(builder: &mut MeshBuilder, ring: &[[f32; 2]], z_bottom: f32, z_top: f32) {
    let n = ring.len();
    if n < 3 || z_top <= z_bottom {
        return;
    }

    for i in 0..n {
        let [x1, y1] = ring[i];
        let [x2, y2] = ring[(i + 1) % n];

        builder.add_quad(
            [x1, y1, z_bottom],
            [x2, y2, z_bottom],
            [x2, y2, z_top],
            [x1, y1, z_top],
        );
    }
}
