use geo::{LineString, Winding};

/// Turn a GeoJSON ring into an open vertex loop ready for meshing
///
/// Drops the closing vertex and consecutive duplicates, then orients the
/// loop counter-clockwise (`ccw == true`) or clockwise. Returns `None` when
/// the ring encloses no area.
pub fn prepare_ring(ring: &[[f64; 2]], ccw: bool) -> Option<Vec<[f32; 2]>> {
    let mut line: LineString<f64> = ring
        .iter()
        .map(|&[x, y]| geo::coord! { x: x, y: y })
        .collect();
    line.0.dedup();
    // Winding is only defined for closed rings
    line.close();

    // Collinear or repeated vertices have no winding and enclose no area
    line.winding_order()?;

    if ccw {
        line.make_ccw_winding();
    } else {
        line.make_cw_winding();
    }

    let mut points: Vec<[f32; 2]> = line.0.iter().map(|c| [c.x as f32, c.y as f32]).collect();
    points.pop();
    points.dedup();

    (points.len() >= 3).then_some(points)
}
