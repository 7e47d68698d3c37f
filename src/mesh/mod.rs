pub mod builder;
pub mod edges;
pub mod extrusion;
pub mod ring;
pub mod triangulation;
pub mod validation;

pub use builder::{Edge, MeshBuilder, Triangle};
pub use edges::extract_edges;
pub use extrusion::extrude_polygon;
pub use ring::prepare_ring;
pub use triangulation::triangulate_polygon;
pub use validation::{MeshReport, validate_and_fix};
