pub mod build;
pub mod camera;
pub mod controls;
pub mod graph;
pub mod material;
pub mod render_loop;
pub mod session;

pub use build::{LoadSummary, SceneOptions, build_node, populate_scene};
pub use camera::PerspectiveCamera;
pub use controls::OrbitControls;
pub use graph::{BuildingNode, Scene};
pub use material::{Color, Material};
pub use render_loop::RenderLoop;
pub use session::Session;
