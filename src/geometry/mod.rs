pub mod bounds;
pub mod center;
pub mod projection;
pub mod recenter;
pub mod simplify;

pub use bounds::Bounds;
pub use center::{Center, calculate_center, dataset_center, feature_bounds};
pub use projection::{Projector, Units};
pub use recenter::{
    LocalPolygon, NormalizedBuilding, SceneOrigin, normalize_feature, recenter_ring,
    resolve_origin, scene_offset,
};
pub use simplify::simplify_polygon;
