pub mod feature;

pub use feature::{Feature, FeatureCollection, Geometry, PolygonRings, Position, Properties, Ring};
