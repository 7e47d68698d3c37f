//! footprint3d - Extrude GeoJSON building footprints into 3D scenes

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod render;
pub mod scene;

pub use error::{GeometryError, LoadError, RenderError};
