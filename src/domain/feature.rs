use serde::Deserialize;

/// A single (longitude, latitude) position
///
/// GeoJSON positions may carry a third altitude component; it is accepted
/// and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [x, y, ..] => Ok(Self::new(*x, *y)),
            _ => Err(format!(
                "position needs at least 2 components, got {}",
                values.len()
            )),
        }
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Closed sequence of positions forming a polygon boundary
pub type Ring = Vec<Position>;

/// Outer ring followed by zero or more holes
pub type PolygonRings = Vec<Ring>;

/// Building geometry as found in the GeoJSON payload
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: PolygonRings },
    MultiPolygon { coordinates: Vec<PolygonRings> },
    /// Any other GeoJSON geometry type; skipped when building the scene
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    /// Polygons of this geometry, a `Polygon` being a single-entry list
    pub fn polygons(&self) -> &[PolygonRings] {
        match self {
            Geometry::Polygon { coordinates } => std::slice::from_ref(coordinates),
            Geometry::MultiPolygon { coordinates } => coordinates,
            Geometry::Unsupported => &[],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Properties {
    /// Extrusion depth
    #[serde(default)]
    pub height: Option<f64>,
    /// Extrusion depth under its French key, used when `height` is absent
    #[serde(default)]
    pub hauteur: Option<f64>,
}

impl Properties {
    pub fn height(&self) -> Option<f64> {
        self.height.or(self.hauteur)
    }
}

/// One building record
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

impl Feature {
    /// Build a single-polygon feature, mostly useful for tests and callers
    /// assembling features by hand
    pub fn from_polygon(rings: PolygonRings, height: Option<f64>) -> Self {
        Self {
            id: None,
            geometry: Some(Geometry::Polygon { coordinates: rings }),
            properties: Some(Properties {
                height,
                hauteur: None,
            }),
        }
    }

    pub fn height(&self) -> Option<f64> {
        self.properties.as_ref().and_then(Properties::height)
    }

    /// Human-readable identifier for log messages
    pub fn label(&self, index: usize) -> String {
        match &self.id {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => format!("#{}", index),
        }
    }
}

/// Root document of the building dataset
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}
