use thiserror::Error;

/// Failures while fetching or reading the building dataset
#[derive(Debug, Error)]
pub enum LoadError {
    /// DNS, connection, timeout or body read failure
    #[error("failed to fetch building data from {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// Body is not a valid feature collection
    #[error("failed to parse building data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read building data from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Per-building problems that keep a feature out of the scene
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("feature has no geometry")]
    MissingGeometry,

    #[error("feature geometry is not a Polygon or MultiPolygon")]
    UnsupportedGeometry,

    #[error("feature geometry has no coordinates")]
    EmptyGeometry,

    #[error("feature has no height property and no default height is configured")]
    MissingHeight,

    #[error("feature height {0} is not a finite non-negative number")]
    InvalidHeight(f64),
}

/// Failures inside a renderer or the render loop
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported output format: {0} (expected .stl, .obj or .svg)")]
    UnsupportedFormat(String),

    #[error("render session was torn down")]
    Closed,

    #[error("render session lock was poisoned")]
    Poisoned,

    #[error("render loop thread panicked")]
    Panicked,
}

impl RenderError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
