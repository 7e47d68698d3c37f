use std::path::Path;
use std::time::Duration;

use crate::domain::{Feature, FeatureCollection};
use crate::error::LoadError;

/// Where the building dataset is served by default
pub const DEFAULT_DATA_URL: &str = "http://localhost:3000/assets/data.geojson";

const USER_AGENT: &str = concat!("footprint3d/", env!("CARGO_PKG_VERSION"));

/// HTTP settings for the loader
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoaderConfig {
    /// No timeout when `None`
    pub timeout: Option<Duration>,
}

/// Parse a GeoJSON FeatureCollection body into its features
pub fn parse_feature_collection(body: &str) -> Result<Vec<Feature>, LoadError> {
    let collection: FeatureCollection = serde_json::from_str(body)?;
    Ok(collection.features)
}

/// Fetch the building dataset with a single GET request
///
/// No retries and no caching: a non-success status fails with
/// [`LoadError::Http`], an unreachable server with [`LoadError::Network`]
/// and a malformed body with [`LoadError::Parse`].
pub fn load_building_data(url: &str, config: &LoaderConfig) -> Result<Vec<Feature>, LoadError> {
    let network = |source| LoadError::Network {
        url: url.to_string(),
        source,
    };

    let mut builder = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
    // The blocking client defaults to a 30s timeout, keep "none" meaning none
    builder = builder.timeout(config.timeout);
    let client = builder.build().map_err(network)?;

    tracing::debug!(url, timeout = ?config.timeout, "Fetching building data");
    let response = client.get(url).send().map_err(network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Http {
            status: status.as_u16(),
        });
    }

    let body = response.text().map_err(network)?;
    let features = parse_feature_collection(&body)?;
    tracing::debug!(url, features = features.len(), bytes = body.len(), "Loaded building data");
    Ok(features)
}

/// Read the building dataset from a local GeoJSON file
pub fn load_building_file(path: &Path) -> Result<Vec<Feature>, LoadError> {
    let body = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_feature_collection(&body)
}
