use serde::Deserialize;
use std::path::PathBuf;

use crate::geometry::{SceneOrigin, Units};

fn default_fov() -> f64 {
    75.0
}
fn default_camera_distance() -> f64 {
    100.0
}
fn default_far() -> f64 {
    1000.0
}
fn default_width() -> u32 {
    1280
}
fn default_height_px() -> u32 {
    720
}
fn default_fps() -> u32 {
    60
}
fn default_fill() -> String {
    "#433F81".to_string()
}
fn default_edge() -> String {
    "#ffffff".to_string()
}
fn default_background() -> String {
    "#000000".to_string()
}

/// Settings read from `footprint3d.toml`
///
/// Every field is optional in the file; command-line flags take precedence.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub default_height: Option<f64>,
    #[serde(default)]
    pub origin: Option<SceneOrigin>,
    #[serde(default)]
    pub units: Option<Units>,
    #[serde(default)]
    pub simplify: Option<f64>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub colors: ColorConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CameraConfig {
    #[serde(default = "default_fov")]
    pub fov: f64,
    /// Initial distance from the scene origin along +z
    #[serde(default = "default_camera_distance")]
    pub distance: f64,
    #[serde(default = "default_far")]
    pub far: f64,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height_px")]
    pub height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Degrees of orbit per frame while animating
    #[serde(default)]
    pub auto_rotate: Option<f64>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: default_fov(),
            distance: default_camera_distance(),
            far: default_far(),
            width: default_width(),
            height: default_height_px(),
            fps: default_fps(),
            auto_rotate: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ColorConfig {
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_edge")]
    pub edge: String,
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            fill: default_fill(),
            edge: default_edge(),
            background: default_background(),
        }
    }
}

impl FileConfig {
    /// Load the first config file found in the search paths
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if !path.exists() {
                continue;
            }
            let Ok(contents) = std::fs::read_to_string(&path) else {
                continue;
            };
            match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "Loaded config file");
                    return Some(config);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file");
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("footprint3d.toml"),
        PathBuf::from(".footprint3d.toml"),
    ];

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("footprint3d").join("config.toml"));
        paths.push(config_dir.join("footprint3d.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".footprint3d.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.url.is_none());
        assert!(!config.verbose);
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.colors.fill, "#433F81");
    }

    #[test]
    fn test_parse_full_config() {
        let config: FileConfig = toml::from_str(
            r##"
            url = "http://example.com/buildings.geojson"
            output = "paris.svg"
            default_height = 9.0
            origin = "dataset"
            units = "degrees"
            simplify = 0.5
            timeout_secs = 20

            [camera]
            fov = 60.0
            distance = 250.0
            auto_rotate = 1.5

            [colors]
            fill = "#aa0000"
            "##,
        )
        .unwrap();

        assert_eq!(config.url.as_deref(), Some("http://example.com/buildings.geojson"));
        assert_eq!(config.output, Some(PathBuf::from("paris.svg")));
        assert_eq!(config.default_height, Some(9.0));
        assert_eq!(config.origin, Some(SceneOrigin::DatasetCenter));
        assert_eq!(config.units, Some(Units::Degrees));
        assert_eq!(config.timeout_secs, Some(20));
        assert_eq!(config.camera.fov, 60.0);
        assert_eq!(config.camera.distance, 250.0);
        assert_eq!(config.camera.width, 1280);
        assert_eq!(config.camera.auto_rotate, Some(1.5));
        assert_eq!(config.colors.fill, "#aa0000");
        assert_eq!(config.colors.edge, "#ffffff");
    }

    #[test]
    fn test_config_paths() {
        let paths = get_config_paths();
        assert_eq!(paths[0], PathBuf::from("footprint3d.toml"));
    }
}
