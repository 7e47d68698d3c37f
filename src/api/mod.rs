pub mod loader;

pub use loader::{
    DEFAULT_DATA_URL, LoaderConfig, load_building_data, load_building_file,
    parse_feature_collection,
};
