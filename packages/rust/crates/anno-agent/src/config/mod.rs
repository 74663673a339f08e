//! Config namespace: YAML settings loading.

mod settings;

pub use settings::{
    CodeAnnotationSettings, DEFAULT_CACHE_PATH, DEFAULT_INFERENCE_URL, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, FileSettings, GeneratorSettings, load_settings,
    load_settings_from_paths, set_config_home_override, settings_paths,
};
