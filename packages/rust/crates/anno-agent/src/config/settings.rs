//! Settings loader for code-annotation.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/settings.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/code-annotation/settings.yaml`
//!
//! Merge precedence is user over system, field by field. Command-line
//! flags are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anno_io::{DEFAULT_MAX_FILE_SIZE, read_text_safe};
use serde::Deserialize;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/settings.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "code-annotation/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.0;
/// OpenAI chat-completions endpoint.
pub const DEFAULT_INFERENCE_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Response cache directory, relative to the working directory.
pub const DEFAULT_CACHE_PATH: &str = "./completions";
/// HTTP timeout for one completion.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Merged settings file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeAnnotationSettings {
    /// `generator:` section.
    #[serde(default)]
    pub generator: GeneratorSettings,
    /// `files:` section.
    #[serde(default)]
    pub files: FileSettings,
}

/// LLM generator settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratorSettings {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub inference_url: Option<String>,
    pub api_key: Option<String>,
    pub cache_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// File handling settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSettings {
    pub max_file_size: Option<u64>,
}

impl CodeAnnotationSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            generator: self.generator.merge(overlay.generator),
            files: self.files.merge(overlay.files),
        }
    }
}

impl GeneratorSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            model: overlay.model.or(self.model),
            temperature: overlay.temperature.or(self.temperature),
            inference_url: overlay.inference_url.or(self.inference_url),
            api_key: overlay.api_key.or(self.api_key),
            cache_path: overlay.cache_path.or(self.cache_path),
            timeout_secs: overlay.timeout_secs.or(self.timeout_secs),
        }
    }

    #[must_use]
    pub fn model(&self) -> String {
        self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    #[must_use]
    pub fn inference_url(&self) -> String {
        self.inference_url
            .clone()
            .unwrap_or_else(|| DEFAULT_INFERENCE_URL.to_string())
    }

    /// Configured key, else `OPENAI_API_KEY`.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.cache_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_PATH))
    }

    #[must_use]
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

impl FileSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            max_file_size: overlay.max_file_size.or(self.max_file_size),
        }
    }

    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }
}

/// Load merged settings (user overrides system).
#[must_use]
pub fn load_settings() -> CodeAnnotationSettings {
    let (system_path, user_path) = settings_paths();
    load_settings_from_paths(&system_path, &user_path)
}

#[doc(hidden)]
#[must_use]
pub fn settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
#[must_use]
pub fn load_settings_from_paths(system: &Path, user: &Path) -> CodeAnnotationSettings {
    load_one(system).merge(load_one(user))
}

/// Settings files are small; anything larger is not a settings file.
const MAX_SETTINGS_BYTES: u64 = 64 * 1024;

fn load_one(path: &Path) -> CodeAnnotationSettings {
    if !path.is_file() {
        return CodeAnnotationSettings::default();
    }
    let parsed = read_text_safe(path, MAX_SETTINGS_BYTES)
        .map_err(|error| error.to_string())
        .and_then(|raw| {
            serde_yaml::from_str::<Option<CodeAnnotationSettings>>(&raw)
                .map_err(|error| error.to_string())
        });
    match parsed {
        Ok(settings) => settings.unwrap_or_default(),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "ignoring unusable settings file");
            CodeAnnotationSettings::default()
        }
    }
}

/// Non-empty, trimmed value of an environment variable.
fn env_path(name: &str) -> Option<PathBuf> {
    let value = std::env::var(name).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| PathBuf::from(value))
}

fn project_root() -> PathBuf {
    env_path("PRJ_ROOT")
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Use `path` as the config home for the rest of the process (`--conf`).
///
/// Relative paths resolve against the project root. Only the first call
/// takes effect.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if let Err(ignored) = CONFIG_HOME_OVERRIDE.set(path) {
        tracing::warn!(ignored = %ignored.display(), "config home already set");
    }
}

/// `--conf`, then `PRJ_CONFIG_HOME`, then `.config`, under `root` unless
/// absolute.
fn resolve_config_home(root: &Path) -> PathBuf {
    let home = CONFIG_HOME_OVERRIDE
        .get()
        .cloned()
        .or_else(|| env_path("PRJ_CONFIG_HOME"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_HOME_RELATIVE_PATH));
    root.join(home)
}
