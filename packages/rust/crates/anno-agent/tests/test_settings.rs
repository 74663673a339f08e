//! Settings loading and system/user merging.

use std::fs;
use std::path::PathBuf;

use anno_agent::{DEFAULT_MODEL, load_settings_from_paths};
use tempfile::TempDir;

#[test]
fn test_missing_files_give_defaults() {
    let dir = TempDir::new().expect("Create temp dir");
    let settings =
        load_settings_from_paths(&dir.path().join("system.yaml"), &dir.path().join("user.yaml"));

    assert_eq!(settings.generator.model(), DEFAULT_MODEL);
    assert!(settings.generator.temperature().abs() < f32::EPSILON);
    assert_eq!(settings.generator.cache_path(), PathBuf::from("./completions"));
    assert_eq!(settings.generator.timeout_secs(), 120);
    assert_eq!(settings.files.max_file_size(), 1024 * 1024);
}

#[test]
fn test_user_overrides_system_field_by_field() {
    let dir = TempDir::new().expect("Create temp dir");
    let system = dir.path().join("system.yaml");
    let user = dir.path().join("user.yaml");
    fs::write(
        &system,
        "generator:\n  model: gpt-4o-mini\n  temperature: 0\n  cache_path: ./completions\nfiles:\n  max_file_size: 2048\n",
    )
    .expect("Write system settings");
    fs::write(&user, "generator:\n  model: local-model\n  temperature: 0.7\n")
        .expect("Write user settings");

    let settings = load_settings_from_paths(&system, &user);

    assert_eq!(settings.generator.model(), "local-model");
    assert!((settings.generator.temperature() - 0.7).abs() < 1e-6);
    assert_eq!(settings.generator.cache_path(), PathBuf::from("./completions"));
    assert_eq!(settings.files.max_file_size(), 2048);
}

#[test]
fn test_invalid_yaml_is_ignored() {
    let dir = TempDir::new().expect("Create temp dir");
    let system = dir.path().join("system.yaml");
    let user = dir.path().join("user.yaml");
    fs::write(&system, "generator:\n  model: system-model\n").expect("Write system settings");
    fs::write(&user, "generator: [not, a, mapping\n").expect("Write user settings");

    let settings = load_settings_from_paths(&system, &user);
    assert_eq!(settings.generator.model(), "system-model");
}

#[test]
fn test_empty_file_is_default() {
    let dir = TempDir::new().expect("Create temp dir");
    let system = dir.path().join("system.yaml");
    fs::write(&system, "").expect("Write system settings");

    let settings = load_settings_from_paths(&system, &dir.path().join("user.yaml"));
    assert_eq!(settings.generator.model(), DEFAULT_MODEL);
}

#[test]
fn test_configured_api_key_wins() {
    let dir = TempDir::new().expect("Create temp dir");
    let user = dir.path().join("user.yaml");
    fs::write(&user, "generator:\n  api_key: sk-test\n").expect("Write user settings");

    let settings = load_settings_from_paths(&dir.path().join("system.yaml"), &user);
    assert_eq!(settings.generator.api_key().as_deref(), Some("sk-test"));
}

#[test]
fn test_repository_defaults_parse() {
    let system = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../conf/settings.yaml");
    let dir = TempDir::new().expect("Create temp dir");

    let settings = load_settings_from_paths(&system, &dir.path().join("user.yaml"));
    assert_eq!(settings.generator.model.as_deref(), Some("gpt-4o-mini"));
    assert_eq!(
        settings.generator.inference_url.as_deref(),
        Some("https://api.openai.com/v1/chat/completions")
    );
    assert_eq!(settings.files.max_file_size, Some(1_048_576));
}
