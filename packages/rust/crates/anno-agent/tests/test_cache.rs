//! Completion cache behaviour.

use std::cell::Cell;
use std::fs;

use anno_agent::CachedGenerator;
use anno_edit::{Generator, GeneratorError, TransformationRequest};
use tempfile::TempDir;

const CODE: &str = "def f(x):\n    return x\n";

#[test]
fn test_second_call_is_served_from_disk() {
    let dir = TempDir::new().expect("Create temp dir");
    let calls = Cell::new(0);
    let inner = |code: &str, _: &TransformationRequest| {
        calls.set(calls.get() + 1);
        Ok::<_, GeneratorError>(format!("# rewritten\n{code}"))
    };
    let cached = CachedGenerator::new(&inner, dir.path(), "gpt-4o-mini", 0.0);
    let request = TransformationRequest::default();

    let first = cached.generate(CODE, &request).expect("First call");
    let second = cached.generate(CODE, &request).expect("Second call");

    assert_eq!(first, second);
    assert_eq!(calls.get(), 1);

    let key = cached.key(CODE, &request);
    assert_eq!(key.len(), 64);
    assert!(dir.path().join(format!("{key}.json")).is_file());
}

#[test]
fn test_key_depends_on_request_model_and_temperature() {
    let dir = TempDir::new().expect("Create temp dir");
    let inner = |code: &str, _: &TransformationRequest| Ok::<_, GeneratorError>(code.to_string());
    let base = CachedGenerator::new(&inner, dir.path(), "gpt-4o-mini", 0.0);
    let other_model = CachedGenerator::new(&inner, dir.path(), "other", 0.0);
    let other_temperature = CachedGenerator::new(&inner, dir.path(), "gpt-4o-mini", 0.5);

    let request = TransformationRequest::default();
    let deleting = TransformationRequest {
        delete: true,
        ..Default::default()
    };

    let key = base.key(CODE, &request);
    assert_eq!(key, base.key(CODE, &request));
    assert_ne!(key, base.key(CODE, &deleting));
    assert_ne!(key, base.key("x = 1\n", &request));
    assert_ne!(key, other_model.key(CODE, &request));
    assert_ne!(key, other_temperature.key(CODE, &request));
}

#[test]
fn test_errors_are_not_cached() {
    let dir = TempDir::new().expect("Create temp dir");
    let calls = Cell::new(0);
    let inner = |_: &str, _: &TransformationRequest| {
        calls.set(calls.get() + 1);
        Err::<String, _>(GeneratorError::new("offline"))
    };
    let cached = CachedGenerator::new(&inner, dir.path(), "gpt-4o-mini", 0.0);
    let request = TransformationRequest::default();

    assert!(cached.generate(CODE, &request).is_err());
    assert!(cached.generate(CODE, &request).is_err());
    assert_eq!(calls.get(), 2);
    assert_eq!(fs::read_dir(dir.path()).expect("List cache").count(), 0);
}

#[test]
fn test_corrupt_entry_is_a_miss() {
    let dir = TempDir::new().expect("Create temp dir");
    let calls = Cell::new(0);
    let inner = |code: &str, _: &TransformationRequest| {
        calls.set(calls.get() + 1);
        Ok::<_, GeneratorError>(code.to_string())
    };
    let cached = CachedGenerator::new(&inner, dir.path(), "gpt-4o-mini", 0.0);
    let request = TransformationRequest::default();

    let key = cached.key(CODE, &request);
    fs::write(dir.path().join(format!("{key}.json")), "not json").expect("Write entry");

    assert_eq!(cached.generate(CODE, &request).expect("Generate"), CODE);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_unwritable_cache_does_not_fail() {
    let dir = TempDir::new().expect("Create temp dir");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").expect("Write blocker");

    let inner = |code: &str, _: &TransformationRequest| Ok::<_, GeneratorError>(code.to_string());
    let cached = CachedGenerator::new(&inner, blocker.join("cache"), "gpt-4o-mini", 0.0);

    assert_eq!(
        cached
            .generate(CODE, &TransformationRequest::default())
            .expect("Generate"),
        CODE
    );
}
