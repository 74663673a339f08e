//! On-disk completion cache.
//!
//! Entries live at `<dir>/<key>.json`, `key` being the SHA-256 of the
//! prompt identity: model, temperature and the exact chat messages. A
//! changed prompt, model or temperature is a different key.

use std::path::{Path, PathBuf};

use anno_edit::{Generator, GeneratorError, TransformationRequest};
use anno_io::{read_text_safe, write_text};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::prompt::{ChatMessage, build_messages};

const MAX_ENTRY_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Serialize)]
struct PromptIdentity<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [ChatMessage],
}

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    model: String,
    completion: String,
}

/// Wraps a generator with a response cache.
pub struct CachedGenerator<G> {
    inner: G,
    dir: PathBuf,
    model: String,
    temperature: f32,
}

impl<G: Generator> CachedGenerator<G> {
    /// Cache `inner` under `dir`. `model` and `temperature` are part of
    /// every key and should match what `inner` sends.
    pub fn new(inner: G, dir: impl Into<PathBuf>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            inner,
            dir: dir.into(),
            model: model.into(),
            temperature,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache key of `code` under `request`.
    #[must_use]
    pub fn key(&self, code: &str, request: &TransformationRequest) -> String {
        let messages = build_messages(code, request);
        let identity = PromptIdentity {
            model: &self.model,
            temperature: self.temperature,
            messages: &messages,
        };
        // Serializing plain strings and a float cannot fail.
        let bytes = serde_json::to_vec(&identity).unwrap_or_default();
        sha256_hex(&bytes)
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn load(&self, path: &Path) -> Option<String> {
        if !path.is_file() {
            return None;
        }
        let raw = match read_text_safe(path, MAX_ENTRY_BYTES) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(path = %path.display(), error = %error, "unreadable cache entry; ignoring");
                return None;
            }
        };
        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => Some(entry.completion),
            Err(error) => {
                tracing::warn!(path = %path.display(), error = %error, "corrupt cache entry; ignoring");
                None
            }
        }
    }

    fn store(&self, path: &Path, completion: &str) {
        let entry = CacheEntry {
            model: self.model.clone(),
            completion: completion.to_string(),
        };
        let result = std::fs::create_dir_all(&self.dir)
            .map_err(anno_io::IoError::from)
            .and_then(|()| {
                let raw = serde_json::to_string_pretty(&entry).unwrap_or_default();
                write_text(path, &raw)
            });
        if let Err(error) = result {
            tracing::warn!(path = %path.display(), error = %error, "failed to write cache entry");
        }
    }
}

impl<G: Generator> Generator for CachedGenerator<G> {
    fn generate(&self, code: &str, request: &TransformationRequest) -> Result<String, GeneratorError> {
        let key = self.key(code, request);
        let path = self.entry_path(&key);

        if let Some(completion) = self.load(&path) {
            tracing::debug!(key = %key, "completion cache hit");
            return Ok(completion);
        }

        let completion = self.inner.generate(code, request)?;
        self.store(&path, &completion);
        Ok(completion)
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
