//! code-annotation agent: the LLM side of the annotation pipeline.
//!
//! - **Settings**: system + user YAML, user wins.
//! - **Prompt**: developer + user chat messages from a `TransformationRequest`.
//! - **LLM**: blocking OpenAI-compatible chat completions; the last fenced block is the candidate.
//! - **Cache**: completions stored on disk by prompt digest.

#![allow(missing_docs)]

mod cache;
mod config;
mod llm;
mod prompt;

pub use cache::CachedGenerator;
pub use config::{
    CodeAnnotationSettings, DEFAULT_CACHE_PATH, DEFAULT_INFERENCE_URL, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, FileSettings, GeneratorSettings, load_settings,
    load_settings_from_paths, set_config_home_override, settings_paths,
};
pub use llm::{LlmConfig, LlmGenerator, extract_code_block, parse_reply};
pub use prompt::{ChatMessage, build_messages};
