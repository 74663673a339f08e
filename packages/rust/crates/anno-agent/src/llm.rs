//! LLM generator: OpenAI-compatible chat completions.

use std::sync::LazyLock;
use std::time::Duration;

use anno_edit::{Generator, GeneratorError, TransformationRequest};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::prompt::{ChatMessage, build_messages};

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_compile_err) => match Regex::new(r"$^") {
            Ok(fallback) => fallback,
            Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
        },
    }
}

/// A fenced block: opening fence with optional info string, body, closing
/// fence alone at the start of a line. Backticks inside the body (an
/// indented fence in a docstring) do not close the block.
static CODE_FENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(r"(?s)```[A-Za-z0-9_+.-]*[ \t]*\r?\n(.*?\n)?```[ \t]*(?:\r?\n|$)")
});

/// Request body for chat completions (OpenAI format).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [ChatMessage],
}

/// Response: choices[0].message.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Connection and sampling parameters of an [`LlmGenerator`].
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub inference_url: String,
    pub model: String,
    pub temperature: f32,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Generator backed by a chat-completions endpoint.
pub struct LlmGenerator {
    client: reqwest::blocking::Client,
    config: LlmConfig,
}

impl LlmGenerator {
    /// Build the HTTP client.
    ///
    /// # Errors
    /// When the TLS backend cannot be initialised.
    pub fn new(config: LlmConfig) -> Result<Self, GeneratorError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeneratorError::with_source("failed to build HTTP client", e))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Send `messages` and return the reply text.
    fn chat(&self, messages: &[ChatMessage]) -> Result<String, GeneratorError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages,
        };
        let mut req = self
            .client
            .post(&self.config.inference_url)
            .json(&body)
            .header("Content-Type", "application/json");
        if let Some(ref key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {key}"));
        }

        tracing::debug!(model = %self.config.model, url = %self.config.inference_url, "requesting completion");
        let res = req
            .send()
            .map_err(|e| GeneratorError::with_source("LLM request failed", e))?;
        let status = res.status();
        let text = res
            .text()
            .map_err(|e| GeneratorError::with_source("LLM response could not be read", e))?;
        if !status.is_success() {
            return Err(GeneratorError::new(format!("LLM API error {status}: {text}")));
        }
        parse_reply(&text)
    }
}

impl Generator for LlmGenerator {
    fn generate(&self, code: &str, request: &TransformationRequest) -> Result<String, GeneratorError> {
        let reply = self.chat(&build_messages(code, request))?;
        extract_code_block(&reply)
            .ok_or_else(|| GeneratorError::new("LLM reply contains no code block"))
    }
}

/// Content of the first choice of a chat-completions body.
///
/// # Errors
/// When the body is not a chat-completions response, has no choices, or
/// the first choice has no content.
pub fn parse_reply(body: &str) -> Result<String, GeneratorError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        GeneratorError::with_source(format!("LLM response parse error; body: {body}"), e)
    })?;
    parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GeneratorError::new("LLM response has no choices"))?
        .message
        .content
        .ok_or_else(|| GeneratorError::new("LLM response has no content"))
}

/// Body of the last fenced code block in `reply`.
#[must_use]
pub fn extract_code_block(reply: &str) -> Option<String> {
    CODE_FENCE_REGEX
        .captures_iter(reply)
        .last()
        .map(|caps| caps.get(1).map_or_else(String::new, |body| body.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_block_wins() {
        let reply = "think:\n```text\nplan\n```\ncode:\n```python\nx: int = 1\n```\n";
        assert_eq!(extract_code_block(reply).as_deref(), Some("x: int = 1\n"));
    }

    #[test]
    fn test_no_block() {
        assert_eq!(extract_code_block("x = 1"), None);
    }
}
