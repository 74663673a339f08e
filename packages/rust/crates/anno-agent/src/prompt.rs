//! Chat prompt for one annotation request.

use std::fmt::Write as _;

use anno_edit::TransformationRequest;
use serde::{Deserialize, Serialize};

const DEVELOPER_PROMPT: &str = "You are a Python expert. Follow the instructions of the user.";

const FIXED_CLAUSES: [&str; 2] = [
    "leave everything else exactly as it is, including any kind of mistake or bad code.",
    "do not add any kind of missing implementation or imports, they will be handled later.",
];

const REPLY_FORMAT: &str = "Do the following:\n\
1. think: Explain what you should do and what the code does.\n\
2. code: Write the improved version of the code in a single ```python fenced block.";

/// One chat message (OpenAI format).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: String) -> Self {
        Self {
            role: role.to_string(),
            content,
        }
    }
}

/// Developer and user messages asking for `request` to be applied to `code`.
#[must_use]
pub fn build_messages(code: &str, request: &TransformationRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new("developer", DEVELOPER_PROMPT.to_string()),
        ChatMessage::new("user", user_prompt(code, request)),
    ]
}

fn user_prompt(code: &str, request: &TransformationRequest) -> String {
    let mut items: Vec<String> = request
        .requested_edits()
        .into_iter()
        .map(|edit| edit.describe().to_string())
        .collect();
    items.extend(FIXED_CLAUSES.iter().map(|c| (*c).to_string()));
    if let Some(instruction) = request
        .instruction
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty())
    {
        items.push(instruction.to_string());
    }

    let mut prompt =
        String::from("Please apply the following modifications to the following Python code:\n");
    for (index, item) in items.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {item}", index + 1);
    }

    prompt.push_str("\nHere is the code:\n```python\n");
    prompt.push_str(code);
    if !code.ends_with('\n') {
        prompt.push('\n');
    }
    prompt.push_str("```\n\n");
    prompt.push_str(REPLY_FORMAT);
    prompt
}
