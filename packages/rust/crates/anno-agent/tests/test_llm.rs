//! Reply parsing of the LLM generator.

use anno_agent::{extract_code_block, parse_reply};

#[test]
fn test_parse_reply_first_choice() {
    let body = r#"{"choices":[{"message":{"role":"assistant","content":"hello"},"finish_reason":"stop"}]}"#;
    assert_eq!(parse_reply(body).expect("reply"), "hello");
}

#[test]
fn test_parse_reply_without_choices() {
    let err = parse_reply(r#"{"choices":[]}"#).expect_err("no choices");
    assert_eq!(err.message(), "LLM response has no choices");
}

#[test]
fn test_parse_reply_garbage() {
    assert!(parse_reply("<html>bad gateway</html>").is_err());
}

#[test]
fn test_think_then_code() {
    let reply = "think:\nThe function lacks types.\n\ncode:\n```python\ndef f(x: int) -> int:\n    return x\n```\n";
    assert_eq!(
        extract_code_block(reply).as_deref(),
        Some("def f(x: int) -> int:\n    return x\n")
    );
}

#[test]
fn test_fence_without_language() {
    assert_eq!(extract_code_block("```\nx = 1\n```").as_deref(), Some("x = 1\n"));
}

#[test]
fn test_backticks_inside_body_do_not_close() {
    let reply = concat!(
        "code:\n```python\n",
        "def f():\n",
        "    \"\"\"Usage:\n\n",
        "    ```py\n",
        "    f()  # returns ``` literally\n",
        "    ```\n",
        "    \"\"\"\n",
        "```\n",
    );
    assert_eq!(
        extract_code_block(reply).as_deref(),
        Some("def f():\n    \"\"\"Usage:\n\n    ```py\n    f()  # returns ``` literally\n    ```\n    \"\"\"\n")
    );
}

#[test]
fn test_empty_block() {
    assert_eq!(extract_code_block("```python\n```\n").as_deref(), Some(""));
}
