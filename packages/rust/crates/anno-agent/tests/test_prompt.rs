//! Prompt construction from transformation requests.

use anno_agent::build_messages;
use anno_edit::TransformationRequest;

const CODE: &str = "def f(x):\n    return x\n";

#[test]
fn test_developer_then_user() {
    let messages = build_messages(CODE, &TransformationRequest::default());
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, "developer");
    assert_eq!(
        messages[0].content,
        "You are a Python expert. Follow the instructions of the user."
    );
    assert_eq!(messages[1].role, "user");
}

#[test]
fn test_default_request_lists_types_and_docs() {
    let messages = build_messages(CODE, &TransformationRequest::default());
    let user = &messages[1].content;

    assert!(user.contains("1. add type annotations whenever necessary."));
    assert!(user.contains("2. add google style doc-strings whenever necessary."));
    assert!(user.contains(
        "3. leave everything else exactly as it is, including any kind of mistake or bad code."
    ));
    assert!(user.contains(
        "4. do not add any kind of missing implementation or imports, they will be handled later."
    ));
    assert!(!user.contains("comments"));
    assert!(user.contains("```python\ndef f(x):\n    return x\n```"));
}

#[test]
fn test_delete_request() {
    let request = TransformationRequest {
        comments: true,
        format: true,
        delete: true,
        ..Default::default()
    };
    let user = &build_messages(CODE, &request)[1].content;

    assert!(user.contains("remove type annotations whenever possible."));
    assert!(user.contains("remove doc-strings whenever possible."));
    assert!(user.contains("remove comments whenever possible."));
    assert!(!user.contains("formatting"));
}

#[test]
fn test_instruction_follows_fixed_clauses() {
    let request = TransformationRequest {
        instruction: Some("  use PEP 604 unions  ".to_string()),
        ..Default::default()
    };
    let user = &build_messages(CODE, &request)[1].content;

    let clause = user
        .find("do not add any kind of missing implementation")
        .expect("fixed clause");
    let instruction = user.find("5. use PEP 604 unions\n").expect("instruction");
    assert!(clause < instruction);
}

#[test]
fn test_blank_instruction_is_dropped() {
    let request = TransformationRequest {
        instruction: Some("   ".to_string()),
        ..Default::default()
    };
    let user = &build_messages(CODE, &request)[1].content;
    assert!(!user.contains("5. "));
}
