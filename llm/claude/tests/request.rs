//! Tests for the Messages API request body.

use llm::{Message, Role};
use narwhal_claude::Request;

#[test]
fn system_messages_lift_into_the_system_field() {
    let req = Request::new(
        "claude-3-5-sonnet-20241022",
        &[
            Message::system("be terse"),
            Message::user("hi"),
            Message::assistant("hello"),
        ],
    );

    assert_eq!(req.system.as_deref(), Some("be terse"));
    assert_eq!(req.messages.len(), 2);
    assert_eq!(req.messages[0].role, Role::User);
    assert_eq!(req.messages[1].role, Role::Assistant);
}

#[test]
fn multiple_system_messages_join_with_newlines() {
    let req = Request::new(
        "claude-3-opus-20240229",
        &[
            Message::system("one"),
            Message::system("two"),
            Message::user("hi"),
        ],
    );
    assert_eq!(req.system.as_deref(), Some("one\ntwo"));
}

#[test]
fn empty_conversation_falls_back_to_hello() {
    let req = Request::new("claude-3-haiku-20240307", &[]);
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.messages[0].role, Role::User);
    assert_eq!(req.messages[0].content, "Hello");
}

#[test]
fn system_only_conversation_still_gets_a_user_message() {
    let req = Request::new("claude-3-haiku-20240307", &[Message::system("be terse")]);
    assert_eq!(req.system.as_deref(), Some("be terse"));
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.messages[0].content, "Hello");
}

#[test]
fn empty_content_is_sent_as_a_space() {
    let req = Request::new("claude-3-haiku-20240307", &[Message::user("")]);
    assert_eq!(req.messages[0].content, " ");
}

#[test]
fn max_tokens_is_always_present() {
    let req = Request::new("claude-3-haiku-20240307", &[Message::user("hi")]);
    let body = serde_json::to_value(&req).unwrap();
    assert!(body["max_tokens"].as_u64().unwrap() > 0);
    assert!(body.get("stream").is_none());
}

#[test]
fn stream_sets_the_stream_flag() {
    let req = Request::new("claude-3-haiku-20240307", &[Message::user("hi")]).stream();
    assert_eq!(req.stream, Some(true));
}
