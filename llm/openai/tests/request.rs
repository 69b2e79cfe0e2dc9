//! Tests for the OpenAI-compatible request body.

use llm::{ContentPart, Message, Role};
use narwhal_openai::Request;

fn message_with_parts(role: Role, parts: &[&str]) -> Message {
    Message {
        role,
        content: parts.iter().map(|part| ContentPart::text(*part)).collect(),
    }
}

#[test]
fn request_sets_model() {
    let req = Request::new("gpt-4", &[Message::user("hi")]);
    assert_eq!(req.model, "gpt-4");
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.messages[0].content, "hi");
}

#[test]
fn multi_part_content_flattens_without_separator() {
    let message = message_with_parts(Role::User, &["foo", "bar", "baz"]);
    let req = Request::new("gpt-4", &[message]);
    assert_eq!(req.messages[0].content, "foobarbaz");
}

#[test]
fn empty_conversation_falls_back_to_hello() {
    let req = Request::new("gpt-4", &[]);
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.messages[0].role, Role::User);
    assert_eq!(req.messages[0].content, "Hello");
}

#[test]
fn empty_content_is_sent_as_a_space() {
    let message = message_with_parts(Role::Assistant, &[""]);
    let req = Request::new("gpt-4", &[message]);
    assert_eq!(req.messages[0].content, " ");
}

#[test]
fn stream_requests_the_usage_chunk() {
    let req = Request::new("gpt-4", &[Message::user("hi")]).stream();
    assert_eq!(req.stream, Some(true));
    let opts = req.stream_options.expect("stream_options");
    assert_eq!(opts["include_usage"], true);
}

#[test]
fn non_streaming_request_omits_stream_fields() {
    let req = Request::new("gpt-4", &[Message::user("hi")]);
    let body = serde_json::to_value(&req).unwrap();
    assert!(body.get("stream").is_none());
    assert!(body.get("stream_options").is_none());
}

#[test]
fn roles_serialize_to_wire_names() {
    let req = Request::new(
        "gpt-4",
        &[
            Message::system("be terse"),
            Message::user("hi"),
            Message::assistant("hello"),
        ],
    );
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][2]["role"], "assistant");
}
