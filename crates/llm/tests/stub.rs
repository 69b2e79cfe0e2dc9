//! Tests for the scripted stub backend.

use futures_util::StreamExt;
use narwhal_llm::{Error, FinishReason, LLM, Message, StreamEvent, StubProvider, Usage};

#[tokio::test]
async fn stream_replays_script_then_done() {
    let stub = StubProvider::streaming(&["Hi", " there"], FinishReason::Stop, Usage::new(1, 2));
    let events: Vec<_> = stub.stream("stub-model", &[]).collect().await;

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].as_ref().unwrap().value(), Some("Hi"));
    assert_eq!(events[1].as_ref().unwrap().value(), Some(" there"));
    match events[2].as_ref().unwrap() {
        StreamEvent::Done {
            finish_reason,
            usage,
        } => {
            assert_eq!(*finish_reason, FinishReason::Stop);
            assert_eq!(*usage, Usage::new(1, 2));
        }
        other => panic!("expected Done, got {other:?}"),
    }
}

#[tokio::test]
async fn nothing_follows_the_terminal_event() {
    let stub = StubProvider::streaming(&["a", "b"], FinishReason::Stop, Usage::default());
    let events: Vec<_> = stub.stream("stub-model", &[]).collect().await;

    let terminal = events
        .iter()
        .position(|event| matches!(event, Ok(e) if e.is_terminal()) || event.is_err())
        .expect("a terminal item");
    assert_eq!(terminal, events.len() - 1);
}

#[tokio::test]
async fn failing_script_ends_with_a_single_error() {
    let stub = StubProvider::failing_after(&["partial"], "connection reset");
    let events: Vec<_> = stub.stream("stub-model", &[]).collect().await;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].as_ref().unwrap().value(), Some("partial"));
    assert!(matches!(events[1], Err(Error::Protocol(_))));
}

#[tokio::test]
async fn dropping_the_stream_closes_the_connection() {
    let stub = StubProvider::streaming(&["a", "b", "c"], FinishReason::Stop, Usage::default());
    {
        let mut stream = Box::pin(stub.stream("stub-model", &[]));
        let first = stream.next().await.expect("first event").unwrap();
        assert_eq!(first.value(), Some("a"));
        assert!(!stub.closed());
    }
    assert!(stub.closed());
}

#[tokio::test]
async fn generate_collects_the_script() {
    let stub = StubProvider::streaming(&["Hi", " there"], FinishReason::Stop, Usage::new(1, 2));
    let result = stub
        .generate("stub-model", &[Message::user("hello")])
        .await
        .unwrap();

    assert_eq!(result.text, "Hi there");
    assert_eq!(result.finish_reason, FinishReason::Stop);
    assert_eq!(result.usage, Usage::new(1, 2));
    assert_eq!(stub.calls(), 1);
    assert_eq!(stub.last_messages().unwrap()[0], Message::user("hello"));
}
