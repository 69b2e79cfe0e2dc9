//! End-to-end gateway tests over scripted backends.

use compact_str::CompactString;
use futures_util::StreamExt;
use narwhal_gateway::{Binding, Gateway, Provider, Registry};
use llm::{
    Error, FinishReason, GenerationRequest, Message, StreamEvent, StubProvider, Usage,
};

fn gateway_with(id: &str, stub: StubProvider, reasoning: bool) -> Gateway {
    let binding = Binding::new(Provider::Stub(stub), "stub-model", reasoning);
    Gateway::new(Registry::with_bindings([(CompactString::from(id), binding)]))
}

#[tokio::test]
async fn stream_scenario_delivers_text_and_stub_usage() {
    let stub = StubProvider::streaming(&["Hi", " there"], FinishReason::Stop, Usage::new(1, 2));
    let gateway = gateway_with("chat-model", stub, false);

    let request = GenerationRequest::new("chat-model").message(Message::user("hello"));
    let events: Vec<StreamEvent> = gateway
        .stream(&request)
        .map(|event| event.unwrap())
        .collect()
        .await;

    let text: String = events
        .iter()
        .filter_map(|event| event.value())
        .collect();
    assert_eq!(text, "Hi there");

    // Vendor-reported usage takes precedence over recomputation.
    assert_eq!(
        *events.last().unwrap(),
        StreamEvent::done(FinishReason::Stop, Usage::new(1, 2))
    );
}

#[tokio::test]
async fn stream_events_are_deltas_then_exactly_one_terminal() {
    let stub = StubProvider::streaming(&["a", "b", "c"], FinishReason::Stop, Usage::new(1, 1));
    let gateway = gateway_with("chat-model", stub, false);

    let request = GenerationRequest::new("chat-model").message(Message::user("hello"));
    let events: Vec<_> = gateway.stream(&request).collect().await;

    let terminals: Vec<usize> = events
        .iter()
        .enumerate()
        .filter_map(|(index, event)| match event {
            Ok(e) if e.is_terminal() => Some(index),
            Err(_) => Some(index),
            _ => None,
        })
        .collect();
    assert_eq!(terminals, vec![events.len() - 1]);
}

#[tokio::test]
async fn unknown_model_fails_generate_and_stream() {
    let stub = StubProvider::streaming(&["x"], FinishReason::Stop, Usage::new(1, 1));
    let gateway = gateway_with("chat-model", stub, false);

    let request = GenerationRequest::new("nonexistent-model").message(Message::user("hello"));
    let err = gateway.generate(&request).await.unwrap_err();
    assert!(matches!(err, Error::UnknownModel(_)));

    let events: Vec<_> = gateway.stream(&request).collect().await;
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Err(Error::UnknownModel(_))));
}

#[tokio::test]
async fn generate_prefers_vendor_usage() {
    let stub = StubProvider::streaming(&["Hi", " there"], FinishReason::Stop, Usage::new(7, 9));
    let gateway = gateway_with("chat-model", stub, false);

    let request = GenerationRequest::new("chat-model").message(Message::user("hello"));
    let result = gateway.generate(&request).await.unwrap();
    assert_eq!(result.text, "Hi there");
    assert_eq!(result.usage, Usage::new(7, 9));
}

#[tokio::test]
async fn missing_vendor_usage_is_recomputed() {
    let stub = StubProvider::streaming(&["Hi", " there"], FinishReason::Stop, Usage::default());
    let gateway = gateway_with("chat-model", stub, false);

    let request = GenerationRequest::new("chat-model").message(Message::user("hello"));
    let result = gateway.generate(&request).await.unwrap();

    // Recomputed through the tokenizer service; both sides are non-empty
    // text, so both counts come out non-zero.
    assert!(result.usage.prompt_tokens >= 1);
    assert!(result.usage.completion_tokens >= 1);
}

#[tokio::test]
async fn reasoning_binding_splits_the_stream() {
    let stub = StubProvider::streaming(
        &["<thi", "nk>plan</think>answer"],
        FinishReason::Stop,
        Usage::new(1, 2),
    );
    let gateway = gateway_with("chat-model-reasoning", stub, true);

    let request = GenerationRequest::new("chat-model-reasoning").message(Message::user("hello"));
    let events: Vec<StreamEvent> = gateway
        .stream(&request)
        .map(|event| event.unwrap())
        .collect()
        .await;

    let text: String = events.iter().filter_map(|event| event.value()).collect();
    let reasoning: String = events
        .iter()
        .filter_map(|event| event.reasoning_content())
        .collect();
    assert_eq!(text, "answer");
    assert_eq!(reasoning, "plan");
}

#[tokio::test]
async fn system_prompt_is_prepended_for_the_backend() {
    let stub = StubProvider::streaming(&["ok"], FinishReason::Stop, Usage::new(1, 1));
    let gateway = gateway_with("chat-model", stub.clone(), false);

    let request = GenerationRequest::new("chat-model")
        .system_prompt("be terse")
        .message(Message::user("hello"));
    gateway.generate(&request).await.unwrap();

    let seen = stub.last_messages().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], Message::system("be terse"));
    assert_eq!(seen[1], Message::user("hello"));
}

#[tokio::test]
async fn abandoning_a_stream_closes_the_vendor_connection() {
    let stub = StubProvider::streaming(
        &["a", "b", "c", "d"],
        FinishReason::Stop,
        Usage::new(1, 1),
    );
    let gateway = gateway_with("chat-model", stub.clone(), false);

    let request = GenerationRequest::new("chat-model").message(Message::user("hello"));
    {
        let mut stream = Box::pin(gateway.stream(&request));
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.value(), Some("a"));
        assert!(!stub.closed());
        // Consumer disconnects here; the stream drops.
    }
    assert!(stub.closed());
}

#[tokio::test]
async fn backend_failure_preserves_prior_deltas() {
    let stub = StubProvider::failing_after(&["partial"], "connection reset");
    let gateway = gateway_with("chat-model", stub, false);

    let request = GenerationRequest::new("chat-model").message(Message::user("hello"));
    let events: Vec<_> = gateway.stream(&request).collect().await;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].as_ref().unwrap().value(), Some("partial"));
    assert!(matches!(events[1], Err(Error::Protocol(_))));
}
