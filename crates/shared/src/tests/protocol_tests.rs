use super::*;
use serde_json::json;

#[test]
fn outgoing_message_frame_uses_event_name_and_author_uid() {
    let event = ClientEvent::Message(OutgoingMessage {
        message: "hi".to_string(),
        author: "Alice".to_string(),
        author_uid: "uid123".to_string(),
    });

    let value: serde_json::Value =
        serde_json::from_str(&event.to_frame().expect("encode")).expect("json");
    assert_eq!(
        value,
        json!({
            "event": "message",
            "data": { "message": "hi", "author": "Alice", "author_uid": "uid123" }
        })
    );
}

#[test]
fn stop_typing_frame_has_no_payload() {
    let value: serde_json::Value =
        serde_json::from_str(&ClientEvent::StopTyping.to_frame().expect("encode")).expect("json");
    assert_eq!(value, json!({ "event": "stop-typing" }));
}

#[test]
fn typing_frame_carries_bare_username() {
    let value: serde_json::Value = serde_json::from_str(
        &ClientEvent::Typing("Alice".to_string())
            .to_frame()
            .expect("encode"),
    )
    .expect("json");
    assert_eq!(value, json!({ "event": "typing", "data": "Alice" }));
}

#[test]
fn decodes_inbound_events() {
    assert_eq!(
        ServerEvent::from_frame(r#"{"event":"message","data":{"message":"hello","author":"Bob"}}"#)
            .expect("message"),
        ServerEvent::Message(IncomingMessage {
            message: "hello".to_string(),
            author: "Bob".to_string(),
        })
    );
    assert_eq!(
        ServerEvent::from_frame(r#"{"event":"typing","data":"Bob"}"#).expect("typing"),
        ServerEvent::Typing("Bob".to_string())
    );
    assert_eq!(
        ServerEvent::from_frame(r#"{"event":"stop-typing"}"#).expect("stop-typing"),
        ServerEvent::StopTyping
    );
    assert_eq!(
        ServerEvent::from_frame(r#"{"event":"spam"}"#).expect("spam"),
        ServerEvent::Spam
    );
    assert_eq!(
        ServerEvent::from_frame(r#"{"event":"time_out_finished"}"#).expect("timeout"),
        ServerEvent::TimeOutFinished
    );
}

#[test]
fn rejects_unknown_event_names() {
    let err = ServerEvent::from_frame(r#"{"event":"presence","data":"Bob"}"#)
        .expect_err("unknown event");
    assert!(matches!(err, ProtocolError::Decode(_)));
}

#[test]
fn event_names_match_wire_names() {
    assert_eq!(ClientEvent::StopTyping.name(), "stop-typing");
    assert_eq!(ServerEvent::TimeOutFinished.name(), "time_out_finished");
}
