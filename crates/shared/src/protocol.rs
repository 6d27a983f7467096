use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Outbound chat message as emitted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub message: String,
    pub author: String,
    pub author_uid: String,
}

/// Chat message as broadcast back by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub message: String,
    pub author: String,
}

/// Events the client emits on the realtime channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    Message(OutgoingMessage),
    Typing(String),
    StopTyping,
}

/// Events the client listens for on the realtime channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    Message(IncomingMessage),
    Typing(String),
    StopTyping,
    /// Sender exceeded the server's message rate and is muted for a while.
    Spam,
    #[serde(rename = "time_out_finished")]
    TimeOutFinished,
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::Typing(_) => "typing",
            Self::StopTyping => "stop-typing",
        }
    }

    pub fn to_frame(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::Typing(_) => "typing",
            Self::StopTyping => "stop-typing",
            Self::Spam => "spam",
            Self::TimeOutFinished => "time_out_finished",
        }
    }

    pub fn from_frame(frame: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(frame).map_err(ProtocolError::Decode)
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
