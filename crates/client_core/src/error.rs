use shared::error::ProtocolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("realtime channel is closed")]
    Closed,
    #[error("invalid channel url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to connect websocket {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("failed to emit '{event}': {source}")]
    Emit {
        event: &'static str,
        #[source]
        source: ChannelError,
    },
}

impl ChatError {
    pub fn emit(event: &'static str, source: ChannelError) -> Self {
        Self::Emit { event, source }
    }

    pub fn is_channel_closed(&self) -> bool {
        matches!(
            self,
            Self::Emit {
                source: ChannelError::Closed,
                ..
            }
        )
    }
}
