use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed event frame: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode event frame: {0}")]
    Encode(#[source] serde_json::Error),
}
