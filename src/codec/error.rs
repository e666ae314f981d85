use thiserror::Error;

/// Failure while encoding or decoding an error envelope.
///
/// Unregistered error types never produce one of these: they degrade to a
/// message-only payload instead.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to encode error envelope: {0}")]
    Encode(#[source] bincode::Error),
    #[error("Failed to decode error envelope: {0}")]
    Decode(#[source] bincode::Error),
    #[error("Error type not registered with this decoder: {0}")]
    UnknownType(String),
}
