//! Serializable snapshots of HTTP exchanges.
//!
//! A [`QuerySnapshot`] holds everything needed to hand a consumer the same
//! request, response, bodies and errors that a live transport produced,
//! without touching the network again.

mod body;
mod failure;
mod query;
mod request;
mod response;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{CodecError, ErrorCodec};

pub use body::ReplayBody;
pub use failure::ReplayFailure;
pub use query::{Interaction, QuerySnapshot};
pub use request::RequestSnapshot;
pub use response::ResponseSnapshot;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[source] bincode::Error),
    #[error("Failed to deserialize snapshot: {0}")]
    Deserialize(#[source] bincode::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Error envelope bytes as produced by [`ErrorCodec::encode`]. Empty means
/// no error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedError(Vec<u8>);

impl EncodedError {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn encode(err: Option<&anyhow::Error>, codec: &ErrorCodec) -> Result<Self, CodecError> {
        codec.encode(err).map(Self)
    }

    pub fn decode(&self, codec: &ErrorCodec) -> Result<Option<anyhow::Error>, CodecError> {
        codec.decode(&self.0)
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
