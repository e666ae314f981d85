use serde::{Deserialize, Serialize};

use super::EncodedError;
use crate::codec::{CodecError, ErrorCodec};
use crate::transport::{Headers, ProtocolVersion, Response, TlsState};

/// Serializable copy of a [`Response`] together with its drained body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    pub status: String,
    pub status_code: u16,
    pub version: ProtocolVersion,
    pub headers: Headers,
    pub content_length: Option<u64>,
    pub transfer_encoding: Vec<String>,
    pub close: bool,
    pub trailer: Headers,
    pub tls: Option<TlsState>,
    pub body: Vec<u8>,
    /// Error returned while reading `body`.
    pub body_error: EncodedError,
}

impl ResponseSnapshot {
    /// Snapshot `resp`. An absent response yields an absent snapshot.
    pub fn capture(
        resp: Option<&Response>,
        body: &[u8],
        body_error: Option<&anyhow::Error>,
        codec: &ErrorCodec,
    ) -> Result<Option<Self>, CodecError> {
        let Some(resp) = resp else {
            return Ok(None);
        };
        Ok(Some(Self {
            status: resp.status.clone(),
            status_code: resp.status_code,
            version: resp.version,
            headers: resp.headers.clone(),
            content_length: resp.content_length,
            transfer_encoding: resp.transfer_encoding.clone(),
            close: resp.close,
            trailer: resp.trailer.clone(),
            tls: resp.tls.clone(),
            body: body.to_vec(),
            body_error: EncodedError::encode(body_error, codec)?,
        }))
    }

    pub fn reconstruct(&self) -> Response {
        Response {
            status: self.status.clone(),
            status_code: self.status_code,
            version: self.version,
            headers: self.headers.clone(),
            content_length: self.content_length,
            transfer_encoding: self.transfer_encoding.clone(),
            close: self.close,
            trailer: self.trailer.clone(),
            tls: self.tls.clone(),
        }
    }

    pub fn body_error(&self, codec: &ErrorCodec) -> Result<Option<anyhow::Error>, CodecError> {
        self.body_error.decode(codec)
    }

    pub fn without_tls(mut self) -> Self {
        self.tls = None;
        self
    }
}
