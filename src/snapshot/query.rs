use bincode::Options;
use serde::{Deserialize, Serialize};

use super::body::ReplayBody;
use super::request::RequestSnapshot;
use super::response::ResponseSnapshot;
use super::{EncodedError, SnapshotError};
use crate::codec::{wire_format, CodecError, ErrorCodec};
use crate::transport::{Request, Response};

/// One complete exchange with a transport: what was sent, what came back,
/// and what went wrong along the way.
///
/// Recording captures one of these; replaying hands an equivalent one back.
#[derive(Debug, Default)]
pub struct Interaction {
    pub request: Option<Request>,
    pub request_body: Vec<u8>,
    pub request_body_error: Option<anyhow::Error>,
    pub response: Option<Response>,
    pub response_body: Vec<u8>,
    pub response_body_error: Option<anyhow::Error>,
    /// Error returned by the round trip itself.
    pub error: Option<anyhow::Error>,
}

impl Interaction {
    /// Exchange that produced a response.
    pub fn completed(request: Request, response: Response, response_body: Vec<u8>) -> Self {
        Self {
            request: Some(request),
            response: Some(response),
            response_body,
            ..Self::default()
        }
    }

    /// Exchange whose round trip failed before any response arrived.
    pub fn failed(request: Request, error: anyhow::Error) -> Self {
        Self {
            request: Some(request),
            error: Some(error),
            ..Self::default()
        }
    }

    /// Take the response body as a reader that replays the recorded read
    /// error after the data.
    pub fn take_response_body(&mut self) -> ReplayBody {
        ReplayBody::new(
            std::mem::take(&mut self.response_body),
            self.response_body_error.take(),
        )
    }

    /// Request body counterpart of [`Interaction::take_response_body`].
    pub fn take_request_body(&mut self) -> ReplayBody {
        ReplayBody::new(
            std::mem::take(&mut self.request_body),
            self.request_body_error.take(),
        )
    }
}

/// Unit of storage for one recorded [`Interaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySnapshot {
    pub request: Option<RequestSnapshot>,
    pub response: Option<ResponseSnapshot>,
    /// Round-trip error; empty when the exchange succeeded.
    pub error: EncodedError,
}

impl QuerySnapshot {
    pub fn capture(interaction: &Interaction, codec: &ErrorCodec) -> Result<Self, CodecError> {
        Ok(Self {
            request: RequestSnapshot::capture(
                interaction.request.as_ref(),
                &interaction.request_body,
                interaction.request_body_error.as_ref(),
                codec,
            )?,
            response: ResponseSnapshot::capture(
                interaction.response.as_ref(),
                &interaction.response_body,
                interaction.response_body_error.as_ref(),
                codec,
            )?,
            error: EncodedError::encode(interaction.error.as_ref(), codec)?,
        })
    }

    /// Rebuild the recorded interaction. Either every part is rebuilt or an
    /// error is returned; there is no partial result.
    ///
    /// # Panics
    ///
    /// Unwinds with a [`ReplayFailure`](super::ReplayFailure) when the stored
    /// request URL does not parse.
    pub fn reconstruct(&self, codec: &ErrorCodec) -> Result<Interaction, CodecError> {
        let mut interaction = Interaction::default();

        if let Some(request) = &self.request {
            interaction.request = Some(request.reconstruct());
            interaction.request_body = request.body.clone();
            interaction.request_body_error = request.body_error(codec)?;
        }

        if let Some(response) = &self.response {
            interaction.response = Some(response.reconstruct());
            interaction.response_body = response.body.clone();
            interaction.response_body_error = response.body_error(codec)?;
        }

        interaction.error = self.error.decode(codec)?;
        Ok(interaction)
    }

    /// Drop TLS descriptors from both sides.
    pub fn without_tls(self) -> Self {
        Self {
            request: self.request.map(RequestSnapshot::without_tls),
            response: self.response.map(ResponseSnapshot::without_tls),
            error: self.error,
        }
    }

    /// Serialize for the storage layer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        wire_format().serialize(self).map_err(SnapshotError::Serialize)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, SnapshotError> {
        wire_format().deserialize(data).map_err(SnapshotError::Deserialize)
    }
}
