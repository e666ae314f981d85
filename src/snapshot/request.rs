use serde::{Deserialize, Serialize};
use url::Url;

use super::failure::fail;
use super::EncodedError;
use crate::codec::{CodecError, ErrorCodec};
use crate::transport::{FormValues, Headers, ProtocolVersion, Request, TlsState};

/// Serializable copy of a [`Request`] together with its drained body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSnapshot {
    pub method: String,
    /// Always the serialized form of a parsed URL when captured.
    pub url: String,
    pub version: ProtocolVersion,
    pub headers: Headers,
    pub content_length: Option<u64>,
    pub transfer_encoding: Vec<String>,
    pub close: bool,
    pub host: String,
    pub form: FormValues,
    pub post_form: FormValues,
    pub trailer: Headers,
    pub remote_addr: String,
    pub request_uri: String,
    pub tls: Option<TlsState>,
    pub body: Vec<u8>,
    /// Error returned while reading `body`.
    pub body_error: EncodedError,
}

impl RequestSnapshot {
    /// Snapshot `req`. An absent request yields an absent snapshot.
    ///
    /// `body` must already hold everything that could be read from the
    /// request body, and `body_error` whatever ended that read early.
    pub fn capture(
        req: Option<&Request>,
        body: &[u8],
        body_error: Option<&anyhow::Error>,
        codec: &ErrorCodec,
    ) -> Result<Option<Self>, CodecError> {
        let Some(req) = req else {
            return Ok(None);
        };
        Ok(Some(Self {
            method: req.method.clone(),
            url: req.url.to_string(),
            version: req.version,
            headers: req.headers.clone(),
            content_length: req.content_length,
            transfer_encoding: req.transfer_encoding.clone(),
            close: req.close,
            host: req.host.clone(),
            form: req.form.clone(),
            post_form: req.post_form.clone(),
            trailer: req.trailer.clone(),
            remote_addr: req.remote_addr.clone(),
            request_uri: req.request_uri.clone(),
            tls: req.tls.clone(),
            body: body.to_vec(),
            body_error: EncodedError::encode(body_error, codec)?,
        }))
    }

    /// Rebuild the live request.
    ///
    /// # Panics
    ///
    /// Unwinds with a [`ReplayFailure`](super::ReplayFailure) when the stored
    /// URL does not parse.
    pub fn reconstruct(&self) -> Request {
        let url = match Url::parse(&self.url) {
            Ok(url) => url,
            Err(err) => fail("request url", &self.url, err),
        };
        Request {
            method: self.method.clone(),
            url,
            version: self.version,
            headers: self.headers.clone(),
            content_length: self.content_length,
            transfer_encoding: self.transfer_encoding.clone(),
            close: self.close,
            host: self.host.clone(),
            form: self.form.clone(),
            post_form: self.post_form.clone(),
            trailer: self.trailer.clone(),
            remote_addr: self.remote_addr.clone(),
            request_uri: self.request_uri.clone(),
            tls: self.tls.clone(),
        }
    }

    pub fn body_error(&self, codec: &ErrorCodec) -> Result<Option<anyhow::Error>, CodecError> {
        self.body_error.decode(codec)
    }

    /// Drop the TLS descriptor, for recordings made without TLS capture.
    pub fn without_tls(mut self) -> Self {
        self.tls = None;
        self
    }
}
