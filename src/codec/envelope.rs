//! Binary envelope for a single error value.
//!
//! The envelope is a tagged union: a registered error keeps its type
//! identifier and its own serialized fields, anything else is flattened to
//! its message. Decoding therefore never meets a type it cannot rebuild,
//! unless the recording was made by a process that registered more types
//! than the one replaying it.

use std::sync::Arc;

use bincode::Options;
use serde::{Deserialize, Serialize};

use super::error::CodecError;
use super::known::FallbackError;
use super::registry::{concrete, ErrorRegistry};
use super::wire_format;

/// How the message of an unregistered error is rendered before storage.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackMessage {
    /// `Display` of the outermost error only.
    #[default]
    Outermost,
    /// The outermost message followed by every source, `"a: b: c"`.
    Chain,
}

/// Payload of a [`SafeErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// A registered error stored with its own fields.
    Registered { type_name: String, data: Vec<u8> },
    /// Message-only substitute for an unregistered error.
    Fallback { message: String },
}

/// Wire form of one error value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeErrorEnvelope {
    pub payload: Payload,
    /// The original error was a bare message error and decodes back into one.
    pub plain_message: bool,
}

impl SafeErrorEnvelope {
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        wire_format().serialize(self).map_err(CodecError::Encode)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        wire_format().deserialize(data).map_err(CodecError::Decode)
    }
}

/// Encodes and decodes error values against an [`ErrorRegistry`].
#[derive(Debug, Clone)]
pub struct ErrorCodec {
    registry: Arc<ErrorRegistry>,
    fallback_message: FallbackMessage,
}

impl ErrorCodec {
    pub fn new(registry: Arc<ErrorRegistry>) -> Self {
        Self {
            registry,
            fallback_message: FallbackMessage::default(),
        }
    }

    pub fn with_fallback_message(mut self, fallback_message: FallbackMessage) -> Self {
        self.fallback_message = fallback_message;
        self
    }

    pub fn registry(&self) -> &Arc<ErrorRegistry> {
        &self.registry
    }

    /// Build the envelope for `err`.
    ///
    /// Unregistered types are reduced to their message; only serializer
    /// failures are reported.
    pub fn seal(&self, err: &anyhow::Error) -> Result<SafeErrorEnvelope, CodecError> {
        let plain_message = is_plain_message(err);
        let inner = concrete(err);

        if !plain_message {
            if let Some(entry) = self.registry.find(inner) {
                if let Some(data) = entry.encode(inner) {
                    return Ok(SafeErrorEnvelope {
                        payload: Payload::Registered {
                            type_name: entry.type_name.clone(),
                            data: data.map_err(CodecError::Encode)?,
                        },
                        plain_message,
                    });
                }
            }
            tracing::debug!(
                error = %err,
                "error type not registered, recording message only"
            );
        }

        Ok(SafeErrorEnvelope {
            payload: Payload::Fallback {
                message: self.render_message(err),
            },
            plain_message,
        })
    }

    /// Rebuild the error held by `envelope`.
    pub fn open(&self, envelope: SafeErrorEnvelope) -> Result<anyhow::Error, CodecError> {
        let err = match envelope.payload {
            Payload::Registered { type_name, data } => {
                let entry = self
                    .registry
                    .get(&type_name)
                    .ok_or(CodecError::UnknownType(type_name))?;
                entry.decode(&data).map_err(CodecError::Decode)?
            }
            Payload::Fallback { message } => anyhow::Error::new(FallbackError::new(message)),
        };

        if envelope.plain_message {
            return Ok(anyhow::Error::msg(err.to_string()));
        }
        Ok(err)
    }

    /// Encode an optional error. `None` encodes to zero bytes.
    pub fn encode(&self, err: Option<&anyhow::Error>) -> Result<Vec<u8>, CodecError> {
        match err {
            None => Ok(Vec::new()),
            Some(err) => self.seal(err)?.to_bytes(),
        }
    }

    /// Decode bytes produced by [`ErrorCodec::encode`]. Zero bytes decode to
    /// `None`; any other input must be a valid envelope.
    pub fn decode(&self, data: &[u8]) -> Result<Option<anyhow::Error>, CodecError> {
        if data.is_empty() {
            return Ok(None);
        }
        let envelope = SafeErrorEnvelope::from_bytes(data)?;
        self.open(envelope).map(Some)
    }

    fn render_message(&self, err: &anyhow::Error) -> String {
        match self.fallback_message {
            FallbackMessage::Outermost => err.to_string(),
            FallbackMessage::Chain => format!("{err:#}"),
        }
    }
}

/// True for errors built from a bare message with `anyhow!` or
/// `anyhow::Error::msg`.
pub fn is_plain_message(err: &anyhow::Error) -> bool {
    let is_message = err.downcast_ref::<String>().is_some()
        || err.downcast_ref::<&'static str>().is_some();
    is_message && err.chain().count() == 1
}
