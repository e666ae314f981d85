//! Error codec: stores error values so that any process linking this crate
//! can read them back.
//!
//! Registered types keep their concrete type across a round trip. Anything
//! else is reduced to its message and comes back as a [`FallbackError`].

mod envelope;
mod error;
pub mod known;
mod registry;

pub use envelope::{is_plain_message, ErrorCodec, FallbackMessage, Payload, SafeErrorEnvelope};
pub use error::CodecError;
pub use known::{
    AddrError, ConnectError, DnsError, FallbackError, ProtocolError, TimeoutError, UrlError,
};
pub use registry::{ErrorRegistry, RecordableError};

/// bincode settings for everything this crate stores: the layout of
/// `bincode::serialize`, with trailing input rejected on read.
pub(crate) fn wire_format() -> impl bincode::Options {
    use bincode::Options;

    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}
