//! Record and replay HTTP interactions, transport errors included.
//!
//! A transport hands over a request, a response and an error; [`Recorder`]
//! turns them into bytes for storage and back into an [`Interaction`] that a
//! consumer cannot tell apart from a live one. Errors are stored through the
//! [`codec`], which keeps registered error types intact and reduces the rest
//! to their messages so that any recording stays readable.

pub mod codec;
pub mod config;
pub mod recorder;
pub mod snapshot;
pub mod transport;

pub use codec::{CodecError, ErrorCodec, ErrorRegistry, FallbackError, RecordableError};
pub use config::Config;
pub use recorder::Recorder;
pub use snapshot::{
    Interaction, QuerySnapshot, ReplayBody, ReplayFailure, RequestSnapshot, ResponseSnapshot,
    SnapshotError,
};
pub use transport::{Request, Response};
