//! Live-shaped HTTP values, as handed over by a transport when recording and
//! handed back to consumers when replaying.

mod headers;
mod request;
mod response;
mod tls;
mod version;

pub use headers::{FormValues, Headers};
pub use request::Request;
pub use response::Response;
pub use tls::TlsState;
pub use version::ProtocolVersion;
