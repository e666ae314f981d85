use serde::{Deserialize, Serialize};

/// Details of the TLS session a request or response travelled over.
///
/// Transports that cannot introspect their TLS sessions leave this unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsState {
    /// Protocol version code, e.g. `0x0304` for TLS 1.3.
    pub version: u16,
    pub handshake_complete: bool,
    pub did_resume: bool,
    /// IANA cipher suite identifier.
    pub cipher_suite: u16,
    /// ALPN protocol agreed with the peer.
    pub negotiated_protocol: Option<String>,
    /// SNI host name.
    pub server_name: String,
    /// DER-encoded certificates presented by the peer, leaf first.
    pub peer_certificates: Vec<Vec<u8>>,
}

impl TlsState {
    pub const TLS_12: u16 = 0x0303;
    pub const TLS_13: u16 = 0x0304;
}
