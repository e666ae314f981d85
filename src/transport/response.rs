use super::headers::Headers;
use super::tls::TlsState;
use super::version::ProtocolVersion;

/// An HTTP response as a transport returns it, minus the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status line text, e.g. `"200 OK"`.
    pub status: String,
    pub status_code: u16,
    pub version: ProtocolVersion,
    pub headers: Headers,
    /// `None` when the length is unknown.
    pub content_length: Option<u64>,
    pub transfer_encoding: Vec<String>,
    pub close: bool,
    pub trailer: Headers,
    pub tls: Option<TlsState>,
}

impl Response {
    pub fn new(status_code: u16) -> Self {
        Self {
            status: status_line(status_code),
            status_code,
            version: ProtocolVersion::default(),
            headers: Headers::new(),
            content_length: None,
            transfer_encoding: Vec::new(),
            close: false,
            trailer: Headers::new(),
            tls: None,
        }
    }
}

impl<B> From<&http::Response<B>> for Response {
    fn from(resp: &http::Response<B>) -> Self {
        let headers = Headers::from(resp.headers());
        let mut response = Response::new(resp.status().as_u16());
        response.version = resp.version().into();
        response.content_length = headers
            .get("content-length")
            .and_then(|v| v.trim().parse().ok());
        response.transfer_encoding = headers
            .get_all("transfer-encoding")
            .iter()
            .flat_map(|v| v.split(','))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        response.close = headers
            .get("connection")
            .is_some_and(|v| v.eq_ignore_ascii_case("close"));
        response.headers = headers;
        response
    }
}

fn status_line(code: u16) -> String {
    let reason = http::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason());
    match reason {
        Some(reason) => format!("{code} {reason}"),
        None => code.to_string(),
    }
}
