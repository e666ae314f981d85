use dvr::transport::{FormValues, Headers, ProtocolVersion, Request, Response, TlsState};
use serde::{Deserialize, Serialize};
use url::Url;

/// Error type unknown to the default registry.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct CustomError(pub String);

/// Application error with structured fields, registered by some tests only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("upstream {service} rejected request {request_id} with code {code}")]
pub struct UpstreamRejected {
    pub service: String,
    pub request_id: String,
    pub code: u32,
}

pub fn sample_tls() -> TlsState {
    TlsState {
        version: TlsState::TLS_13,
        handshake_complete: true,
        did_resume: true,
        cipher_suite: 0x1301,
        negotiated_protocol: Some("h2".to_string()),
        server_name: "api.example.com".to_string(),
        peer_certificates: vec![vec![0x30, 0x82, 0x01, 0x0a], vec![0x30, 0x82, 0x02, 0x0b]],
    }
}

pub fn full_request() -> Request {
    let mut headers = Headers::new();
    headers.append("Accept", "application/json");
    headers.append("Accept", "text/plain");
    headers.insert("X-Request-Id", "req-0001");

    let mut trailer = Headers::new();
    trailer.insert("X-Checksum", "c0ffee");

    let mut form = FormValues::new();
    form.append("q", "query-value");
    form.append("q", "body-value");
    let mut post_form = FormValues::new();
    post_form.append("q", "body-value");

    Request {
        method: "PATCH".to_string(),
        url: Url::parse("https://user:pw@api.example.com:8443/v2/items/9?q=query-value#frag")
            .unwrap(),
        version: ProtocolVersion::new(2, 0),
        headers,
        content_length: Some(20),
        transfer_encoding: vec!["chunked".to_string()],
        close: true,
        host: "api.example.com:8443".to_string(),
        form,
        post_form,
        trailer,
        remote_addr: "192.0.2.10:53211".to_string(),
        request_uri: "/v2/items/9?q=query-value".to_string(),
        tls: Some(sample_tls()),
    }
}

pub fn full_response() -> Response {
    let mut headers = Headers::new();
    headers.insert("Content-Type", "application/json");
    headers.append("Set-Cookie", "a=1");
    headers.append("Set-Cookie", "b=2");

    let mut trailer = Headers::new();
    trailer.insert("Grpc-Status", "0");

    Response {
        status: "207 Multi-Status".to_string(),
        status_code: 207,
        version: ProtocolVersion::HTTP_10,
        headers,
        content_length: Some(31),
        transfer_encoding: vec!["gzip".to_string(), "chunked".to_string()],
        close: true,
        trailer,
        tls: Some(sample_tls()),
    }
}
