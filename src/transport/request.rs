use url::Url;

use super::headers::{FormValues, Headers};
use super::tls::TlsState;
use super::version::ProtocolVersion;

/// An HTTP request as a transport sends or receives it, minus the body.
///
/// Bodies travel separately since they have to be drained before a request
/// can be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub url: Url,
    pub version: ProtocolVersion,
    pub headers: Headers,
    /// `None` when the length is unknown.
    pub content_length: Option<u64>,
    pub transfer_encoding: Vec<String>,
    /// Close the connection after this exchange.
    pub close: bool,
    pub host: String,
    /// Query and body form fields, once parsed.
    pub form: FormValues,
    /// Body form fields only, once parsed.
    pub post_form: FormValues,
    pub trailer: Headers,
    pub remote_addr: String,
    /// Request target exactly as it appeared on the request line.
    pub request_uri: String,
    pub tls: Option<TlsState>,
}

impl Request {
    /// Request for `url` with the host taken from it and every other field
    /// at its default.
    pub fn new(method: impl Into<String>, url: Url) -> Self {
        let host = host_of(&url);
        Self {
            method: method.into(),
            url,
            version: ProtocolVersion::default(),
            headers: Headers::new(),
            content_length: None,
            transfer_encoding: Vec::new(),
            close: false,
            host,
            form: FormValues::new(),
            post_form: FormValues::new(),
            trailer: Headers::new(),
            remote_addr: String::new(),
            request_uri: String::new(),
            tls: None,
        }
    }

    /// Fill `form` from the URL query and, for url-encoded bodies, `body`.
    /// `post_form` only receives the body fields.
    pub fn parse_form(&mut self, body: &[u8]) {
        let mut form = FormValues::parse(self.url.query().unwrap_or_default());
        let is_urlencoded = self
            .headers
            .get("content-type")
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));
        if is_urlencoded {
            let post_form = FormValues::parse(&String::from_utf8_lossy(body));
            for (name, values) in post_form.iter() {
                for value in values {
                    form.append(name, value.clone());
                }
            }
            self.post_form = post_form;
        }
        self.form = form;
    }
}

impl<B> TryFrom<&http::Request<B>> for Request {
    type Error = url::ParseError;

    /// Origin-form targets are resolved against the `Host` header.
    fn try_from(req: &http::Request<B>) -> Result<Self, Self::Error> {
        let uri = req.uri();
        let headers = Headers::from(req.headers());
        let url = match uri.scheme_str() {
            Some(_) => Url::parse(&uri.to_string())?,
            None => {
                let host = uri
                    .authority()
                    .map(|a| a.as_str().to_string())
                    .or_else(|| headers.get("host").map(str::to_string))
                    .ok_or(url::ParseError::EmptyHost)?;
                let target = uri.path_and_query().map_or("", |pq| pq.as_str());
                Url::parse(&format!("http://{host}{target}"))?
            }
        };

        let mut request = Request::new(req.method().as_str(), url);
        request.version = req.version().into();
        request.content_length = headers
            .get("content-length")
            .and_then(|v| v.trim().parse().ok());
        request.transfer_encoding = headers
            .get_all("transfer-encoding")
            .iter()
            .flat_map(|v| v.split(','))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        request.close = headers
            .get("connection")
            .is_some_and(|v| v.eq_ignore_ascii_case("close"));
        if let Some(host) = headers.get("host") {
            request.host = host.to_string();
        }
        request.request_uri = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());
        request.headers = headers;
        Ok(request)
    }
}

fn host_of(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}
