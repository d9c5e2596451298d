//! Per-request context and charset negotiation.

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, Response};

use crate::config::WebConfig;
use crate::filter::classify::{classify, RequestType};

/// Charset applied when the request does not specify one.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Negotiated character encoding for one request/response pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Latin1,
    /// Carried verbatim into the response header; decoded lossily.
    Other(String),
}

impl Charset {
    /// Negotiate from the request: its own charset when present, else the
    /// default.
    pub fn negotiate(req: &Request<Body>) -> Self {
        match request_charset(req) {
            Some(name) => Self::from_name(&name),
            None => Charset::Utf8,
        }
    }

    fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Charset::Utf8,
            "iso-8859-1" | "latin-1" | "latin1" => Charset::Latin1,
            _ => Charset::Other(name.to_string()),
        }
    }

    /// Canonical name used in the response Content-Type.
    pub fn name(&self) -> &str {
        match self {
            Charset::Utf8 => DEFAULT_CHARSET,
            Charset::Latin1 => "iso-8859-1",
            Charset::Other(name) => name,
        }
    }

    /// Decode raw bytes under this charset.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Charset::Latin1 => bytes.iter().map(|&b| b as char).collect(),
            _ => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Extract the charset parameter from the request's Content-Type header.
fn request_charset(req: &Request<Body>) -> Option<String> {
    let content_type = req.headers().get(header::CONTENT_TYPE)?.to_str().ok()?;
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Context derived for a single request; discarded when the request ends.
///
/// Borrows the frozen configuration and carries the negotiated charset
/// and the classified request type. Never retained beyond one request.
pub struct RequestContext<'a> {
    config: &'a WebConfig,
    charset: Charset,
    request_type: RequestType,
}

impl<'a> RequestContext<'a> {
    /// Build the context for one request. The token is computed under the
    /// same charset later applied to the response.
    pub fn new(config: &'a WebConfig, req: &Request<Body>) -> Self {
        let charset = Charset::negotiate(req);
        let request_type = classify(req, &charset);
        Self {
            config,
            charset,
            request_type,
        }
    }

    /// The frozen configuration.
    pub fn config(&self) -> &WebConfig {
        self.config
    }

    /// The negotiated character encoding.
    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    /// The classified request-type token.
    pub fn request_type(&self) -> &RequestType {
        &self.request_type
    }

    /// Whether the configuration owns this request's type.
    pub fn is_owned(&self) -> bool {
        self.config.contains_type(self.request_type.as_str())
    }
}

/// Apply the negotiated charset to the outgoing response.
///
/// Runs exactly once per request, along both the dispatch and the
/// passthrough path. A text Content-Type that does not already name a
/// charset gets the negotiated one appended; everything else is left
/// untouched.
pub fn finalize(mut resp: Response<Body>, charset: &Charset) -> Response<Body> {
    let headers = resp.headers_mut();
    let updated = match headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        Some(ct) if ct.starts_with("text/") && !ct.to_ascii_lowercase().contains("charset=") => {
            Some(format!("{}; charset={}", ct, charset.name()))
        }
        _ => None,
    };
    if let Some(value) = updated.and_then(|ct| HeaderValue::from_str(&ct).ok()) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_content_type(value: &str) -> Request<Body> {
        Request::builder()
            .uri("/action/list")
            .header(header::CONTENT_TYPE, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_default_charset_when_request_has_none() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(Charset::negotiate(&req), Charset::Utf8);
    }

    #[test]
    fn test_request_charset_wins() {
        let req = request_with_content_type("text/html; charset=ISO-8859-1");
        assert_eq!(Charset::negotiate(&req), Charset::Latin1);

        let req = request_with_content_type("application/json; charset=\"utf-8\"");
        assert_eq!(Charset::negotiate(&req), Charset::Utf8);

        let req = request_with_content_type("text/plain; charset=shift_jis");
        assert_eq!(Charset::negotiate(&req).name(), "shift_jis");
    }

    #[test]
    fn test_content_type_without_charset_parameter() {
        let req = request_with_content_type("application/x-www-form-urlencoded");
        assert_eq!(Charset::negotiate(&req), Charset::Utf8);
    }

    #[test]
    fn test_latin1_decodes_high_bytes() {
        assert_eq!(Charset::Latin1.decode(&[0x61, 0xE9]), "aé");
        assert_eq!(Charset::Utf8.decode("aé".as_bytes()), "aé");
    }

    #[test]
    fn test_finalize_appends_charset_to_text_types() {
        let resp = Response::builder()
            .header(header::CONTENT_TYPE, "text/html")
            .body(Body::empty())
            .unwrap();
        let resp = finalize(resp, &Charset::Latin1);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=iso-8859-1"
        );
    }

    #[test]
    fn test_finalize_leaves_existing_charset_alone() {
        let resp = Response::builder()
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Body::empty())
            .unwrap();
        let resp = finalize(resp, &Charset::Latin1);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn test_finalize_skips_non_text_and_absent_content_types() {
        let resp = Response::builder()
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(Body::empty())
            .unwrap();
        let resp = finalize(resp, &Charset::Utf8);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/octet-stream"
        );

        let resp = Response::builder().body(Body::empty()).unwrap();
        let resp = finalize(resp, &Charset::Utf8);
        assert!(resp.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_context_lifecycle() {
        let mut config = WebConfig::default();
        config.request_types.insert("action".to_string());

        let req = Request::builder()
            .uri("/action/list")
            .body(Body::empty())
            .unwrap();
        let ctx = RequestContext::new(&config, &req);

        assert_eq!(ctx.request_type().as_str(), "action");
        assert!(ctx.is_owned());
        assert_eq!(ctx.charset(), &Charset::Utf8);
        assert!(ctx.config().contains_type("action"));
    }
}
