//! Request classification.
//!
//! # Responsibilities
//! - Derive the request-type token the configuration is consulted with
//! - Decode path data under the negotiated charset
//!
//! # Design Decisions
//! - Pure function of (request, charset); the dispatcher is never
//!   consulted
//! - Tokens are lowercased so the configured set matches
//!   case-insensitively

use axum::body::Body;
use axum::http::Request;

use crate::filter::context::Charset;

/// Classification token for one request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestType(String);

impl RequestType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classify a request under the negotiated charset.
///
/// The token is the first segment of the percent-decoded request path,
/// lowercased. An empty path yields an empty token, which is never
/// recognized unless explicitly configured.
pub fn classify(req: &Request<Body>, charset: &Charset) -> RequestType {
    let segment = req
        .uri()
        .path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or("");
    let decoded = charset.decode(&percent_decode(segment.as_bytes()));
    RequestType(decoded.to_lowercase())
}

/// Decode %XX escapes; malformed escapes pass through verbatim.
fn percent_decode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'%' && i + 2 < input.len() {
            if let (Some(hi), Some(lo)) = (hex_val(input[i + 1]), hex_val(input[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(input[i]);
        i += 1;
    }
    out
}

fn hex_val(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_first_segment_is_the_token() {
        let req = request("/action/list");
        assert_eq!(classify(&req, &Charset::Utf8).as_str(), "action");

        let req = request("/static/css/app.css");
        assert_eq!(classify(&req, &Charset::Utf8).as_str(), "static");
    }

    #[test]
    fn test_token_is_lowercased() {
        let req = request("/ACTION/list");
        assert_eq!(classify(&req, &Charset::Utf8).as_str(), "action");
    }

    #[test]
    fn test_percent_escapes_decoded() {
        let req = request("/%61ction/list");
        assert_eq!(classify(&req, &Charset::Utf8).as_str(), "action");
    }

    #[test]
    fn test_malformed_escape_passes_through() {
        let req = request("/a%zzb/x");
        assert_eq!(classify(&req, &Charset::Utf8).as_str(), "a%zzb");
    }

    #[test]
    fn test_root_path_yields_empty_token() {
        let req = request("/");
        assert_eq!(classify(&req, &Charset::Utf8).as_str(), "");
    }

    #[test]
    fn test_charset_drives_decoding() {
        // %E9 is é in latin-1 but invalid as standalone UTF-8.
        let req = request("/caf%E9/x");
        assert_eq!(classify(&req, &Charset::Latin1).as_str(), "café");
        assert_eq!(classify(&req, &Charset::Utf8).as_str(), "caf\u{fffd}");
    }

    #[test]
    fn test_deterministic() {
        let req = request("/action/list?x=1");
        let a = classify(&req, &Charset::Utf8);
        let b = classify(&req, &Charset::Utf8);
        assert_eq!(a, b);
    }
}
