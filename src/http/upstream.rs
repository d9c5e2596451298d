//! Demo passthrough stage: forward untouched requests upstream.

use axum::body::Body;
use axum::http::uri::{Authority, Scheme};
use axum::http::{Request, Response, StatusCode, Uri};
use axum::response::IntoResponse;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

/// Thin client forwarding to a fixed upstream authority.
///
/// Only the scheme and authority are rewritten; method, headers, path and
/// body travel unchanged.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    authority: Authority,
}

impl UpstreamClient {
    /// Create a client forwarding to the given authority.
    pub fn new(authority: Authority) -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build(HttpConnector::new()),
            authority,
        }
    }

    /// Forward the request and stream the upstream response back.
    pub async fn forward(&self, req: Request<Body>) -> Response<Body> {
        let (mut parts, body) = req.into_parts();

        let mut uri_parts = parts.uri.clone().into_parts();
        uri_parts.scheme = Some(Scheme::HTTP);
        uri_parts.authority = Some(self.authority.clone());
        match Uri::from_parts(uri_parts) {
            Ok(uri) => parts.uri = uri,
            Err(e) => {
                tracing::error!(error = %e, "Invalid upstream URI");
                return (StatusCode::BAD_GATEWAY, "Invalid upstream URI").into_response();
            }
        }

        match self.client.request(Request::from_parts(parts, body)).await {
            Ok(response) => {
                let (parts, body) = response.into_parts();
                Response::from_parts(parts, Body::new(body))
            }
            Err(e) => {
                tracing::error!(error = %e, "Upstream request failed");
                (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
            }
        }
    }
}
