//! MVC filter demo server.
//!
//! Runs the filter in front of an upstream stage: recognized request
//! types are answered by a small echo dispatcher, everything else is
//! forwarded untouched to `--upstream`.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::uri::Authority;
use axum::http::{header, Request, Response};
use axum::response::IntoResponse;
use axum::routing::any;
use axum::Router;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mvc_filter::config::{ConfigSource, WebConfig};
use mvc_filter::container::{FsResourceLocator, MapInitContext};
use mvc_filter::dispatch::{Dispatcher, DispatcherFactory};
use mvc_filter::error::DispatchError;
use mvc_filter::filter::context::RequestContext;
use mvc_filter::filter::WebFilter;
use mvc_filter::http::{filter_middleware, RequestIdLayer, UpstreamClient};
use mvc_filter::observability::LOG_CONFIG_PARAM;

#[derive(Parser)]
#[command(name = "mvc-filter")]
#[command(about = "Request-interception filter demo server", long_about = None)]
struct Cli {
    /// Web root the container resolves logical paths against.
    #[arg(long, default_value = "webroot")]
    web_root: PathBuf,

    /// Logical config path (default: container lookup chain).
    #[arg(long)]
    config: Option<String>,

    /// Logical log-config path.
    #[arg(long)]
    log_config: Option<String>,

    /// Listen address.
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: String,

    /// Upstream authority unrecognized requests are forwarded to.
    #[arg(long, default_value = "127.0.0.1:3000")]
    upstream: String,
}

/// Minimal dispatcher so the demo runs end to end. Library consumers
/// plug in their own engine through `DispatcherFactory`.
struct EchoDispatcher;

impl Dispatcher for EchoDispatcher {
    fn process(
        &self,
        ctx: &RequestContext<'_>,
        req: Request<Body>,
    ) -> Result<Response<Body>, DispatchError> {
        let body = format!("type={} path={}\n", ctx.request_type(), req.uri().path());
        Ok(([(header::CONTENT_TYPE, "text/plain")], body).into_response())
    }
}

struct EchoFactory;

impl DispatcherFactory for EchoFactory {
    fn build(&self, _config: &WebConfig) -> Result<Box<dyn Dispatcher>, DispatchError> {
        Ok(Box::new(EchoDispatcher))
    }
}

async fn passthrough_handler(
    State(upstream): State<UpstreamClient>,
    req: Request<Body>,
) -> Response<Body> {
    upstream.forward(req).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut ctx = MapInitContext::new(FsResourceLocator::new(&cli.web_root));
    if let Some(path) = &cli.log_config {
        ctx.set_parameter(LOG_CONFIG_PARAM, path);
    }
    let source = match &cli.config {
        Some(path) => ConfigSource::from_path(path),
        None => ConfigSource::from_container(),
    };

    // Init bootstraps logging from a resolvable log-config resource; the
    // fallback below only kicks in when none was installed.
    let filter = WebFilter::init(source, &ctx, &EchoFactory)?;
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mvc_filter=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    tracing::info!("mvc-filter v0.1.0 starting");

    let upstream: Authority = cli.upstream.parse()?;
    let app = Router::new()
        .route("/{*path}", any(passthrough_handler))
        .route("/", any(passthrough_handler))
        .with_state(UpstreamClient::new(upstream))
        .layer(axum::middleware::from_fn_with_state(
            Arc::new(filter),
            filter_middleware,
        ))
        .layer(RequestIdLayer)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&cli.listen).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        upstream = %cli.upstream,
        "Listening for connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
