use std::{net::SocketAddr, time::Duration};

use axum::{
    http::{Request, Response},
    middleware,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{field, Span};
use tracing_subscriber::EnvFilter;

use crate::{auth, pages, state::AppState, users};

const DEFAULT_LOG_FILTER: &str = "dashgate=debug,axum=info,tower_http=info";

/// `RUST_LOG` selects levels; `LOG_FORMAT=json` switches to structured output.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.with_target(false).json().init(),
        _ => builder.init(),
    }
}

fn request_span<B>(req: &Request<B>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        path = %req.uri().path(),
        status = field::Empty,
        latency_ms = field::Empty,
    )
}

fn record_response<B>(res: &Response<B>, latency: Duration, span: &Span) {
    let status = res.status();
    span.record("status", field::display(status));
    span.record("latency_ms", latency.as_millis() as u64);
    if status.is_server_error() {
        tracing::error!(%status, "request failed");
    } else {
        tracing::debug!(%status, "request finished");
    }
}

/// Full router: pages, auth API and user API behind the route gate.
pub fn build_app(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<_>| request_span(req))
        .on_response(|res: &Response<_>, latency: Duration, span: &Span| {
            record_response(res, latency, span)
        });

    Router::new()
        .merge(pages::page_routes())
        .merge(auth::router())
        .merge(users::router())
        .route("/health", get(|| async { "ok" }))
        .layer(middleware::from_fn_with_state(state.clone(), auth::gate::enforce))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(trace)
}

fn bind_addr() -> anyhow::Result<SocketAddr> {
    let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port = std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into());
    Ok(format!("{host}:{port}").parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "ctrl-c handler failed");
    }
    tracing::info!("shutting down");
}

/// Serves until ctrl-c, letting in-flight requests finish.
pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr = bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "dashgate listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
