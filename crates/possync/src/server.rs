//! HTTP boundary: `POST /sync` in front of the aggregator.
//!
//! Every request gets exactly one JSON body back, success or failure.
//! CORS is a static layer on the router; the aggregator never sees it.

use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use possync_core::{SyncAggregator, SyncFailure, SyncRequest};

use crate::error::CliError;

#[derive(Clone)]
struct AppState {
    aggregator: SyncAggregator,
}

/// Build the router with its layers. `cors` is applied outermost so
/// preflights are answered before tracing or the handler run.
pub fn router(aggregator: SyncAggregator, cors: CorsLayer) -> Router {
    Router::new()
        .route("/sync", post(sync_handler))
        .route("/health", get(health_check))
        .with_state(AppState { aggregator })
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS policy from a config value: `*` for any origin, otherwise a
/// comma-separated list of exact origins.
pub fn cors_layer(origins: &str) -> Result<CorsLayer, CliError> {
    let base = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    if origins.trim() == "*" {
        return Ok(base.allow_origin(cors::Any));
    }

    let list = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| {
            HeaderValue::from_str(o).map_err(|e| CliError::Validation {
                field: "cors origin".into(),
                reason: format!("{e}: {o}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if list.is_empty() {
        return Err(CliError::Validation {
            field: "cors origin".into(),
            reason: "expected `*` or at least one origin".into(),
        });
    }
    Ok(base.allow_origin(AllowOrigin::list(list)))
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(app: Router, addr: &str) -> Result<(), CliError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| CliError::Bind {
            addr: addr.into(),
            source,
        })?;
    info!(addr = %listener.local_addr()?, "sync endpoint listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "could not install Ctrl-C handler, running until killed");
        std::future::pending::<()>().await;
    }
}

// ── Handlers ────────────────────────────────────────────────────────

async fn sync_handler(
    State(state): State<AppState>,
    payload: Result<Json<SyncRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "rejecting unreadable sync body");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid request body",
                    "details": rejection.body_text(),
                })),
            )
                .into_response();
        }
    };

    match state.aggregator.synchronize(request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(failure) => failure_response(&failure),
    }
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

fn failure_response(failure: &SyncFailure) -> Response {
    let status = StatusCode::from_u16(failure.http_status()).unwrap_or(StatusCode::BAD_GATEWAY);
    debug!(kind = %failure.kind, %status, "sync failed");
    (status, Json(failure)).into_response()
}

#[allow(clippy::needless_pass_by_value)]
fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    error!("sync handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal error" })),
    )
        .into_response()
}
