//! HTTP surface: `POST /api/analyze`.
//!
//! The handler validates the body, dispatches to an [`AnalysisBackend`], and
//! maps results to JSON. Validation failures are 400s and never reach the
//! backend; every analyzer error is a 500 carrying the error message.

use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::analysis::AnalysisBackend;
use crate::output::ErrorResponse;
use crate::request::{preview, AnalyzeBody, RequestError};

pub const ANALYZE_ROUTE: &str = "/api/analyze";

/// Characters of the submitted input included in request logs.
const LOG_PREVIEW_CHARS: usize = 50;

#[derive(Clone)]
pub struct AppState {
    backend: Arc<dyn AnalysisBackend>,
}

pub fn router(backend: Arc<dyn AnalysisBackend>, max_body_bytes: usize) -> Router {
    Router::new()
        .route(ANALYZE_ROUTE, post(analyze))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(AppState { backend })
}

async fn analyze(State(state): State<AppState>, body: Bytes) -> Response {
    let body: AnalyzeBody = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(err) => {
            warn!("rejecting unparseable request body: {}", err);
            return bad_request(RequestError::InvalidParameters);
        }
    };

    info!(
        "Analyzing: {} - {}...",
        body.kind.as_deref().unwrap_or("<none>"),
        preview(body.url.as_deref().unwrap_or(""), LOG_PREVIEW_CHARS)
    );

    let request = match body.validate() {
        Ok(request) => request,
        Err(err) => return bad_request(err),
    };

    let kind = request.kind();
    match state.backend.analyze(request).await {
        Ok(result) => {
            info!(
                kind = %kind,
                typography = result.typography.len(),
                colors = result.colors.len(),
                "analysis complete"
            );
            Json(result).into_response()
        }
        Err(err) => {
            let payload = err.to_payload();
            error!(
                kind = %kind,
                category = ?payload.category,
                remediation = payload.remediation.as_deref().unwrap_or(""),
                "{}: {}",
                kind.failure_label(),
                err
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::analysis_failed(kind, &err)),
            )
                .into_response()
        }
    }
}

fn bad_request(err: RequestError) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(err))).into_response()
}

/// Serve `app` until `shutdown` is cancelled, letting in-flight requests finish.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("listening on http://{}", addr);
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

/// Cancel `token` on Ctrl-C or SIGTERM.
pub fn shutdown_signal(token: CancellationToken) -> impl Future<Output = ()> {
    async move {
        let ctrl_c = async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for Ctrl-C: {}", err);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(err) => {
                    warn!("failed to listen for SIGTERM: {}", err);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
        info!("shutdown requested; draining connections");
        token.cancel();
    }
}
