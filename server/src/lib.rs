use anyhow::Result;
use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, routing::{get, post}, Json, Router};
use serde::Serialize;
use serde_json::Value;
use shortlist_core::{RankError, RankRequest, RankedCandidate, Ranker, RankerOptions};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub options: RankerOptions,
    /// Used when a request omits `k`.
    pub default_k: i64,
    pub max_candidates: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { options: RankerOptions::default(), default_k: 10, max_candidates: 10_000 }
    }
}

#[derive(Serialize)]
pub struct RankResponse {
    pub results: Vec<RankedCandidate>,
    pub total_candidates: usize,
    pub took_s: f64,
}

#[derive(Clone)]
pub struct AppState {
    pub ranker: Arc<Ranker>,
    pub default_k: i64,
    pub max_candidates: usize,
}

type ApiError = (StatusCode, Json<Value>);

pub fn build_app(config: ServerConfig) -> Result<Router> {
    let app_state = AppState {
        ranker: Arc::new(Ranker::new(config.options)),
        default_k: config.default_k,
        max_candidates: config.max_candidates,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/rank", post(rank_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    Ok(app)
}

pub async fn rank_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RankResponse>, ApiError> {
    let start = std::time::Instant::now();
    let Json(body) = body.map_err(|e| error_response(StatusCode::BAD_REQUEST, e.body_text()))?;
    let req = RankRequest::from_value(&body, Some(state.default_k)).map_err(rank_error)?;

    let total_candidates = req.candidates.len();
    if total_candidates > state.max_candidates {
        return Err(error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("{total_candidates} candidates exceeds limit of {}", state.max_candidates),
        ));
    }

    let k = req.k;
    let results = rank_off_runtime(state.ranker.clone(), req).await?;
    let elapsed = start.elapsed();
    tracing::info!(total_candidates, k, returned = results.len(), took_s = elapsed.as_secs_f64(), "ranked");
    Ok(Json(RankResponse { results, total_candidates, took_s: elapsed.as_secs_f64() }))
}

/// Ranking is CPU-bound, so it runs on the blocking pool.
async fn rank_off_runtime(ranker: Arc<Ranker>, req: RankRequest) -> Result<Vec<RankedCandidate>, ApiError> {
    match tokio::task::spawn_blocking(move || ranker.rank_request(&req)).await {
        Ok(ranked) => ranked.map_err(rank_error),
        Err(err) => {
            tracing::error!(%err, "ranking task failed");
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, "ranking task failed"))
        }
    }
}

fn rank_error(err: RankError) -> ApiError {
    let status = match err {
        RankError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        RankError::DuplicateIdentifier(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    tracing::warn!(%err, "rejected rank request");
    error_response(status, err.to_string())
}

fn error_response(status: StatusCode, msg: impl Into<String>) -> ApiError {
    (status, Json(serde_json::json!({ "error": msg.into() })))
}
