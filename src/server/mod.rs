//! HTTP endpoint
//!
//! Exposes the pipeline as `GET /api/subtitles?videoId=..&lang=..&proxy=..`, answering with
//! `{subtitles, videoDetails}` on success and `{error}` with status 400 or 500 otherwise.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::extractors::SubtitleLine;
use crate::pipeline::SubtitlePipeline;
use crate::ScraperError;

/// Shared state of the endpoint
pub struct AppState {
    pub pipeline: SubtitlePipeline,
    pub default_language: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleQuery {
    pub video_id: Option<String>,
    pub lang: Option<String>,
    pub proxy: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleResponse {
    pub subtitles: Vec<SubtitleLine>,
    pub video_details: VideoSummary,
}

#[derive(Debug, Serialize)]
pub struct VideoSummary {
    pub title: String,
    pub description: String,
}

/// Error answer of the endpoint
#[derive(Debug)]
pub enum ApiError {
    MissingVideoId,
    Scraper(ScraperError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingVideoId => {
                (StatusCode::BAD_REQUEST, "Missing videoId parameter".to_string())
            }
            ApiError::Scraper(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<ScraperError> for ApiError {
    fn from(err: ScraperError) -> Self {
        ApiError::Scraper(err)
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/subtitles", get(get_subtitles))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(state: Arc<AppState>, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn get_subtitles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SubtitleQuery>,
) -> Result<Json<SubtitleResponse>, ApiError> {
    let video_id = query
        .video_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingVideoId)?;

    let language = query
        .lang
        .as_deref()
        .filter(|lang| !lang.is_empty())
        .unwrap_or(state.default_language.as_str());
    let proxy = query.proxy.as_deref().filter(|proxy| !proxy.is_empty());

    let outcome = state
        .pipeline
        .fetch_video_details(video_id, Some(language), proxy)
        .await
        .map_err(|err| {
            tracing::error!("Scraping {} failed: {}", video_id, err);
            err
        })?;

    let details = outcome.value;
    Ok(Json(SubtitleResponse {
        subtitles: details.subtitles,
        video_details: VideoSummary {
            title: details.title,
            description: details.description,
        },
    }))
}
