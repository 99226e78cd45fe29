//! HTTP request handlers

use super::error::ApiError;
use super::params::SearchParams;
use super::responses::{search_result2, search_result3, Subsonic};
use super::state::AppState;
use crate::search::SearchResults;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use tokio_util::sync::CancellationToken;

/// Run a search for the request under the configured deadline
///
/// When the client goes away axum drops this future, and with it the branch
/// waits. Lookups already spawned keep running to completion in the background.
async fn run_search(
    state: &AppState,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<SearchResults, ApiError> {
    let Query(params) = params?;
    let request = params.into_request(&state.settings.search)?;

    Ok(state.search.search(&CancellationToken::new(), &request).await)
}

/// Base URL used for absolute links in responses
fn public_base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(base) = state.base_url() {
        return base.to_string();
    }
    headers
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
        .map(|host| format!("http://{}", host))
        .unwrap_or_default()
}

/// Folder-based search
pub async fn search2(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let results = run_search(&state, params).await?;

    let mut response = Subsonic::ok();
    response.search_result2 = Some(search_result2(&results, &public_base_url(&state, &headers)));
    Ok(Json(response.into_envelope()))
}

/// Tag-based (ID3) search
pub async fn search3(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let results = run_search(&state, params).await?;

    let mut response = Subsonic::ok();
    response.search_result3 = Some(search_result3(&results, &public_base_url(&state, &headers)));
    Ok(Json(response.into_envelope()))
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Search statistics
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}
