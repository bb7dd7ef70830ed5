use crate::error::{AppError, Result};
use crate::model::{RecordEntry, RecoverQuery, RecoverResponse, ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use shortit_core::ShortCode;

pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(request): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>> {
    let code = state.shortener().shorten(&request.url).await?;
    Ok(Json(ShortenResponse {
        short_url: code.into_string(),
    }))
}

pub async fn recover_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<RecoverQuery>, QueryRejection>,
) -> Result<Json<RecoverResponse>> {
    let Query(query) = query?;
    let code = ShortCode::new(query.short_url);
    match state.shortener().resolve(&code).await? {
        Some(original_url) => Ok(Json(RecoverResponse { original_url })),
        None => Err(AppError::NotFound),
    }
}

pub async fn records_handler(State(state): State<AppState>) -> Result<Json<Vec<RecordEntry>>> {
    let mappings = state.shortener().list().await?;
    Ok(Json(mappings.into_iter().map(RecordEntry::from).collect()))
}
