//! Route handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, Json},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use super::openapi;
use super::response::{ApiError, CreatedResponse, CREATED_MESSAGE, WELCOME_MESSAGE};
use super::server::ApiState;
use crate::record::{RecordInput, RecordView};

pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

pub async fn create_record(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let input = parse_record_input(&headers, &body)?;
    let record = state.registry.create(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: CREATED_MESSAGE,
            record: record.view(),
        }),
    ))
}

pub async fn get_record(
    State(state): State<Arc<ApiState>>,
    Path(identifier): Path<String>,
) -> Result<Json<RecordView>, ApiError> {
    let record = state.registry.get(&identifier).await?;
    Ok(Json(record.view()))
}

pub async fn list_records(State(state): State<Arc<ApiState>>) -> Json<Vec<RecordView>> {
    let records = state.registry.list().await;
    Json(records.iter().map(RecordView::from).collect())
}

pub async fn openapi_document(State(state): State<Arc<ApiState>>) -> Json<Value> {
    Json(openapi::document(&state.public_url))
}

pub async fn docs_page() -> Html<String> {
    Html(openapi::swagger_ui_page(openapi::DOCUMENT_PATH))
}

/// Turn a raw request body into an untrusted record payload.
///
/// Bodies that are empty or not declared as JSON are treated as an empty
/// payload so they fail validation rather than transport parsing.
pub fn parse_record_input(headers: &HeaderMap, body: &[u8]) -> Result<RecordInput, ApiError> {
    if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RecordInput::default());
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| {
        warn!("Malformed JSON body: {}", e);
        ApiError::malformed_body()
    })?;

    Ok(RecordInput::from_json(&value))
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}
