use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse, StatsResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::ShortCode;
use tracing::info;

pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let target = request.target.trim();
    if target.is_empty() {
        return Err(AppError::InvalidRequest("target cannot be empty".into()));
    }
    // Every target must later fit in a Location header.
    if HeaderValue::from_str(target).is_err() {
        return Err(AppError::InvalidRequest(format!(
            "target must be printable ASCII: {}",
            target.escape_debug()
        )));
    }

    let code = state.shortener().shorten(target);
    info!(code = %code, target_url = target, "short code created");

    let response = CreateUrlResponse {
        short_url: state.short_url(&code),
        code: code.to_string(),
        target: target.to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let code = parse_code(&short_code)?;
    let target = state
        .shortener()
        .resolve(&code)
        .ok_or_else(|| AppError::NotFound(short_code.clone()))?;

    let location = HeaderValue::from_str(&target)
        .map_err(|_| AppError::UnusableTarget(code.to_string()))?;
    let headers = [(header::LOCATION, location)];
    Ok((StatusCode::TEMPORARY_REDIRECT, headers).into_response())
}

pub async fn stats_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>> {
    let code = parse_code(&short_code)?;
    let access_count = state
        .shortener()
        .stats(&code)
        .ok_or_else(|| AppError::NotFound(short_code.clone()))?;

    Ok(Json(StatsResponse {
        code: code.to_string(),
        access_count,
    }))
}

fn parse_code(raw: &str) -> Result<ShortCode> {
    ShortCode::new(raw)
        .map_err(|_| AppError::NotFound(raw.to_string()))
}
