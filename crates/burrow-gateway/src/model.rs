mod url;

use serde::Serialize;

pub use url::{CreateUrlRequest, CreateUrlResponse, StatsResponse};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
