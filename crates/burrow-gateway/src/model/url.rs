use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    #[serde(alias = "url")]
    pub target: String,
}

#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub code: String,
    pub short_url: String,
    pub target: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub code: String,
    pub access_count: u64,
}
