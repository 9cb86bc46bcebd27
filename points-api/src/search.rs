use axum::{routing::post, Json, Router};
use chrono::Utc;
use serde::Serialize;
use points_core::codec;
use points_core::validation::{validate_search, SearchForm};
use crate::error::AppError;
use crate::state::AppState;

pub const RESULTS_PATH: &str = "/flights";

#[derive(Debug, Serialize)]
pub struct SearchRedirect {
    pub location: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/search", post(submit_search))
}

/// POST /v1/search
/// Validate the form and return where the results page lives.
pub async fn submit_search(Json(form): Json<SearchForm>) -> Result<Json<SearchRedirect>, AppError> {
    let query = validate_search(&form, Utc::now().date_naive())?;
    Ok(Json(SearchRedirect {
        location: format!("{}?{}", RESULTS_PATH, codec::encode(&query)),
    }))
}
