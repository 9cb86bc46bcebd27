use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use points_core::iata::{lookup_static, MIN_REMOTE_PREFIX};
use points_shared::Airport;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/airports/default", get(default_origin))
        .route("/v1/airports/search/{prefix}", get(search_airports))
}

/// GET /v1/airports/default
pub async fn default_origin(State(state): State<AppState>) -> Result<Json<Airport>, AppError> {
    let airport = state.airports.default_origin().await?;
    Ok(Json(airport))
}

/// GET /v1/airports/search/{prefix}
/// Short prefixes and remote failures are answered from the bundled list.
pub async fn search_airports(
    State(state): State<AppState>,
    Path(prefix): Path<String>,
) -> Json<Vec<Airport>> {
    let prefix = prefix.trim();
    if prefix.chars().count() < MIN_REMOTE_PREFIX {
        return Json(lookup_static(prefix));
    }

    match state.airports.predictive_cities(prefix).await {
        Ok(airports) => Json(airports),
        Err(e) => {
            tracing::warn!("Airport lookup for '{}' failed, using bundled list: {}", prefix, e);
            Json(lookup_static(prefix))
        }
    }
}
