use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use points_core::codec;
use points_presenter::{render_all, RenderedItem};
use points_results::driver::spawn_fetch;
use points_results::fetcher::FetchTicket;
use points_results::registry::SharedView;
use points_results::{Facets, FetchState, FilterCriteria, ResultsView, SortKey, ViewEvent};
use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SortRequest {
    pub sort: SortKey,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MountedResponse {
    pub id: Uuid,
    pub query: String,
    pub loading: bool,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub id: Uuid,
    pub query: String,
    pub loading: bool,
    pub fetch_state: FetchState,
    pub facets: Facets,
    pub filters: FilterCriteria,
    pub sort: SortKey,
    pub page: usize,
    pub page_count: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub total: usize,
    pub raw_total: usize,
    pub empty: bool,
    pub items: Vec<RenderedItem>,
}

impl From<&ResultsView> for ViewResponse {
    fn from(view: &ResultsView) -> Self {
        let paginator = view.paginator();
        Self {
            id: view.id(),
            query: view.encoded_query(),
            loading: view.loading(),
            fetch_state: view.fetch_state(),
            facets: view.facets().clone(),
            filters: view.criteria().clone(),
            sort: view.sort(),
            page: view.page(),
            page_count: view.page_count(),
            has_next: paginator.has_next(view.filtered_len(), view.page()),
            has_previous: paginator.has_previous(view.page()),
            total: view.filtered_len(),
            raw_total: view.raw().len(),
            empty: view.is_empty_state(),
            items: render_all(view.current_page()),
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/views", post(mount_view))
        .route("/v1/views/{id}", get(get_view).delete(unmount_view))
        .route("/v1/views/{id}/filters", put(update_filters))
        .route("/v1/views/{id}/sort", put(update_sort))
        .route("/v1/views/{id}/query", put(update_query))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/views
/// Decode the results-page query string, mount a view and start its search.
pub async fn mount_view(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<(StatusCode, Json<MountedResponse>), AppError> {
    let (view, ticket) = ResultsView::from_query_string(&req.query);
    let response = MountedResponse {
        id: view.id(),
        query: view.encoded_query(),
        loading: view.loading(),
    };

    let shared = state.views.write().await.mount(view);
    tracing::info!("Mounted view {} for {}", response.id, response.query);
    launch(&state, response.id, &shared, ticket);

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /v1/views/{id}?page=N
pub async fn get_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> Result<Json<ViewResponse>, AppError> {
    let shared = find(&state, id).await?;
    let mut view = shared.lock().await;
    if let Some(page) = params.page {
        view.dispatch(ViewEvent::PageRequested(page));
    }
    Ok(Json(ViewResponse::from(&*view)))
}

/// PUT /v1/views/{id}/filters
pub async fn update_filters(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(criteria): Json<FilterCriteria>,
) -> Result<Json<ViewResponse>, AppError> {
    let shared = find(&state, id).await?;
    let mut view = shared.lock().await;
    view.dispatch(ViewEvent::FiltersChanged(criteria));
    Ok(Json(ViewResponse::from(&*view)))
}

/// PUT /v1/views/{id}/sort
pub async fn update_sort(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SortRequest>,
) -> Result<Json<ViewResponse>, AppError> {
    let shared = find(&state, id).await?;
    let mut view = shared.lock().await;
    view.dispatch(ViewEvent::SortChanged(req.sort));
    Ok(Json(ViewResponse::from(&*view)))
}

/// PUT /v1/views/{id}/query
/// Same query is a no-op; a different one re-fetches.
pub async fn update_query(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<ViewResponse>, AppError> {
    let shared = find(&state, id).await?;
    let response = {
        let mut view = shared.lock().await;
        let ticket = view.dispatch(ViewEvent::QueryDecoded(codec::decode(&req.query)));
        launch(&state, id, &shared, ticket);
        ViewResponse::from(&*view)
    };
    Ok(Json(response))
}

/// DELETE /v1/views/{id}
pub async fn unmount_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.views.write().await.unmount(&id) {
        tracing::info!("Unmounted view {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFoundError(format!("View {} not found", id)))
    }
}

async fn find(state: &AppState, id: Uuid) -> Result<SharedView, AppError> {
    state
        .views
        .write()
        .await
        .get(&id)
        .ok_or_else(|| AppError::NotFoundError(format!("View {} not found", id)))
}

fn launch(state: &AppState, id: Uuid, shared: &SharedView, ticket: Option<FetchTicket>) {
    if let Some(ticket) = ticket {
        spawn_fetch(
            id,
            shared,
            ticket,
            state.search_client.clone(),
            state.diagnostics.clone(),
        );
    }
}
