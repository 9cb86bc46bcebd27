use std::convert::Infallible;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_util::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/diagnostics/stream", get(diagnostics_stream))
}

/// GET /v1/diagnostics/stream
/// Lagged receivers skip what they missed.
pub async fn diagnostics_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.diagnostics.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        let event = result.ok()?;
        match Event::default().event(event.name()).json_data(&event) {
            Ok(sse) => Some(Ok(sse)),
            Err(e) => {
                tracing::error!("Failed to serialize diagnostics event: {}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
