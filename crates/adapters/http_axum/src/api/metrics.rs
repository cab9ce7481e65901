//! Read-only view over the handler counters and timers.

use axum::Json;
use axum::extract::State;

use dbc_app::metrics::MetricsSnapshot;
use dbc_app::ports::PersonRepository;

use crate::state::AppState;

/// `GET /metrics`
pub async fn get<PR>(State(state): State<AppState<PR>>) -> Json<MetricsSnapshot>
where
    PR: PersonRepository + Send + Sync + 'static,
{
    Json(state.metrics.snapshot())
}
