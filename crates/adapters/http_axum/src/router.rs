//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use dbc_app::ports::PersonRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the person resources under `/dbc` and adds `/metrics` and `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<PR>(state: AppState<PR>) -> Router
where
    PR: PersonRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(crate::api::metrics::get::<PR>))
        .nest("/dbc", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
