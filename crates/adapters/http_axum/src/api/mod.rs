//! Person REST resources, mounted under `/dbc`, plus the metrics endpoint.

#[allow(clippy::missing_errors_doc)]
pub mod create;
pub mod metrics;
#[allow(clippy::missing_errors_doc)]
pub mod person;

use axum::Router;
use axum::routing::{get, post};

use dbc_app::ports::PersonRepository;

use crate::state::AppState;

/// Build the `/dbc` sub-router.
pub fn routes<PR>() -> Router<AppState<PR>>
where
    PR: PersonRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/create", get(create::create_default::<PR>))
        .route("/create/person", post(person::create::<PR>))
        .route("/retrieve/{name}", get(person::retrieve::<PR>))
}
