//! Create resource — stores a fixed person on every call.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use dbc_app::ports::PersonRepository;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Ok,
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok => StatusCode::OK.into_response(),
        }
    }
}

/// `GET /dbc/create`
pub async fn create_default<PR>(
    State(state): State<AppState<PR>>,
) -> Result<CreateResponse, ApiError>
where
    PR: PersonRepository + Send + Sync + 'static,
{
    state.person_service.create_default_person().await?;
    Ok(CreateResponse::Ok)
}
