//! Person resource — store a supplied person, retrieve one by first name.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use dbc_app::ports::PersonRepository;
use dbc_domain::person::{NewPerson, Person};

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Ok,
    NoContent,
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok => StatusCode::OK.into_response(),
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Possible responses from the retrieve endpoint.
pub enum RetrieveResponse {
    Ok(Json<Person>),
    NoContent,
}

impl IntoResponse for RetrieveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Whether the request declares a JSON body (`application/json` or `application/*+json`).
fn is_json(headers: &HeaderMap) -> bool {
    let Some(mime) = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
    else {
        return false;
    };
    let mime = mime.trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Decode an optional person from a raw request body.
///
/// An empty body and the JSON literal `null` both mean "no person".
/// Any other body must be declared as JSON.
fn parse_payload(headers: &HeaderMap, body: &[u8]) -> Result<Option<NewPerson>, ApiError> {
    if body.trim_ascii().is_empty() {
        return Ok(None);
    }
    if !is_json(headers) {
        return Err(ApiError::UnsupportedMediaType);
    }
    Ok(serde_json::from_slice(body)?)
}

/// `POST /dbc/create/person`
pub async fn create<PR>(
    State(state): State<AppState<PR>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<CreateResponse, ApiError>
where
    PR: PersonRepository + Send + Sync + 'static,
{
    state.metrics.times_persist.increment();
    let _timer = state.metrics.persist_timer.start();

    let payload = parse_payload(&headers, &body)?;
    match state.person_service.create_person(payload).await? {
        Some(_) => Ok(CreateResponse::Ok),
        None => Ok(CreateResponse::NoContent),
    }
}

/// `GET /dbc/retrieve/:name`
pub async fn retrieve<PR>(
    State(state): State<AppState<PR>>,
    Path(name): Path<String>,
) -> Result<RetrieveResponse, ApiError>
where
    PR: PersonRepository + Send + Sync + 'static,
{
    state.metrics.times_retrieved.increment();
    let _timer = state.metrics.retrieve_timer.start();

    match state.person_service.find_by_first_name(&name).await? {
        Some(person) => Ok(RetrieveResponse::Ok(Json(person))),
        None => Ok(RetrieveResponse::NoContent),
    }
}
