//! Person CRUD endpoints
//!
//! - POST   /people       create (201)
//! - GET    /people       list (200, JSON array)
//! - GET    /people/:id   fetch (200, JSON)
//! - PUT    /people/:id   replace, ID taken from the path (200)
//! - DELETE /people/:id   remove (200)
//!
//! Error responses are plain-text messages.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use people_common::{Error, Person};
use tracing::{debug, error};

use crate::AppState;

/// Handler failure, mapped to a status code by variant
#[derive(Debug)]
pub enum ApiError {
    /// Body is not a decodable person
    InvalidBody,
    /// Path ID is empty
    InvalidId,
    /// Repository returned an error
    Store(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidBody => (StatusCode::BAD_REQUEST, "invalid request body".to_string()),
            ApiError::InvalidId => (StatusCode::BAD_REQUEST, "invalid person id".to_string()),
            ApiError::Store(Error::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "person not found".to_string())
            }
            ApiError::Store(Error::AlreadyExists(_)) => {
                (StatusCode::CONFLICT, "person already exists".to_string())
            }
            ApiError::Store(Error::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Store(Error::Internal(msg)) => {
                error!("Repository failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, message).into_response()
    }
}

fn decode_person(body: &[u8]) -> Result<Person, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("Rejected request body: {}", e);
        ApiError::InvalidBody
    })
}

fn require_id(id: &str) -> Result<(), ApiError> {
    if id.is_empty() {
        return Err(ApiError::InvalidId);
    }
    Ok(())
}

/// POST /people
pub async fn create_person(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let person = decode_person(&body)?;
    state.repo.create(person).await?;
    Ok(StatusCode::CREATED)
}

/// GET /people
pub async fn list_people(State(state): State<AppState>) -> Result<Json<Vec<Person>>, ApiError> {
    Ok(Json(state.repo.list().await?))
}

/// GET /people/:id
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Person>, ApiError> {
    require_id(&id)?;
    Ok(Json(state.repo.get_by_id(&id).await?))
}

/// PUT /people/:id
///
/// Any `id` in the body is ignored in favour of the path.
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    require_id(&id)?;
    let person = decode_person(&body)?.with_id(id);
    state.repo.update(person).await?;
    Ok(StatusCode::OK)
}

/// DELETE /people/:id
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    require_id(&id)?;
    state.repo.delete(&id).await?;
    Ok(StatusCode::OK)
}

/// Build person CRUD routes
pub fn people_routes() -> Router<AppState> {
    Router::new()
        .route("/people", post(create_person).get(list_people))
        .route(
            "/people/:id",
            get(get_person).put(update_person).delete(delete_person),
        )
}
