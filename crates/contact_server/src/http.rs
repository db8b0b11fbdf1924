//! HTTP surface for the contact service.
//!
//! ## Routes
//!
//! - `GET /contacts` — all contacts.
//! - `GET /contacts/:id` — one contact, 404 when absent.
//! - `POST /contacts` — create; 201 with a `Location` header.
//! - `PUT /contacts/:id` — full replace; 204.
//! - `DELETE /contacts/:id` — delete; 204.
//! - `GET /health` — liveness check with the crate version.
//!
//! Every contact request opens its own SQLite connection on the blocking
//! pool and drops it before the response is written.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use contact_core::db::open_db;
use contact_core::{
    core_version, ContactId, ContactRecord, ContactService, RepoError, ServiceError,
    ServiceResult, SqliteContactStore,
};
use log::{error, warn};
use serde_json::json;

/// Shared router state: where each request opens its connection.
#[derive(Debug, Clone)]
pub struct AppState {
    db_path: PathBuf,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

/// Failure of one HTTP request.
#[derive(Debug)]
pub enum ApiError {
    /// Body was not a decodable contact record.
    MalformedBody(JsonRejection),
    Service(ServiceError),
    /// The blocking task running the request died.
    Task(String),
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::MalformedBody(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MalformedBody(rejection) => {
                warn!(
                    "event=http_request module=http status=rejected reason=malformed_body error={}",
                    rejection.body_text()
                );
                StatusCode::BAD_REQUEST.into_response()
            }
            Self::Service(ServiceError::Validation(_)) => StatusCode::BAD_REQUEST.into_response(),
            Self::Service(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    error!("event=http_request module=http status=error error={err}");
                }
                (status, Json(json!({ "error": err.to_string() }))).into_response()
            }
            Self::Task(message) => {
                error!("event=http_request module=http status=error error={message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}

/// Build the axum `Router` serving the contact routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .with_state(Arc::new(state))
}

/// Runs `operation` against a service bound to a fresh connection.
///
/// The connection lives only for the duration of the closure.
async fn with_service<T, F>(state: &AppState, operation: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ContactService<SqliteContactStore<'_>>) -> ServiceResult<T> + Send + 'static,
{
    let db_path = state.db_path.clone();
    tokio::task::spawn_blocking(move || -> ServiceResult<T> {
        let conn = open_db(&db_path).map_err(RepoError::from)?;
        let service = ContactService::new(SqliteContactStore::try_new(&conn)?);
        operation(&service)
    })
    .await
    .map_err(|err| ApiError::Task(format!("request task failed: {err}")))?
    .map_err(ApiError::Service)
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true, "version": core_version() }))
}

async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContactRecord>>, ApiError> {
    let contacts = with_service(&state, |service| service.list_contacts()).await?;
    Ok(Json(contacts))
}

async fn get_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ContactId>,
) -> Result<Json<ContactRecord>, ApiError> {
    let contact = with_service(&state, move |service| service.get_contact(id)).await?;
    Ok(Json(contact))
}

async fn create_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactRecord>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(contact) = payload?;
    let created = with_service(&state, move |service| service.create_contact(&contact)).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, created.location)],
        Json(created.record),
    )
        .into_response())
}

async fn update_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ContactId>,
    payload: Result<Json<ContactRecord>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(contact) = payload?;
    with_service(&state, move |service| service.update_contact(id, contact)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ContactId>,
) -> Result<StatusCode, ApiError> {
    with_service(&state, move |service| service.delete_contact(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
