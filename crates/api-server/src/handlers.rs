use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use domain::{DomainError, UserService};
use serde_json::json;
use std::sync::Arc;

use crate::validation::{parse_id, validate_user_payload, FieldError, RawUserPayload};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
}

pub async fn liveness() -> &'static str {
    "API is up"
}

pub async fn list_users(State(state): State<AppState>) -> Response {
    match state.user_service.get_all_users().await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => domain_failure(e),
    }
}

pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return validation_failure(vec![e]),
    };

    match state.user_service.get_user_by_id(id).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => domain_failure(e),
    }
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<RawUserPayload>,
) -> Response {
    let new_user = match validate_user_payload(&payload) {
        Ok(new_user) => new_user,
        Err(errors) => return validation_failure(errors),
    };

    match state.user_service.create_user(new_user).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => domain_failure(e),
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<RawUserPayload>,
) -> Response {
    // Path and body failures aggregate into one 400.
    let mut errors = Vec::new();
    let id = parse_id(&id).map_err(|e| errors.push(e)).ok();
    let new_user = match validate_user_payload(&payload) {
        Ok(new_user) => Some(new_user),
        Err(mut body_errors) => {
            errors.append(&mut body_errors);
            None
        }
    };
    let (id, new_user) = match (id, new_user) {
        (Some(id), Some(new_user)) => (id, new_user),
        _ => return validation_failure(errors),
    };

    match state.user_service.update_user(id, new_user).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => domain_failure(e),
    }
}

pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return validation_failure(vec![e]),
    };

    match state.user_service.delete_user(id).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "message": "User deleted" }))).into_response(),
        Err(e) => domain_failure(e),
    }
}

fn validation_failure(errors: Vec<FieldError>) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
}

fn domain_failure(err: DomainError) -> Response {
    match err {
        DomainError::UserNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "User not found" })),
        )
            .into_response(),
        // Driver message passed through verbatim; nothing is retried or
        // classified further at this layer.
        DomainError::RepositoryError(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": message })),
        )
            .into_response(),
    }
}
