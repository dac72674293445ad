//! HTTP route definitions.

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_user, delete_user, get_user, list_users, liveness, update_user, AppState,
};

/// Build the full application router: liveness at the root, the user
/// resource nested under `/users`.
pub fn create_router(state: AppState) -> Router {
    let users = Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user));

    Router::new()
        .route("/", get(liveness))
        .nest("/users", users)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
