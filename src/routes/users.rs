// src/routes/users.rs
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user::{get_user, list_users, login, register};
use crate::middleware::auth::{require_admin, require_auth};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/v1/usuarios", get(list_users))
        .route("/v1/usuarios/{id}", get(get_user))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/v1/usuarios/registro", post(register))
        .route("/v1/usuarios/login", post(login))
        .merge(admin)
}
