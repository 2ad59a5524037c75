// src/routes/categories.rs
use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::category::{
    create_category, delete_category, get_category, list_categories, update_category,
};
use crate::middleware::auth::{require_admin, require_auth};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/v2/categorias", post(create_category))
        .route("/v2/categorias/{id}", put(update_category).delete(delete_category))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/v2/categorias", get(list_categories))
        .route("/v2/categorias/{id}", get(get_category))
        .merge(admin)
}
