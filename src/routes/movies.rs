// src/routes/movies.rs
use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::movie::{
    create_movie, delete_movie, get_movie, list_movies, movies_in_category, search_movies,
    update_movie,
};
use crate::middleware::auth::{require_admin, require_auth};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/v1/peliculas", post(create_movie))
        .route("/v1/peliculas/{id}", put(update_movie).delete(delete_movie))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/v1/peliculas", get(list_movies))
        .route("/v1/peliculas/buscar", get(search_movies))
        .route("/v1/peliculas/categoria/{categoria_id}", get(movies_in_category))
        .route("/v1/peliculas/{id}", get(get_movie))
        .merge(admin)
}
