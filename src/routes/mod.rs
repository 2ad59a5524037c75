pub mod categories;
pub mod movies;
pub mod users;

use axum::Router;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(categories::routes(state.clone()))
        .merge(movies::routes(state.clone()))
        .merge(users::routes(state))
}
