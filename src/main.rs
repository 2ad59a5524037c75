// src/main.rs
mod auth;
mod config;
mod database;
mod dtos;
mod error;
mod handlers;
mod middleware;
mod models;
mod repository;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::fmt::init as tracing_init;

#[tokio::main]
async fn main() {
    tracing_init();
    dotenv().ok();

    let config = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(%e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let db_pool = match database::create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create database pool");
            std::process::exit(1);
        }
    };

    if let Err(e) = database::run_migrations(&db_pool).await {
        tracing::error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    let addr = SocketAddr::from((config.host, config.port));
    let app_state = state::AppState::new(db_pool, config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = routes::create_router(app_state.clone()).route("/health", get(health_check));

    let app = Router::new()
        .nest("/api", api)
        .layer(cors)
        .with_state(app_state);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => {
            tracing::info!("Server running on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
    }
}

async fn health_check() -> &'static str {
    "OK"
}
