// src/handlers/user.rs
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use crate::auth::jwt::sign_token;
use crate::auth::password::{hash_password, verify_password};
use crate::dtos::user::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::error::{map_unique_violation, AppError};
use crate::middleware::auth::ROLE_REGISTERED;
use crate::repository::users;
use crate::state::AppState;

// POST /v1/usuarios/registro
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    if payload.nombre_usuario.trim().is_empty() {
        return Err(AppError::validation("NombreUsuario es obligatorio"));
    }
    if payload.password.len() < 6 {
        return Err(AppError::validation("Password debe tener al menos 6 caracteres"));
    }

    let username = payload.nombre_usuario.trim();

    if !users::is_unique_username(&state.db_pool, username).await? {
        return Err(AppError::conflict("El usuario ya existe"));
    }

    let password_hash = hash_password(&payload.password)?;

    // Self-registered accounts get the non-administrative role.
    let user = users::create(
        &state.db_pool,
        username,
        payload.nombre.trim(),
        &password_hash,
        ROLE_REGISTERED,
    )
    .await
    .map_err(|e| map_unique_violation(e, "El usuario ya existe"))?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// POST /v1/usuarios/login
//
// Unknown username and wrong password answer identically: 401 with an empty
// token and no user data, so callers cannot enumerate accounts.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    if payload.nombre_usuario.trim().is_empty() {
        return Err(AppError::validation("NombreUsuario es obligatorio"));
    }
    if payload.password.is_empty() {
        return Err(AppError::validation("Password es obligatorio"));
    }

    let user = match users::find_by_username(&state.db_pool, payload.nombre_usuario.trim()).await? {
        Some(user) => user,
        None => return Ok(denied()),
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        return Ok(denied());
    }

    let token = sign_token(&user.username, &user.role, &state.config.jwt_secret)?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            token,
            usuario: Some(UserResponse::from(user)),
        }),
    ))
}

fn denied() -> (StatusCode, Json<LoginResponse>) {
    (StatusCode::UNAUTHORIZED, Json(LoginResponse::denied()))
}

// GET /v1/usuarios
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = users::list(&state.db_pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// GET /v1/usuarios/{id}
#[instrument(skip(state), fields(id))]
pub async fn get_user(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let user = users::get(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(UserResponse::from(user)))
}
