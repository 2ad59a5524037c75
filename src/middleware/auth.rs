// src/middleware/auth.rs
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::auth::jwt::verify_token;
use crate::state::AppState;

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_REGISTERED: &str = "Registrado";

/// Identity attached to the request once the bearer token checks out.
#[derive(Clone)]
pub struct AuthContext {
    pub username: String,
    pub role: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let auth_header = match req.headers().get("Authorization").and_then(|v| v.to_str().ok()) {
        Some(h) => h,
        None => return unauthorized("Missing Authorization header"),
    };

    // Expect "Bearer <token>"
    let token = match auth_header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return unauthorized("Invalid Authorization format"),
    };

    let claims = match verify_token(token, &state.config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return unauthorized("Invalid or expired token"),
    };

    req.extensions_mut().insert(AuthContext {
        username: claims.name,
        role: claims.role,
    });

    next.run(req).await
}

/// Role gate for administrative routes. Layered inside `require_auth`, so the
/// context is present whenever the token was valid.
pub async fn require_admin(req: Request, next: Next) -> Response {
    match req.extensions().get::<AuthContext>() {
        Some(ctx) if ctx.role == ROLE_ADMIN => next.run(req).await,
        Some(_) => {
            let body = axum::Json(ErrorBody {
                error: "Insufficient role".to_string(),
                code: "forbidden",
            });
            (StatusCode::FORBIDDEN, body).into_response()
        }
        None => unauthorized("Missing authentication"),
    }
}

fn unauthorized(msg: &str) -> Response {
    let body = axum::Json(ErrorBody {
        error: msg.to_string(),
        code: "unauthorized",
    });
    (StatusCode::UNAUTHORIZED, body).into_response()
}
