// src/dtos/user.rs
use serde::{Deserialize, Serialize};

use crate::models::user::User;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "NombreUsuario")]
    pub nombre_usuario: String,
    #[serde(rename = "Nombre")]
    pub nombre: String,
    #[serde(rename = "Password")]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "NombreUsuario")]
    pub nombre_usuario: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// Public-safe projection of a user, never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "NombreUsuario")]
    pub nombre_usuario: String,
    #[serde(rename = "Nombre")]
    pub nombre: String,
    #[serde(rename = "Rol")]
    pub rol: String,
    #[serde(rename = "FechaCreacion")]
    pub fecha_creacion: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nombre_usuario: user.username,
            nombre: user.name,
            rol: user.role,
            fecha_creacion: user.created_at.to_rfc3339(),
        }
    }
}

/// Login always answers with this shape: a token plus user data on success,
/// an empty token and no user data on any failure.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "Token")]
    pub token: String,
    #[serde(rename = "Usuario")]
    pub usuario: Option<UserResponse>,
}

impl LoginResponse {
    pub fn denied() -> Self {
        Self {
            token: String::new(),
            usuario: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denied_login_has_empty_token_and_no_user() {
        let value = serde_json::to_value(LoginResponse::denied()).unwrap();
        assert_eq!(value["Token"], "");
        assert!(value["Usuario"].is_null());
    }

    #[test]
    fn user_projection_never_exposes_the_hash() {
        let value = serde_json::to_value(UserResponse {
            id: 1,
            nombre_usuario: "charly".to_string(),
            nombre: "Charly".to_string(),
            rol: "Registrado".to_string(),
            fecha_creacion: "2026-01-01T00:00:00+00:00".to_string(),
        })
        .unwrap();

        let body = value.to_string();
        assert!(!body.contains("password"));
        assert!(!body.contains("hash"));
        assert_eq!(value["NombreUsuario"], "charly");
    }
}
