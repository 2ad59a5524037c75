// src/repository/users.rs
use sqlx::PgPool;

use crate::models::user::User;

const COLUMNS: &str = "id, username, name, password_hash, role, created_at";

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM users WHERE LOWER(username) = LOWER($1)",
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Uniqueness check performed before registration inserts.
pub async fn is_unique_username(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
    let taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER($1))",
    )
    .bind(username)
    .fetch_one(pool)
    .await?;
    Ok(!taken)
}

pub async fn create(
    pool: &PgPool,
    username: &str,
    name: &str,
    password_hash: &str,
    role: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, name, password_hash, role)
         VALUES ($1, $2, $3, $4)
         RETURNING {COLUMNS}",
    ))
    .bind(username)
    .bind(name)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users ORDER BY username"))
        .fetch_all(pool)
        .await
}

pub async fn get(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}
