// src/models/movie.rs
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Movie {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category_id: i64,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}
