// src/repository/movies.rs
use sqlx::PgPool;

use crate::models::movie::Movie;
use crate::repository::{escape_like, UpsertOutcome};

const COLUMNS: &str = "id, name, description, category_id, image_url, image_path, created_at";

/// Scalar fields persisted for a movie; image columns stay optional.
#[derive(Debug)]
pub struct MovieFields {
    pub name: String,
    pub description: String,
    pub category_id: i64,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
}

pub async fn list(pool: &PgPool, page: u32, page_size: u32) -> Result<Vec<Movie>, sqlx::Error> {
    let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);
    sqlx::query_as::<_, Movie>(&format!(
        "SELECT {COLUMNS} FROM movies ORDER BY name LIMIT $1 OFFSET $2",
    ))
    .bind(i64::from(page_size))
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies")
        .fetch_one(pool)
        .await
}

pub async fn get(pool: &PgPool, id: i64) -> Result<Option<Movie>, sqlx::Error> {
    sqlx::query_as::<_, Movie>(&format!("SELECT {COLUMNS} FROM movies WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn exists_by_id(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn exists_by_name(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM movies WHERE LOWER(TRIM(name)) = LOWER(TRIM($1)))",
    )
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn in_category(pool: &PgPool, category_id: i64) -> Result<Vec<Movie>, sqlx::Error> {
    sqlx::query_as::<_, Movie>(&format!(
        "SELECT {COLUMNS} FROM movies WHERE category_id = $1 ORDER BY name",
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await
}

/// Substring search over name and description, case-insensitive. An empty or
/// missing term returns everything.
pub async fn search(pool: &PgPool, term: Option<&str>) -> Result<Vec<Movie>, sqlx::Error> {
    match term.map(str::trim).filter(|t| !t.is_empty()) {
        Some(term) => {
            let pattern = format!("%{}%", escape_like(term));
            sqlx::query_as::<_, Movie>(&format!(
                "SELECT {COLUMNS} FROM movies WHERE name ILIKE $1 OR description ILIKE $1",
            ))
            .bind(pattern)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Movie>(&format!("SELECT {COLUMNS} FROM movies"))
                .fetch_all(pool)
                .await
        }
    }
}

pub async fn create(pool: &PgPool, fields: &MovieFields) -> Result<Movie, sqlx::Error> {
    sqlx::query_as::<_, Movie>(&format!(
        "INSERT INTO movies (name, description, category_id, image_url, image_path)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {COLUMNS}",
    ))
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(fields.category_id)
    .bind(&fields.image_url)
    .bind(&fields.image_path)
    .fetch_one(pool)
    .await
}

/// Update-or-insert keyed by id; overwrites every scalar column and restamps
/// the creation timestamp, inserting only when no row matched.
pub async fn upsert(
    pool: &PgPool,
    id: i64,
    fields: &MovieFields,
) -> Result<(Movie, UpsertOutcome), sqlx::Error> {
    let updated = sqlx::query_as::<_, Movie>(&format!(
        "UPDATE movies SET name = $2, description = $3, category_id = $4,
                image_url = $5, image_path = $6, created_at = NOW()
         WHERE id = $1
         RETURNING {COLUMNS}",
    ))
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(fields.category_id)
    .bind(&fields.image_url)
    .bind(&fields.image_path)
    .fetch_optional(pool)
    .await?;

    if let Some(movie) = updated {
        return Ok((movie, UpsertOutcome::Updated));
    }

    let inserted = sqlx::query_as::<_, Movie>(&format!(
        "INSERT INTO movies (id, name, description, category_id, image_url, image_path)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {COLUMNS}",
    ))
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(fields.category_id)
    .bind(&fields.image_url)
    .bind(&fields.image_path)
    .fetch_one(pool)
    .await?;

    // keep the serial sequence ahead of the explicitly written id so later
    // inserts cannot collide with it
    sqlx::query(
        "SELECT setval(pg_get_serial_sequence('movies', 'id'), (SELECT MAX(id) FROM movies))",
    )
    .execute(pool)
    .await?;

    Ok((inserted, UpsertOutcome::Inserted))
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM movies WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::repository::categories;

    fn fields(name: &str, description: &str, category_id: i64) -> MovieFields {
        MovieFields {
            name: name.to_string(),
            description: description.to_string(),
            category_id,
            image_url: None,
            image_path: None,
        }
    }

    #[sqlx::test]
    async fn search_matches_name_and_description(pool: PgPool) {
        let cat = categories::create(&pool, "Ciencia Ficcion").await.unwrap().id;
        create(&pool, &fields("The Matrix", "Neo", cat)).await.unwrap();
        create(&pool, &fields("Inception", "a matrix of dreams", cat)).await.unwrap();
        create(&pool, &fields("Alien", "space horror", cat)).await.unwrap();

        let found = search(&pool, Some("matrix")).await.unwrap();
        let names: Vec<_> = found.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(found.len(), 2);
        assert!(names.contains(&"The Matrix"));
        assert!(names.contains(&"Inception"));
    }

    #[sqlx::test]
    async fn empty_search_term_returns_everything(pool: PgPool) {
        let cat = categories::create(&pool, "Ciencia Ficcion").await.unwrap().id;
        create(&pool, &fields("The Matrix", "Neo", cat)).await.unwrap();
        create(&pool, &fields("Alien", "space horror", cat)).await.unwrap();

        assert_eq!(search(&pool, None).await.unwrap().len(), 2);
        assert_eq!(search(&pool, Some("  ")).await.unwrap().len(), 2);
    }

    #[sqlx::test]
    async fn upsert_insert_arm_keeps_the_sequence_ahead(pool: PgPool) {
        let cat = categories::create(&pool, "Ciencia Ficcion").await.unwrap().id;

        let (first, outcome) = upsert(&pool, 1, &fields("The Matrix", "Neo", cat)).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        let next = create(&pool, &fields("Alien", "space horror", cat)).await.unwrap();
        assert_ne!(next.id, first.id);
    }
}
