// src/repository/categories.rs
use sqlx::PgPool;

use crate::models::category::Category;
use crate::repository::UpsertOutcome;

pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "SELECT id, name, created_at FROM categories ORDER BY name",
    )
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &PgPool, id: i64) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "SELECT id, name, created_at FROM categories WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn exists_by_id(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Case-insensitive, trimmed name comparison, matching the unique index.
pub async fn exists_by_name(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE LOWER(TRIM(name)) = LOWER(TRIM($1)))",
    )
    .bind(name)
    .fetch_one(pool)
    .await
}

/// Inserts a new category; the creation timestamp is stamped server-side.
pub async fn create(pool: &PgPool, name: &str) -> Result<Category, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name) VALUES ($1) RETURNING id, name, created_at",
    )
    .bind(name)
    .fetch_one(pool)
    .await
}

/// Update-or-insert keyed by id. The timestamp is restamped on either path.
pub async fn upsert(
    pool: &PgPool,
    id: i64,
    name: &str,
) -> Result<(Category, UpsertOutcome), sqlx::Error> {
    let updated = sqlx::query_as::<_, Category>(
        "UPDATE categories SET name = $2, created_at = NOW()
         WHERE id = $1
         RETURNING id, name, created_at",
    )
    .bind(id)
    .bind(name)
    .fetch_optional(pool)
    .await?;

    if let Some(category) = updated {
        return Ok((category, UpsertOutcome::Updated));
    }

    let inserted = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (id, name) VALUES ($1, $2) RETURNING id, name, created_at",
    )
    .bind(id)
    .bind(name)
    .fetch_one(pool)
    .await?;

    // keep the serial sequence ahead of the explicitly written id so later
    // inserts cannot collide with it
    sqlx::query(
        "SELECT setval(pg_get_serial_sequence('categories', 'id'), (SELECT MAX(id) FROM categories))",
    )
    .execute(pool)
    .await?;

    Ok((inserted, UpsertOutcome::Inserted))
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    async fn upsert_updates_in_place(pool: PgPool) {
        let created = create(&pool, "Drama").await.unwrap();

        let (updated, outcome) = upsert(&pool, created.id, "Suspenso").await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Suspenso");
    }

    #[sqlx::test]
    async fn upsert_insert_arm_keeps_the_sequence_ahead(pool: PgPool) {
        let (first, outcome) = upsert(&pool, 1, "Drama").await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        // a later plain insert must pick a fresh id, not collide with the
        // explicitly written one
        let next = create(&pool, "Terror").await.unwrap();
        assert_ne!(next.id, first.id);
    }

    #[sqlx::test]
    async fn name_existence_is_case_insensitive_and_trimmed(pool: PgPool) {
        create(&pool, "Drama").await.unwrap();

        assert!(exists_by_name(&pool, "  DRAMA ").await.unwrap());
        assert!(!exists_by_name(&pool, "Terror").await.unwrap());
    }
}
