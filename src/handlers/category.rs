// src/handlers/category.rs
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use crate::dtos::category::{
    validate_name, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::error::{map_unique_violation, AppError};
use crate::repository::categories;
use crate::state::AppState;

// GET /v2/categorias
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = categories::list(&state.db_pool).await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

// GET /v2/categorias/{id}
#[instrument(skip(state), fields(id))]
pub async fn get_category(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = categories::get(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Category not found"))?;
    Ok(Json(CategoryResponse::from(category)))
}

// POST /v2/categorias
#[instrument(skip(state, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    let name = validate_name(&payload.nombre)?;

    // checked up front so a duplicate never reaches the insert
    if categories::exists_by_name(&state.db_pool, &name).await? {
        return Err(AppError::conflict("La categoria ya existe"));
    }

    let category = categories::create(&state.db_pool, &name)
        .await
        .map_err(|e| map_unique_violation(e, "La categoria ya existe"))?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

// PUT /v2/categorias/{id}
#[instrument(skip(state, payload), fields(id))]
pub async fn update_category(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    if payload.id.is_some_and(|body_id| body_id != id) {
        return Err(AppError::validation("Id does not match the route"));
    }

    let name = validate_name(&payload.nombre)?;

    if !categories::exists_by_id(&state.db_pool, id).await? {
        return Err(AppError::not_found(format!(
            "No se encontro la categoria con ID {id}"
        )));
    }

    let (category, _) = categories::upsert(&state.db_pool, id, &name)
        .await
        .map_err(|e| map_unique_violation(e, "La categoria ya existe"))?;

    Ok(Json(CategoryResponse::from(category)))
}

// DELETE /v2/categorias/{id}
#[instrument(skip(state), fields(id))]
pub async fn delete_category(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    if !categories::exists_by_id(&state.db_pool, id).await? {
        return Err(AppError::not_found(format!(
            "No se encontro la categoria con ID {id}"
        )));
    }

    if !categories::delete(&state.db_pool, id).await? {
        return Err(AppError::internal("Algo salio mal borrando el registro"));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    use crate::config::Config;

    fn test_state(pool: PgPool) -> AppState {
        AppState::new(
            pool,
            Config {
                database_url: String::new(),
                jwt_secret: "test-secret".to_string(),
                host: "127.0.0.1".parse().unwrap(),
                port: 0,
                public_base_url: "http://localhost:3000".to_string(),
                upload_dir: std::env::temp_dir().join("peliculas-api-tests"),
            },
        )
    }

    async fn count(pool: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn create_request(nombre: &str) -> Json<CreateCategoryRequest> {
        Json(CreateCategoryRequest {
            nombre: nombre.to_string(),
        })
    }

    #[sqlx::test]
    async fn duplicate_name_is_rejected_without_mutating_the_store(pool: PgPool) {
        let state = test_state(pool.clone());

        create_category(State(state.clone()), create_request("Drama"))
            .await
            .unwrap();

        // same name modulo case and surrounding whitespace
        let err = create_category(State(state), create_request("  drama "))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(count(&pool).await, 1);
    }

    #[sqlx::test]
    async fn created_category_is_readable_with_server_timestamp(pool: PgPool) {
        let state = test_state(pool);

        let (status, Json(created)) = create_category(State(state.clone()), create_request("Drama"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(fetched) = get_category(Path(created.id), State(state)).await.unwrap();
        assert_eq!(fetched.nombre, "Drama");
        assert!(chrono::DateTime::parse_from_rfc3339(&fetched.fecha_creacion).is_ok());
    }

    #[sqlx::test]
    async fn updating_unknown_id_is_not_found_and_never_inserts(pool: PgPool) {
        let state = test_state(pool.clone());

        let err = update_category(
            Path(99),
            State(state),
            Json(UpdateCategoryRequest {
                id: None,
                nombre: "Drama".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(count(&pool).await, 0);
    }

    #[sqlx::test]
    async fn deleting_unknown_id_is_rejected(pool: PgPool) {
        let state = test_state(pool.clone());

        let err = delete_category(Path(99), State(state)).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(count(&pool).await, 0);
    }
}
