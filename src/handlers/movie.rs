// src/handlers/movie.rs
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::instrument;

use crate::dtos::movie::{MovieForm, MovieListResponse, MovieResponse, UploadedImage};
use crate::error::{map_unique_violation, AppError};
use crate::repository::movies::MovieFields;
use crate::repository::{categories, movies};
use crate::state::AppState;
use crate::storage;

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub pagina: Option<u32>,
    pub tamano_pagina: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub nombre: Option<String>,
}

// GET /v1/peliculas
#[instrument(skip(state))]
pub async fn list_movies(
    Query(params): Query<ListParams>,
    State(state): State<AppState>,
) -> Result<Json<MovieListResponse>, AppError> {
    let pagina = params.pagina.unwrap_or(1).max(1);
    let tamano_pagina = params
        .tamano_pagina
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let total = movies::count(&state.db_pool).await?;
    let page = movies::list(&state.db_pool, pagina, tamano_pagina).await?;

    Ok(Json(MovieListResponse {
        total,
        pagina,
        tamano_pagina,
        peliculas: page.into_iter().map(MovieResponse::from).collect(),
    }))
}

// GET /v1/peliculas/{id}
#[instrument(skip(state), fields(id))]
pub async fn get_movie(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<MovieResponse>, AppError> {
    let movie = movies::get(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie not found"))?;
    Ok(Json(MovieResponse::from(movie)))
}

// GET /v1/peliculas/buscar?nombre=
#[instrument(skip(state))]
pub async fn search_movies(
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> Result<Json<Vec<MovieResponse>>, AppError> {
    let found = movies::search(&state.db_pool, params.nombre.as_deref()).await?;
    Ok(Json(found.into_iter().map(MovieResponse::from).collect()))
}

// GET /v1/peliculas/categoria/{categoria_id}
#[instrument(skip(state), fields(categoria_id))]
pub async fn movies_in_category(
    Path(categoria_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<MovieResponse>>, AppError> {
    if !categories::exists_by_id(&state.db_pool, categoria_id).await? {
        return Err(AppError::not_found(format!(
            "No se encontro la categoria con ID {categoria_id}"
        )));
    }

    let found = movies::in_category(&state.db_pool, categoria_id).await?;
    Ok(Json(found.into_iter().map(MovieResponse::from).collect()))
}

// POST /v1/peliculas (multipart: Nombre, Descripcion, CategoriaId, Imagen)
#[instrument(skip(state, multipart))]
pub async fn create_movie(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MovieResponse>), AppError> {
    let form = parse_movie_form(&mut multipart).await?;

    let name = required_name(form.nombre.as_deref())?;
    let category_id = form
        .categoria_id
        .ok_or_else(|| AppError::validation("CategoriaId es obligatorio"))?;

    if !categories::exists_by_id(&state.db_pool, category_id).await? {
        return Err(AppError::validation("La categoria no existe"));
    }
    if movies::exists_by_name(&state.db_pool, &name).await? {
        return Err(AppError::conflict("La pelicula ya existe"));
    }

    let (image_url, image_path) = match form.imagen {
        Some(imagen) => place_image(&state, &imagen).await?,
        None => (Some(storage::PLACEHOLDER_IMAGE_URL.to_string()), None),
    };

    let movie = movies::create(
        &state.db_pool,
        &MovieFields {
            name,
            description: form.descripcion.unwrap_or_default(),
            category_id,
            image_url,
            image_path,
        },
    )
    .await
    .map_err(|e| map_unique_violation(e, "La pelicula ya existe"))?;

    Ok((StatusCode::CREATED, Json(MovieResponse::from(movie))))
}

// PUT /v1/peliculas/{id} (multipart, same fields as create plus optional Id)
#[instrument(skip(state, multipart), fields(id))]
pub async fn update_movie(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MovieResponse>, AppError> {
    let form = parse_movie_form(&mut multipart).await?;

    if form.id.is_some_and(|body_id| body_id != id) {
        return Err(AppError::validation("Id does not match the route"));
    }

    let existing = movies::get(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No se encontro la pelicula con ID {id}")))?;

    let name = required_name(form.nombre.as_deref())?;
    let category_id = form.categoria_id.unwrap_or(existing.category_id);

    if !categories::exists_by_id(&state.db_pool, category_id).await? {
        return Err(AppError::validation("La categoria no existe"));
    }

    // a new upload replaces the poster, otherwise the stored one is kept
    let (image_url, image_path) = match form.imagen {
        Some(imagen) => place_image(&state, &imagen).await?,
        None => (existing.image_url, existing.image_path),
    };

    let (movie, _) = movies::upsert(
        &state.db_pool,
        id,
        &MovieFields {
            name,
            description: form.descripcion.unwrap_or(existing.description),
            category_id,
            image_url,
            image_path,
        },
    )
    .await
    .map_err(|e| map_unique_violation(e, "La pelicula ya existe"))?;

    Ok(Json(MovieResponse::from(movie)))
}

// DELETE /v1/peliculas/{id}
#[instrument(skip(state), fields(id))]
pub async fn delete_movie(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    if !movies::exists_by_id(&state.db_pool, id).await? {
        return Err(AppError::not_found(format!(
            "No se encontro la pelicula con ID {id}"
        )));
    }

    if !movies::delete(&state.db_pool, id).await? {
        return Err(AppError::internal("Algo salio mal borrando el registro"));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn required_name(raw: Option<&str>) -> Result<String, AppError> {
    let name = raw.unwrap_or("").trim();
    if name.is_empty() {
        return Err(AppError::validation("El Nombre es obligatorio"));
    }
    Ok(name.to_string())
}

async fn place_image(
    state: &AppState,
    imagen: &UploadedImage,
) -> Result<(Option<String>, Option<String>), AppError> {
    let filename = storage::generated_filename(&imagen.file_name);
    let path = storage::save_image(&state.config.upload_dir, &filename, &imagen.data).await?;
    Ok((
        Some(storage::public_url(&state.config.public_base_url, &filename)),
        Some(path.to_string_lossy().into_owned()),
    ))
}

async fn parse_movie_form(multipart: &mut Multipart) -> Result<MovieForm, AppError> {
    let mut form = MovieForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "Id" => form.id = Some(parse_int_field(&text(field).await?, "Id")?),
            "Nombre" => form.nombre = Some(text(field).await?),
            "Descripcion" => form.descripcion = Some(text(field).await?),
            "CategoriaId" => {
                form.categoria_id = Some(parse_int_field(&text(field).await?, "CategoriaId")?)
            }
            "Imagen" => {
                let file_name = field.file_name().unwrap_or("imagen").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid image upload: {e}")))?;
                if !data.is_empty() {
                    form.imagen = Some(UploadedImage {
                        file_name,
                        data: data.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart field: {e}")))
}

fn parse_int_field(raw: &str, field: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("{field} debe ser un numero entero")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required_and_trimmed() {
        assert!(required_name(None).is_err());
        assert!(required_name(Some("   ")).is_err());
        assert_eq!(required_name(Some("  The Matrix ")).unwrap(), "The Matrix");
    }

    #[test]
    fn integer_fields_reject_garbage() {
        assert_eq!(parse_int_field(" 7 ", "CategoriaId").unwrap(), 7);
        assert!(parse_int_field("siete", "CategoriaId").is_err());
    }
}
