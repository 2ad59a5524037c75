// src/dtos/movie.rs
use serde::Serialize;

use crate::models::movie::Movie;

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Nombre")]
    pub nombre: String,
    #[serde(rename = "Descripcion")]
    pub descripcion: String,
    #[serde(rename = "CategoriaId")]
    pub categoria_id: i64,
    #[serde(rename = "RutaImagen")]
    pub ruta_imagen: Option<String>,
    #[serde(rename = "RutaLocalImagen")]
    pub ruta_local_imagen: Option<String>,
    #[serde(rename = "FechaCreacion")]
    pub fecha_creacion: String,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            nombre: movie.name,
            descripcion: movie.description,
            categoria_id: movie.category_id,
            ruta_imagen: movie.image_url,
            ruta_local_imagen: movie.image_path,
            fecha_creacion: movie.created_at.to_rfc3339(),
        }
    }
}

/// Paginated movie listing.
#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    #[serde(rename = "Total")]
    pub total: i64,
    #[serde(rename = "Pagina")]
    pub pagina: u32,
    #[serde(rename = "TamanoPagina")]
    pub tamano_pagina: u32,
    #[serde(rename = "Peliculas")]
    pub peliculas: Vec<MovieResponse>,
}

/// Multipart form fields for create/update, collected by the handler before
/// validation. All fields arrive as text parts except the optional image.
#[derive(Debug, Default)]
pub struct MovieForm {
    pub id: Option<i64>,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub categoria_id: Option<i64>,
    pub imagen: Option<UploadedImage>,
}

#[derive(Debug)]
pub struct UploadedImage {
    pub file_name: String,
    pub data: Vec<u8>,
}
