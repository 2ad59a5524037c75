// src/dtos/category.rs
//
// Wire field names keep the original API's JSON contract (Spanish PascalCase).
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::category::Category;

pub const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(rename = "Nombre")]
    pub nombre: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(rename = "Id", default)]
    pub id: Option<i64>,
    #[serde(rename = "Nombre")]
    pub nombre: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Nombre")]
    pub nombre: String,
    #[serde(rename = "FechaCreacion")]
    pub fecha_creacion: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            nombre: category.name,
            fecha_creacion: category.created_at.to_rfc3339(),
        }
    }
}

/// Trims and validates a category name: required, at most 100 characters.
pub fn validate_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::validation("El Nombre es obligatorio"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation("El numero maximo de caracteres es de 100"));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn response_uses_original_wire_names() {
        let value = serde_json::to_value(CategoryResponse::from(Category {
            id: 1,
            name: "Drama".to_string(),
            created_at: Utc::now(),
        }))
        .unwrap();

        assert_eq!(value["Nombre"], "Drama");
        assert!(value.get("FechaCreacion").is_some());
        assert!(value.get("name").is_none());
    }

    #[test]
    fn name_is_trimmed() {
        assert_eq!(validate_name("  Drama  ").unwrap(), "Drama");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn overlong_name_is_rejected() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_name(&long).is_err());
        let max = "x".repeat(MAX_NAME_LEN);
        assert!(validate_name(&max).is_ok());
    }
}
