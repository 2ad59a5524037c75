// src/storage.rs
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::AppError;

/// Served when a movie is created without a poster.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400";

/// Generates a storage name with a random component, keeping the original
/// extension. Concurrent uploads of the same file therefore never collide on
/// the same path.
pub fn generated_filename(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("{}{ext}", Uuid::new_v4())
}

/// Public URL for a stored poster: `{base}/ImagenesPeliculas/{filename}`.
pub fn public_url(base_url: &str, filename: &str) -> String {
    format!("{}/ImagenesPeliculas/{filename}", base_url.trim_end_matches('/'))
}

/// Writes the uploaded bytes under the configured directory and returns the
/// local path. The directory is created on first use.
pub async fn save_image(dir: &Path, filename: &str, data: &[u8]) -> Result<PathBuf, AppError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::internal(format!("Failed to create upload dir: {e}")))?;

    let path = dir.join(filename);
    tokio::fs::write(&path, data)
        .await
        .map_err(|e| AppError::internal(format!("Failed to store image: {e}")))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_keeps_the_extension() {
        let name = generated_filename("poster.jpg");
        assert!(name.ends_with(".jpg"));
        assert!(name.len() > ".jpg".len());
    }

    #[test]
    fn filename_without_extension_is_bare() {
        let name = generated_filename("poster");
        assert!(!name.contains('.'));
    }

    #[test]
    fn filenames_are_unique() {
        assert_ne!(generated_filename("a.png"), generated_filename("a.png"));
    }

    #[test]
    fn url_joins_base_and_filename() {
        assert_eq!(
            public_url("http://localhost:3000/", "abc.jpg"),
            "http://localhost:3000/ImagenesPeliculas/abc.jpg"
        );
    }

    #[tokio::test]
    async fn save_writes_the_bytes() {
        let dir = std::env::temp_dir().join("peliculas-api-test-uploads");
        let name = generated_filename("poster.png");
        let path = save_image(&dir, &name, b"png-bytes").await.unwrap();

        let stored = tokio::fs::read(&path).await.unwrap();
        assert_eq!(stored, b"png-bytes");

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
