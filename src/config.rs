// src/config.rs
use std::net::IpAddr;
use std::path::PathBuf;

/// Runtime configuration, read once at startup and handed to the router via
/// `AppState` rather than re-read from the environment per request.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    /// External base URL used when building public image links,
    /// e.g. `http://localhost:3000`.
    pub public_base_url: String,
    /// Directory poster uploads are written to.
    pub upload_dir: PathBuf,
}

impl Config {
    /// Reads configuration from the environment. A missing or empty signing
    /// secret is a fatal startup error, never a per-request one.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set".to_string())?;
        if jwt_secret.trim().is_empty() {
            return Err("JWT_SECRET must not be empty".to_string());
        }

        let host: IpAddr = std::env::var("HOST")
            .unwrap_or_else(|_| "127.0.0.1".to_string())
            .parse()
            .map_err(|e| format!("Invalid HOST: {e}"))?;

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://{host}:{port}"))
            .trim_end_matches('/')
            .to_string();

        let upload_dir = std::env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "wwwroot/ImagenesPeliculas".to_string())
            .into();

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            public_base_url,
            upload_dir,
        })
    }
}
