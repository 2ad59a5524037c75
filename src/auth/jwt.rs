// src/auth/jwt.rs
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Tokens are valid for 7 days from issuance.
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub name: String,
    pub role: String,
    pub exp: usize,
}

/// Builds a signed HS256 token for an already-verified identity. The caller
/// guarantees `username` is non-empty; the secret was validated non-empty at
/// startup.
pub fn sign_token(username: &str, role: &str, secret: &str) -> Result<String, AppError> {
    let exp = Utc::now() + Duration::days(TOKEN_LIFETIME_DAYS);
    let claims = Claims {
        name: username.to_string(),
        role: role.to_string(),
        exp: exp.timestamp() as usize,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::internal(format!("Token signing failed: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|d| d.claims)
    .map_err(|e| AppError::unauthorized(format!("Invalid or expired token: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn role_claim_matches_stored_role() {
        let token = sign_token("charly", "Admin", SECRET).unwrap();
        assert!(!token.is_empty());

        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.name, "charly");
        assert_eq!(claims.role, "Admin");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign_token("charly", "Registrado", SECRET).unwrap();
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            name: "charly".to_string(),
            role: "Registrado".to_string(),
            exp: (Utc::now() - Duration::hours(2)).timestamp() as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn expiry_is_seven_days_out() {
        let token = sign_token("charly", "Admin", SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();

        let expected = (Utc::now() + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp() as usize;
        // allow a few seconds of clock slack
        assert!(claims.exp.abs_diff(expected) < 10);
    }
}
