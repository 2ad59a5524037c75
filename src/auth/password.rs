// src/auth/password.rs
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::AppError;

pub fn hash_password(plain: &str) -> Result<String, AppError> {
    hash(plain, DEFAULT_COST).map_err(|e| AppError::internal(format!("Hash error: {e}")))
}

pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, AppError> {
    verify(plain, hashed).map_err(|e| AppError::internal(format!("Password verify error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let hashed = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hashed).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hashed = hash_password("hunter22").unwrap();
        assert!(!verify_password("hunter23", &hashed).unwrap());
    }
}
