use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(|e| {
        log::error!("password hashing failed: {}", e);
        AppError::Internal("Failed to process password".into())
    })
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password).map_err(|e| {
        log::error!("password verification failed: {}", e);
        AppError::Internal("Failed to verify password".into())
    })
}
