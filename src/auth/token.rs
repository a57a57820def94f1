use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims encoded within a JWT issued by this service.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's id.
    pub sub: i32,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

fn secret() -> Result<String, AppError> {
    std::env::var("JWT_SECRET").map_err(|_| {
        log::error!("JWT_SECRET is not set");
        AppError::Internal("Failed to process token".into())
    })
}

/// Issues a JWT for the given user id, expiring in 24 hours.
///
/// Requires the `JWT_SECRET` environment variable for signing.
pub fn generate_token(user_id: i32) -> Result<String, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret()?.as_bytes()),
    )
    .map_err(|e| {
        log::error!("token generation failed: {}", e);
        AppError::Internal("Failed to generate token".into())
    })
}

/// Verifies a JWT and decodes its claims.
///
/// Default validation applies (signature, expiration). A malformed, expired,
/// or mis-signed token comes back as `AppError::Unauthorized` with a stable
/// message; the rejection reason only goes to the logs.
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret()?.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        log::debug!("token rejected: {}", e);
        AppError::Unauthorized("Invalid token".into())
    })
}
