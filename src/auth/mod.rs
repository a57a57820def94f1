pub mod extractors;
pub mod google;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;
use crate::models::user::PublicUser;

// Re-export the pieces handlers and tests reach for.
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Payload for `POST /api/signup`.
///
/// Every field is optional at the deserialization layer so that a missing
/// field produces the documented error message instead of a framework-level
/// deserialization failure.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Must be a valid email address when present.
    #[validate(email)]
    pub email: Option<String>,
    /// Must be at least 6 characters when present.
    #[validate(length(min = 6))]
    pub password: Option<String>,
}

impl SignupRequest {
    /// Checks that all four fields were supplied, with the stable error
    /// message the API documents for missing input.
    pub fn require_complete(&self) -> Result<(), AppError> {
        if self.first_name.is_none()
            || self.last_name.is_none()
            || self.email.is_none()
            || self.password.is_none()
        {
            return Err(AppError::Validation(
                "All fields (first name, last name, email, password) are required".into(),
            ));
        }
        Ok(())
    }

    /// Consumes the payload into its fields. Call after `require_complete`.
    pub fn into_fields(self) -> Result<(String, String, String, String), AppError> {
        match (self.first_name, self.last_name, self.email, self.password) {
            (Some(first), Some(last), Some(email), Some(password)) => {
                Ok((first, last, email, password))
            }
            _ => Err(AppError::Validation(
                "All fields (first name, last name, email, password) are required".into(),
            )),
        }
    }
}

/// Payload for `POST /api/login`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Payload for `POST /api/google-login`: a Google-issued ID token.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

/// Response for all successful authentication flows: the signed JWT plus the
/// public projection of the user (never the password hash).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}
