use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A user row as stored in the database.
///
/// `password_hash` is `None` for accounts created through Google sign-in that
/// never set a password. `google_id` is `None` for password-only accounts.
#[derive(Debug, FromRow)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The projection of a user that leaves the server. Never includes the
/// password hash or the Google account id.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 7,
            first_name: "Akshay".into(),
            last_name: "Saxena".into(),
            email: "akshay@gmail.com".into(),
            password_hash: Some("$2b$12$abcdefghijklmnopqrstuv".into()),
            google_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_public_projection_drops_secrets() {
        let public: PublicUser = sample_user().into();
        let json = serde_json::to_value(&public).unwrap();

        assert_eq!(json["firstName"], "Akshay");
        assert_eq!(json["lastName"], "Saxena");
        assert_eq!(json["email"], "akshay@gmail.com");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("googleId").is_none());
    }
}
