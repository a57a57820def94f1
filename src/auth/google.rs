//! Google ID-token verification.
//!
//! Tokens are checked against Google's `tokeninfo` endpoint. The endpoint URL
//! can be overridden through `GOOGLE_TOKENINFO_URL`, which lets tests point it
//! at a local stub.

use crate::error::AppError;
use serde::Deserialize;

const DEFAULT_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// The subset of Google's tokeninfo response this service consumes.
#[derive(Debug, Deserialize)]
pub struct GoogleTokenInfo {
    /// Google's stable account identifier.
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
}

fn tokeninfo_url() -> String {
    std::env::var("GOOGLE_TOKENINFO_URL").unwrap_or_else(|_| DEFAULT_TOKENINFO_URL.to_string())
}

/// Verifies an ID token with the identity provider and returns its claims.
pub async fn verify_id_token(
    client: &reqwest::Client,
    id_token: &str,
) -> Result<GoogleTokenInfo, AppError> {
    let response = client
        .get(tokeninfo_url())
        .query(&[("id_token", id_token)])
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("tokeninfo request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::Internal(format!(
            "tokeninfo rejected the ID token: {}",
            response.status()
        )));
    }

    response
        .json::<GoogleTokenInfo>()
        .await
        .map_err(|e| AppError::Internal(format!("unreadable tokeninfo response: {}", e)))
}
