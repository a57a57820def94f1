use crate::{
    auth::{
        generate_token, google::verify_id_token, google::GoogleTokenInfo, hash_password,
        verify_password, AuthResponse, GoogleLoginRequest, LoginRequest, SignupRequest,
    },
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, google_id, created_at";

/// Sign up a new user
///
/// Creates an account from first name, last name, email, and password, and
/// returns a token alongside the user's public fields.
#[utoipa::path(
    context_path = "/api",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User successfully created", body = AuthResponse),
        (status = 400, description = "Missing fields or email already registered"),
        (status = 500, description = "Failed to sign up user")
    ),
    tag = "users"
)]
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    payload: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    let input = payload.into_inner();
    input.require_complete()?;
    input.validate()?;
    let (first_name, last_name, email, password) = input.into_fields()?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            log::error!("signup: email lookup failed: {}", e);
            AppError::Internal("Failed to sign up user".into())
        })?;

    if existing.is_some() {
        return Err(AppError::Conflict(
            "User with same email already exists".into(),
        ));
    }

    let password_hash = hash_password(&password)?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (first_name, last_name, email, password_hash) \
         VALUES ($1, $2, $3, $4) RETURNING {}",
        USER_COLUMNS
    ))
    .bind(&first_name)
    .bind(&last_name)
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("signup: insert failed: {}", e);
        AppError::Internal("Failed to sign up user".into())
    })?;

    let token = generate_token(user.id)
        .map_err(|_| AppError::Internal("Failed to sign up user".into()))?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Log in a user
///
/// Authenticates by email and password and returns a token alongside the
/// user's public fields. Unknown email and wrong password are deliberately
/// indistinguishable.
#[utoipa::path(
    context_path = "/api",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User successfully logged in", body = AuthResponse),
        (status = 400, description = "Invalid email or password"),
        (status = 500, description = "Failed to log in user")
    ),
    tag = "users"
)]
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = $1",
        USER_COLUMNS
    ))
    .bind(&payload.email)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("login: user lookup failed: {}", e);
        AppError::Internal("Failed to log in user".into())
    })?;

    let user = user.ok_or_else(|| AppError::Auth("Invalid email or password".into()))?;

    // Accounts created through Google sign-in have no password to check.
    let stored_hash = user
        .password_hash
        .as_deref()
        .ok_or_else(|| AppError::Auth("Invalid email or password".into()))?;

    if !verify_password(&payload.password, stored_hash)? {
        return Err(AppError::Auth("Invalid email or password".into()));
    }

    let token = generate_token(user.id)
        .map_err(|_| AppError::Internal("Failed to log in user".into()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Log in with a Google ID token
///
/// Verifies the token with Google, then finds or creates the matching user:
/// first by Google account id, then by email (linking the account), otherwise
/// a new passwordless user is created.
#[utoipa::path(
    context_path = "/api",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "User successfully logged in", body = AuthResponse),
        (status = 500, description = "Failed to log in with Google")
    ),
    tag = "users"
)]
#[post("/google-login")]
pub async fn google_login(
    pool: web::Data<PgPool>,
    http: web::Data<reqwest::Client>,
    payload: web::Json<GoogleLoginRequest>,
) -> Result<impl Responder, AppError> {
    let info = verify_id_token(http.get_ref(), &payload.id_token)
        .await
        .map_err(|e| {
            log::error!("google login: token verification failed: {}", e);
            AppError::Internal("Failed to log in with Google".into())
        })?;

    let user = find_or_create_google_user(pool.get_ref(), &info)
        .await
        .map_err(|e| {
            log::error!("google login: store lookup failed: {}", e);
            AppError::Internal("Failed to log in with Google".into())
        })?;

    let token = generate_token(user.id)
        .map_err(|_| AppError::Internal("Failed to log in with Google".into()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

async fn find_or_create_google_user(
    pool: &PgPool,
    info: &GoogleTokenInfo,
) -> Result<User, sqlx::Error> {
    if let Some(user) = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE google_id = $1",
        USER_COLUMNS
    ))
    .bind(&info.sub)
    .fetch_optional(pool)
    .await?
    {
        return Ok(user);
    }

    // An existing password account with the same email gets linked instead of
    // duplicated, preserving the email uniqueness invariant.
    if let Some(user) = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET google_id = $1 WHERE email = $2 RETURNING {}",
        USER_COLUMNS
    ))
    .bind(&info.sub)
    .bind(&info.email)
    .fetch_optional(pool)
    .await?
    {
        return Ok(user);
    }

    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (first_name, last_name, email, google_id) \
         VALUES ($1, $2, $3, $4) RETURNING {}",
        USER_COLUMNS
    ))
    .bind(info.given_name.as_deref().unwrap_or(""))
    .bind(info.family_name.as_deref().unwrap_or(""))
    .bind(&info.email)
    .bind(&info.sub)
    .fetch_one(pool)
    .await
}
