use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use dotenv::dotenv;
use serde_json::json;
use sqlx::PgPool;
use taskhub::routes;
use taskhub::routes::health;

fn ensure_env() {
    dotenv().ok();
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }
}

async fn connect_pool() -> PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB")
}

async fn cleanup_user(pool: &PgPool, email: &str) {
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
}

#[actix_rt::test]
async fn test_signup_missing_fields() {
    ensure_env();
    let pool = connect_pool().await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .service(web::scope("/api").configure(routes::config)),
    )
    .await;

    let incomplete_payloads = vec![
        (
            json!({ "lastName": "Saxena", "email": "akshay@gmail.com", "password": "Akshay@123" }),
            "missing firstName",
        ),
        (
            json!({ "firstName": "Akshay", "email": "akshay@gmail.com", "password": "Akshay@123" }),
            "missing lastName",
        ),
        (
            json!({ "firstName": "Akshay", "lastName": "Saxena", "password": "Akshay@123" }),
            "missing email",
        ),
        (
            json!({ "firstName": "Akshay", "lastName": "Saxena", "email": "akshay@gmail.com" }),
            "missing password",
        ),
    ];

    for (payload, description) in incomplete_payloads {
        let req = test::TestRequest::post()
            .uri("/api/signup")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            actix_web::http::StatusCode::BAD_REQUEST,
            "case: {}",
            description
        );

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"],
            "All fields (first name, last name, email, password) are required",
            "case: {}",
            description
        );
    }
}

#[actix_rt::test]
async fn test_signup_and_login_flow() {
    ensure_env();
    let pool = connect_pool().await;
    let email = "signup_flow@example.com";

    cleanup_user(&pool, email).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config)),
    )
    .await;

    let signup_payload = json!({
        "firstName": "Akshay",
        "lastName": "Saxena",
        "email": email,
        "password": "Akshay@123"
    });

    // Signup creates the user and returns a token with public fields only.
    let req = test::TestRequest::post()
        .uri("/api/signup")
        .set_json(&signup_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(
        body["token"].as_str().map(|t| !t.is_empty()).unwrap_or(false),
        "token should be a non-empty string"
    );
    assert_eq!(body["user"]["firstName"], "Akshay");
    assert_eq!(body["user"]["lastName"], "Saxena");
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());

    // A second signup with the same email is rejected, once.
    let req = test::TestRequest::post()
        .uri("/api/signup")
        .set_json(&signup_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "User with same email already exists");

    // Correct credentials log in.
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(&json!({ "email": email, "password": "Akshay@123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], email);

    // Wrong password and unknown email produce the same stable message.
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(&json!({ "email": email, "password": "WrongPassword1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid email or password");

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(&json!({ "email": "nobody_here@example.com", "password": "Akshay@123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid email or password");

    cleanup_user(&pool, email).await;
}

#[test_log::test(actix_rt::test)]
async fn test_invalid_auth_payloads() {
    ensure_env();
    let pool = connect_pool().await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .service(web::scope("/api").configure(routes::config)),
    )
    .await;

    let test_cases = vec![
        (
            "/api/login",
            json!({ "password": "Akshay@123" }),
            "login missing email",
        ),
        (
            "/api/login",
            json!({ "email": "akshay@gmail.com" }),
            "login missing password",
        ),
        (
            "/api/login",
            json!({ "email": "not-an-email", "password": "Akshay@123" }),
            "login malformed email",
        ),
        (
            "/api/signup",
            json!({
                "firstName": "Akshay",
                "lastName": "Saxena",
                "email": "not-an-email",
                "password": "Akshay@123"
            }),
            "signup malformed email",
        ),
        (
            "/api/signup",
            json!({
                "firstName": "Akshay",
                "lastName": "Saxena",
                "email": "akshay@gmail.com",
                "password": "123"
            }),
            "signup short password",
        ),
    ];

    for (uri, payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            actix_web::http::StatusCode::BAD_REQUEST,
            "case: {}",
            description
        );
    }
}
