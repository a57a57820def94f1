use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;

/// Health check endpoint
///
/// Probes the database with a trivial query and reports `ok` or `degraded`
/// alongside the service name and current timestamp. Always answers 200 so
/// the body, not the status code, carries the verdict.
#[get("/health")]
pub async fn health(pool: web::Data<PgPool>) -> impl Responder {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool.get_ref())
        .await
    {
        Ok(_) => "up",
        Err(e) => {
            log::warn!("health check: database probe failed: {}", e);
            "down"
        }
    };

    HttpResponse::Ok().json(json!({
        "service": "taskhub",
        "status": if database == "up" { "ok" } else { "degraded" },
        "database": database,
        "timestamp": Utc::now()
    }))
}
