use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;

use taskhub::config::Config;
use taskhub::middleware::ErrorLogger;
use taskhub::routes::{self, docs, health};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    // Shared HTTP client for the Google tokeninfo calls.
    let http_client = reqwest::Client::new();

    log::info!("Starting server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(http_client.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .wrap(ErrorLogger)
            .service(health::health)
            .service(docs::swagger_ui())
            .service(web::scope("/api").configure(routes::config))
    })
    .bind((config.server_host.clone(), config.server_port))?
    .run()
    .await
}
