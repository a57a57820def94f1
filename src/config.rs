use std::env;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration, read once at startup. `DATABASE_URL` is mandatory;
/// host and port fall back to loopback defaults.
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let server_port = match env::var("SERVER_PORT") {
            Ok(raw) => raw.parse().expect("SERVER_PORT must be a number"),
            Err(_) => DEFAULT_PORT,
        };

        Self {
            database_url,
            server_host,
            server_port,
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
