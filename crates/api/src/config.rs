//! Process configuration, read once from the environment at startup.

/// Runtime configuration for the API binary.
///
/// `database_url: None` selects the in-memory stores (dev and tests);
/// setting `DATABASE_URL` switches the durable classes to Postgres.
#[derive(Debug, Clone)]
pub struct Config {
    pub session_secret: String,
    pub bind_addr: String,
    pub bootstrap_email: Option<String>,
    pub bootstrap_password: Option<String>,
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let session_secret = std::env::var("SESSION_SECRET").unwrap_or_else(|_| {
            tracing::warn!("SESSION_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Self {
            session_secret,
            bind_addr,
            bootstrap_email: std::env::var("BOOTSTRAP_ADMIN_EMAIL").ok(),
            bootstrap_password: std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok(),
            database_url: std::env::var("DATABASE_URL").ok(),
        }
    }
}
