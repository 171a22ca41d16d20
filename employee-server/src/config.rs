//! Server configuration

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | sqlite:employees.db | SQLite connection URL |
/// | HTTP_HOST | 0.0.0.0 | Listen address |
/// | HTTP_PORT | 8080 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | Default log level when RUST_LOG is unset |
/// | LOG_DIR | (unset) | Also write logs to a daily rolling file here |
/// | DB_MAX_CONNECTIONS | 5 | Connection pool size |
/// | CORS_ALLOWED_ORIGIN | (unset) | Single allowed origin; permissive when unset |
///
/// # Example
///
/// ```ignore
/// DATABASE_URL=sqlite:/data/employees.db HTTP_PORT=9000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL (`sqlite::memory:` allowed)
    pub database_url: String,
    /// Listen address
    pub http_host: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Default log level
    pub log_level: String,
    /// Optional log directory
    pub log_dir: Option<String>,
    /// Connection pool size
    pub db_max_connections: u32,
    /// Allowed CORS origin (None = permissive)
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "sqlite:employees.db".into()),
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(5),
            cors_allowed_origin: std::env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|s| !s.is_empty()),
        }
    }

    /// Configuration for tests: given database, everything else default
    pub fn for_test(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            http_host: "127.0.0.1".into(),
            http_port: 0,
            environment: "test".into(),
            log_level: "debug".into(),
            log_dir: None,
            db_max_connections: 1,
            cors_allowed_origin: None,
        }
    }

    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
