/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/wellspring | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | Runtime environment |
/// | DATABASE_PATH | {WORK_DIR}/proposals.db | SQLite database file |
/// | NOTIFY_WEBHOOK_URL | (unset) | Activity notification endpoint |
/// | APPROVAL_EMAIL_URL | (unset) | Approval email endpoint |
/// | STAFF_API_KEY | (unset) | Key granting staff access |
/// | REQUEST_TIMEOUT_MS | 30000 | Outbound HTTP timeout (millis) |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/wellspring HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// SQLite database file path
    pub database_path: String,
    /// Activity notification endpoint (unset disables notifications)
    pub notify_webhook_url: Option<String>,
    /// Approval email endpoint (unset disables the email)
    pub approval_email_url: Option<String>,
    /// Key granting staff access; unset means no staff endpoints
    pub staff_api_key: Option<String>,
    /// Outbound HTTP request timeout (millis)
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/wellspring".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{}/proposals.db", work_dir));

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            notify_webhook_url: std::env::var("NOTIFY_WEBHOOK_URL").ok(),
            approval_email_url: std::env::var("APPROVAL_EMAIL_URL").ok(),
            staff_api_key: std::env::var("STAFF_API_KEY").ok(),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            work_dir,
            database_path,
        }
    }

    /// Override the filesystem and port settings, typically for tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_path = format!("{}/proposals.db", config.work_dir);
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
