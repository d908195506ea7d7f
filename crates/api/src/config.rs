use anyhow::Context;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development alongside the
/// browser client dev servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// SQLite connection string (default: `sqlite://app.db`).
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                     |
    /// | `PORT`                 | `5000`                                        |
    /// | `DATABASE_URL`         | `sqlite://app.db`                             |
    /// | `CORS_ORIGINS`         | `http://localhost:4200,http://localhost:4201` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                          |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults; set-but-unparseable numeric values
    /// are errors.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "5000")
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url = var("DATABASE_URL", "sqlite://app.db");

        let cors_origins: Vec<String> = var(
            "CORS_ORIGINS",
            "http://localhost:4200,http://localhost:4201",
        )
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;

        Ok(Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
        })
    }
}
