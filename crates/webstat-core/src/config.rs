use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: String,
    /// DuckDB size string such as `"1GB"` or `"512MB"`.
    pub duckdb_memory_limit: String,
    pub cors_origins: Vec<String>,
    /// Wait between a granted ownership check and the first analytics query.
    pub fetch_grace_ms: u64,
    /// Where a request without a usable identity is sent.
    pub auth_redirect: String,
    /// Where a request for a website the user does not own is sent.
    pub dashboard_redirect: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: std::env::var("WEBSTAT_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            data_dir: std::env::var("WEBSTAT_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            duckdb_memory_limit: std::env::var("WEBSTAT_DUCKDB_MEMORY")
                .unwrap_or_else(|_| "1GB".to_string()),
            cors_origins: std::env::var("WEBSTAT_CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            fetch_grace_ms: std::env::var("WEBSTAT_FETCH_GRACE_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .map_err(|e| format!("invalid fetch grace delay: {e}"))?,
            auth_redirect: std::env::var("WEBSTAT_AUTH_REDIRECT")
                .unwrap_or_else(|_| "/auth".to_string()),
            dashboard_redirect: std::env::var("WEBSTAT_DASHBOARD_REDIRECT")
                .unwrap_or_else(|_| "/dashboard".to_string()),
        })
    }

    pub fn grace_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_grace_ms)
    }
}
