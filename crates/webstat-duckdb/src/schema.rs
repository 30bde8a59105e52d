/// DuckDB initialization SQL.
///
/// Executed once at database open time via `Connection::execute_batch`.
/// All statements use `IF NOT EXISTS` so they are safe to re-run on every
/// startup.
///
/// `memory_limit` comes from `Config.duckdb_memory_limit`
/// (env `WEBSTAT_DUCKDB_MEMORY`, default `"1GB"`). Always set an explicit
/// limit; the DuckDB default (80% of system RAM) is not acceptable for a
/// server process.
pub fn init_sql(memory_limit: &str) -> String {
    format!(
        r#"SET memory_limit = '{memory_limit}';
SET threads = 2;

-- ===========================================
-- SETTINGS
-- ===========================================
-- Keys stored in this table:
--   'jwt_secret'  – HS256 secret shared with the identity provider
--   'version'     – Database schema version
CREATE TABLE IF NOT EXISTS settings (
    key             VARCHAR PRIMARY KEY,
    value           VARCHAR NOT NULL
);

-- ===========================================
-- WEBSITES (ownership)
-- ===========================================
CREATE SEQUENCE IF NOT EXISTS websites_id_seq START 1;
CREATE TABLE IF NOT EXISTS websites (
    id              BIGINT PRIMARY KEY DEFAULT nextval('websites_id_seq'),
    website_name    VARCHAR NOT NULL,              -- the tracked domain, also the route key
    user_id         VARCHAR NOT NULL,              -- identity provider subject
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS idx_websites_name_user ON websites(website_name, user_id);

-- ===========================================
-- PAGE VIEWS
-- ===========================================
CREATE SEQUENCE IF NOT EXISTS page_views_id_seq START 1;
CREATE TABLE IF NOT EXISTS page_views (
    id              BIGINT PRIMARY KEY DEFAULT nextval('page_views_id_seq'),
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    domain          VARCHAR,                       -- website_name of the tracked site
    page            VARCHAR                        -- full URL as reported by the tracker
);
CREATE INDEX IF NOT EXISTS idx_page_views_domain ON page_views(domain);

-- ===========================================
-- VISITS
-- ===========================================
CREATE SEQUENCE IF NOT EXISTS visits_id_seq START 1;
CREATE TABLE IF NOT EXISTS visits (
    id              BIGINT PRIMARY KEY DEFAULT nextval('visits_id_seq'),
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    website_id      VARCHAR,                       -- website_name of the tracked site
    source          VARCHAR                        -- ?utm= value, NULL when unattributed
);
CREATE INDEX IF NOT EXISTS idx_visits_website ON visits(website_id);
"#
    )
}
