use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub business_registry: BusinessRegistryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4), log_format: default_log_format() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Signed session cookie settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_session_ttl_hours")]
    pub ttl_hours: i64,
    #[serde(default)]
    pub cookie_secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), ttl_hours: default_session_ttl_hours(), cookie_secure: false }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    S3,
    #[default]
    Local,
}

/// Where uploaded store/menu images go.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub kind: StorageKind,
    /// S3-compatible endpoint, e.g. `https://s3.ap-northeast-2.amazonaws.com`
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub bucket: String,
    /// Prefix of the URLs handed back to callers.
    #[serde(default)]
    pub public_base_url: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Falls back to `AWS_ACCESS_KEY_ID`.
    #[serde(default)]
    pub access_key_id: String,
    /// Falls back to `AWS_SECRET_ACCESS_KEY`.
    #[serde(default)]
    pub secret_access_key: String,
    #[serde(default = "default_local_root")]
    pub local_root: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::Local,
            endpoint: String::new(),
            bucket: String::new(),
            public_base_url: String::new(),
            region: default_region(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            local_root: default_local_root(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusinessRegistryConfig {
    #[serde(default = "default_registry_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub verify_on_register: bool,
}

impl Default for BusinessRegistryConfig {
    fn default() -> Self {
        Self { base_url: default_registry_url(), api_key: String::new(), verify_on_register: false }
    }
}

fn default_log_format() -> String { "compact".into() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_session_ttl_hours() -> i64 { 12 }
fn default_region() -> String { "ap-northeast-2".into() }
fn default_local_root() -> String { "data/uploads".into() }
fn default_max_upload_bytes() -> usize { 10 * 1024 * 1024 }
fn default_registry_url() -> String { "https://bizno.net/api/fapi".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl AppConfig {
    /// Config file if present, otherwise defaults filled from the environment.
    /// A file that exists but does not parse is an error.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.session.normalize_from_env();
        self.session.validate()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        self.business_registry.normalize_from_env();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl SessionConfig {
    pub fn normalize_from_env(&mut self) {
        if self.jwt_secret.trim().is_empty() {
            self.jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".to_string());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.ttl_hours <= 0 {
            return Err(anyhow!("session.ttl_hours must be positive"));
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if self.kind != StorageKind::S3 {
            return;
        }
        if self.access_key_id.trim().is_empty() {
            if let Ok(key) = std::env::var("AWS_ACCESS_KEY_ID") {
                self.access_key_id = key;
            }
        }
        if self.secret_access_key.trim().is_empty() {
            if let Ok(secret) = std::env::var("AWS_SECRET_ACCESS_KEY") {
                self.secret_access_key = secret;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.kind {
            StorageKind::S3 => {
                if self.endpoint.trim().is_empty() || self.bucket.trim().is_empty() {
                    return Err(anyhow!("storage.endpoint and storage.bucket are required for kind = \"s3\""));
                }
                if self.access_key_id.trim().is_empty() || self.secret_access_key.trim().is_empty() {
                    return Err(anyhow!("storage.access_key_id and storage.secret_access_key are required for kind = \"s3\""));
                }
            }
            StorageKind::Local => {
                if self.local_root.trim().is_empty() {
                    return Err(anyhow!("storage.local_root is required for kind = \"local\""));
                }
            }
        }
        if self.max_upload_bytes == 0 {
            return Err(anyhow!("storage.max_upload_bytes must be positive"));
        }
        Ok(())
    }

    /// Base of returned URLs; S3 falls back to `{endpoint}/{bucket}`, local to `/uploads`.
    pub fn resolved_public_base_url(&self) -> String {
        let base = if !self.public_base_url.trim().is_empty() {
            self.public_base_url.clone()
        } else {
            match self.kind {
                StorageKind::S3 => format!("{}/{}", self.endpoint.trim_end_matches('/'), self.bucket),
                StorageKind::Local => "/uploads".to_string(),
            }
        };
        base.trim_end_matches('/').to_string()
    }
}

impl BusinessRegistryConfig {
    pub fn normalize_from_env(&mut self) {
        if self.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("BUSINESS_API_KEY") {
                self.api_key = key;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> AppConfig {
        toml::from_str(s).expect("valid toml")
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let cfg = parse("[database]\nurl = \"sqlite::memory:\"\n");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.session.ttl_hours, 12);
        assert_eq!(cfg.storage.kind, StorageKind::Local);
        assert_eq!(cfg.storage.max_upload_bytes, 10 * 1024 * 1024);
        assert!(!cfg.business_registry.verify_on_register);
    }

    #[test]
    fn database_url_scheme_is_checked() {
        let mut db = parse("[database]\nurl = \"mysql://x\"\n").database;
        db.min_connections = 1;
        assert!(db.validate().is_err());
        db.url = "postgres://u:p@localhost/db".into();
        assert!(db.validate().is_ok());
    }

    #[test]
    fn s3_storage_requires_endpoint_bucket_and_keys() {
        let cfg = parse("[storage]\nkind = \"s3\"\nendpoint = \"https://s3.example.com\"\naccess_key_id = \"AK\"\nsecret_access_key = \"SK\"\n");
        assert!(cfg.storage.validate().is_err());

        let cfg = parse("[storage]\nkind = \"s3\"\nendpoint = \"https://s3.example.com/\"\nbucket = \"yum\"\n");
        assert!(cfg.storage.validate().is_err());
        assert_eq!(cfg.storage.region, "ap-northeast-2");

        let cfg = parse("[storage]\nkind = \"s3\"\nendpoint = \"https://s3.example.com/\"\nbucket = \"yum\"\naccess_key_id = \"AK\"\nsecret_access_key = \"SK\"\n");
        assert!(cfg.storage.validate().is_ok());
        assert_eq!(cfg.storage.resolved_public_base_url(), "https://s3.example.com/yum");
    }

    #[test]
    fn public_base_url_wins_over_endpoint() {
        let cfg = parse("[storage]\nkind = \"s3\"\nendpoint = \"https://s3.example.com\"\nbucket = \"yum\"\npublic_base_url = \"https://cdn.example.com/\"\n");
        assert_eq!(cfg.storage.resolved_public_base_url(), "https://cdn.example.com");
    }

    #[test]
    fn env_only_startup_and_malformed_file() {
        let dir = std::env::temp_dir().join(format!("yumyums-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");

        std::env::set_var("CONFIG_PATH", dir.join("missing.toml"));
        std::env::set_var("DATABASE_URL", "postgres://u:p@localhost/yumyums");
        let cfg = AppConfig::load_or_env().expect("env-only config loads");
        assert_eq!(cfg.database.url, "postgres://u:p@localhost/yumyums");
        assert_eq!(cfg.database.min_connections, 2);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.database.acquire_timeout_secs, 30);

        let broken = dir.join("broken.toml");
        std::fs::write(&broken, "[server\nport = ").expect("write");
        std::env::set_var("CONFIG_PATH", &broken);
        assert!(AppConfig::load_or_env().is_err());

        std::env::remove_var("CONFIG_PATH");
        std::env::remove_var("DATABASE_URL");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
