use serde::{Deserialize, Serialize};

/// Application configuration (TOML file + environment overrides)
///
/// Sections:
/// - server: bind address and worker count
/// - database: backend selection and connection URL
/// - logging: log level filter
/// - admin: admin API token and route prefix
/// - cors: allowed origins for the public endpoints
/// - tracking: ad-platform conversion forwarding credentials
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
}

impl AppConfig {
    /// Load configuration from TOML file and environment variables
    ///
    /// Priority: ENV > config.toml > defaults
    /// ENV prefix: LG, separator: __
    /// Example: LG__SERVER__PORT=9999
    pub fn load() -> Self {
        use config::{Config, Environment, File};

        let path = "config.toml";

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("LG")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<AppConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_backend")]
    pub backend: String,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: default_database_backend(),
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Admin API configuration
///
/// An empty token disables the admin API entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_admin_prefix")]
    pub route_prefix: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            route_prefix: default_admin_prefix(),
        }
    }
}

/// CORS configuration for the public form endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorsConfig {
    /// Allowed origins; empty means same-origin only
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Ad-platform conversion forwarding configuration
///
/// Forwarding is enabled only when both pixel_id and access_token are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    #[serde(default)]
    pub pixel_id: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_graph_api_version")]
    pub graph_api_version: String,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Optional test event code for the platform's event testing tool
    #[serde(default)]
    pub test_event_code: Option<String>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            pixel_id: String::new(),
            access_token: String::new(),
            graph_api_version: default_graph_api_version(),
            default_currency: default_currency(),
            test_event_code: None,
        }
    }
}

impl TrackingConfig {
    pub fn is_enabled(&self) -> bool {
        !self.pixel_id.is_empty() && !self.access_token.is_empty()
    }
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_backend() -> String {
    "sqlite".to_string()
}

fn default_database_url() -> String {
    "sqlite://leadgate.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_admin_prefix() -> String {
    "/admin".to_string()
}

fn default_graph_api_version() -> String {
    "v18.0".to_string()
}

fn default_currency() -> String {
    "BRL".to_string()
}
