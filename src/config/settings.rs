//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Which repository implementation to use
    pub storage: StorageSettings,

    /// Database configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// Bearer token verification
    pub auth: AuthSettings,

    /// In-process event bus
    pub events: EventSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Log output format
    pub log: LogSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

/// PostgreSQL database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Apply pending migrations at startup
    pub run_migrations: bool,
}

/// Signing algorithm expected on incoming tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TokenAlgorithm {
    HS256,
    RS256,
}

/// JWT verification settings.
///
/// Keycloak realms sign with RS256; `public_key_pem` is the realm public key.
/// HS256 with a shared secret is accepted for local development and tests.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub algorithm: TokenAlgorithm,

    /// Shared secret for HS256
    #[serde(default)]
    pub secret: Option<String>,

    /// PEM encoded RSA public key for RS256
    #[serde(default)]
    pub public_key_pem: Option<String>,

    /// Expected `iss` claim, e.g. `https://sso.example.com/realms/squad`
    #[serde(default)]
    pub issuer: Option<String>,

    /// Expected `aud` claim
    #[serde(default)]
    pub audience: Option<String>,

    /// Allowed clock skew in seconds
    pub leeway_secs: u64,
}

/// Event bus configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EventSettings {
    /// Broadcast channel capacity; slow listeners beyond this lag
    pub bus_capacity: usize,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

/// Log format: human readable or JSON lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub format: LogFormat,
}

/// Minimum required length for HS256 secret (256 bits = 32 bytes)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if it fails [`Settings::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("storage.backend", "postgres")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("auth.algorithm", "RS256")?
            .set_default("auth.leeway_secs", 30)?
            .set_default("events.bus_capacity", 1024)?
            .set_default("cors.allowed_origins", vec!["http://localhost:5173"])?
            .set_default("log.format", "pretty")?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("auth.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("auth.issuer", std::env::var("OIDC_ISSUER").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                settings.validate()?;
                Ok(settings)
            })
    }

    /// Check cross-field requirements the deserializer cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.auth.algorithm {
            TokenAlgorithm::HS256 => {
                let len = self.auth.secret.as_deref().map(str::len).unwrap_or(0);
                if len < MIN_JWT_SECRET_LENGTH {
                    return Err(ConfigError::Message(format!(
                        "JWT secret must be at least {} characters for HS256. Current length: {}",
                        MIN_JWT_SECRET_LENGTH, len
                    )));
                }
            }
            TokenAlgorithm::RS256 => {
                if self.auth.public_key_pem.as_deref().map_or(true, str::is_empty) {
                    return Err(ConfigError::Message(
                        "auth.public_key_pem is required for RS256".into(),
                    ));
                }
            }
        }

        if self.storage.backend == StorageBackend::Postgres && self.database.url.is_empty() {
            return Err(ConfigError::Message(
                "database.url is required for the postgres storage backend".into(),
            ));
        }

        Ok(())
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Settings for tests and local runs: in-memory storage, HS256 tokens.
    pub fn for_memory(secret: &str) -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".into(),
                port: 0,
            },
            storage: StorageSettings {
                backend: StorageBackend::Memory,
            },
            database: DatabaseSettings {
                url: String::new(),
                max_connections: 1,
                min_connections: 0,
                acquire_timeout: 5,
                run_migrations: false,
            },
            auth: AuthSettings {
                algorithm: TokenAlgorithm::HS256,
                secret: Some(secret.to_string()),
                public_key_pem: None,
                issuer: None,
                audience: None,
                leeway_secs: 0,
            },
            events: EventSettings { bus_capacity: 256 },
            cors: CorsSettings {
                allowed_origins: vec![],
            },
            log: LogSettings {
                format: LogFormat::Pretty,
            },
            environment: "test".into(),
        }
    }
}
