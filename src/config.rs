use config::{Config as ConfigBuilder, ConfigError, Environment as EnvSource, File, Map};
use serde::Deserialize;
use std::env;

/// Signing secret used when none is configured. Refused in production.
pub const FALLBACK_JWT_SECRET: &str = "formforge-development-secret-change-me";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// Cross-origin access for the browser frontend. Disabled when `origin` is unset.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub origin: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_gemini_model(),
            endpoint: default_gemini_endpoint(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 4000,
            },
            database: DatabaseConfig {
                url: "sqlite:formforge.db".to_string(),
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: FALLBACK_JWT_SECRET.to_string(),
            },
            cors: CorsConfig::default(),
            gemini: GeminiConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Layers defaults, an optional TOML file, `FORMFORGE__*` variables and
    /// the unprefixed variables used by existing deployments.
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        Self::load_from(config_path, env::vars().collect())
    }

    /// Same as [`Config::load`] but reads variables from `vars` instead of the
    /// process environment.
    pub fn load_from(
        config_path: Option<String>,
        vars: Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("environment", "development")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 4000)?
            .set_default("database.url", "sqlite:formforge.db")?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.secret", FALLBACK_JWT_SECRET)?;

        let config_file_path = config_path
            .or_else(|| vars.get("CONFIG_PATH").cloned())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            EnvSource::with_prefix("FORMFORGE")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        // NODE_ENV only distinguishes production from everything else;
        // ENVIRONMENT wins when both are set.
        if let Some(node_env) = vars.get("NODE_ENV") {
            let environment = if node_env == "production" {
                "production"
            } else {
                "development"
            };
            builder = builder.set_override("environment", environment)?;
        }

        for (var, key) in [
            ("ENVIRONMENT", "environment"),
            ("DATABASE_URL", "database.url"),
            ("JWT_SECRET", "jwt.secret"),
            ("GEMINI_API_KEY", "gemini.api_key"),
            ("FRONTEND_ORIGIN", "cors.origin"),
            ("PORT", "server.port"),
        ] {
            if let Some(value) = vars.get(var) {
                builder = builder.set_override(key, value.as_str())?;
            }
        }

        builder.build()?.try_deserialize()
    }

    pub fn uses_fallback_secret(&self) -> bool {
        self.jwt.secret == FALLBACK_JWT_SECRET
    }

    /// Production refuses to start with a missing or weak signing secret.
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() {
            if self.uses_fallback_secret() {
                return Err("JWT secret must be configured in production".to_string());
            }
            if self.jwt.secret.len() < 32 {
                return Err("JWT secret must be at least 32 characters long".to_string());
            }
        }
        if self.jwt.secret.is_empty() {
            return Err("JWT secret must not be empty".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if let Some(origin) = &self.cors.origin {
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(format!("CORS origin must be an http(s) URL, got {origin}"));
            }
        }
        Ok(())
    }
}
