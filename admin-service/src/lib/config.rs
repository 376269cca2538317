use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Signing secret used when none is configured. Accepted outside production only.
pub const PLACEHOLDER_JWT_SECRET: &str = "insecure-development-secret-change-me";

const PRODUCTION_RUN_MODE: &str = "production";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    #[serde(default)]
    pub bootstrap: Option<BootstrapConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .finish()
    }
}

impl JwtConfig {
    pub fn is_placeholder(&self) -> bool {
        self.secret.trim().is_empty() || self.secret == PLACEHOLDER_JWT_SECRET
    }
}

/// Argon2 work factor for new password hashes.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_cost_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Administrator created at startup when absent.
#[derive(Deserialize, Clone)]
pub struct BootstrapConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (ADMIN_DATABASE__URL, ADMIN_JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    ///
    /// # Errors
    /// Fails when sources cannot be read or deserialized, or when running in
    /// production with an unset or placeholder signing secret.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.url", "postgres://localhost:5432/admin_service")?
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 8080)?
            .set_default("jwt.secret", PLACEHOLDER_JWT_SECRET)?
            .set_default("password.memory_cost_kib", i64::from(argon2_defaults::MEMORY_COST_KIB))?
            .set_default("password.iterations", i64::from(argon2_defaults::ITERATIONS))?
            .set_default("password.parallelism", i64::from(argon2_defaults::PARALLELISM))?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: ADMIN_JWT__SECRET=... overrides jwt.secret
            .add_source(
                Environment::with_prefix("ADMIN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate(&run_mode)?;

        Ok(config)
    }

    /// Reject configurations that are unsafe for the given run mode.
    pub fn validate(&self, run_mode: &str) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must not be blank".to_string(),
            ));
        }

        if run_mode == PRODUCTION_RUN_MODE && self.jwt.is_placeholder() {
            return Err(ConfigError::Message(
                "jwt.secret must be set to a non-default value in production".to_string(),
            ));
        }

        Ok(())
    }
}

mod argon2_defaults {
    // Argon2id recommended parameters (RFC 9106 second recommendation, OWASP)
    pub const MEMORY_COST_KIB: u32 = 19 * 1024;
    pub const ITERATIONS: u32 = 2;
    pub const PARALLELISM: u32 = 1;
}
