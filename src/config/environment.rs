// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::{limits, ports};
use anyhow::{bail, Context, Result};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational output
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Read `LOG_LEVEL`, the fallback filter when `RUST_LOG` is unset
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_str_or_default(&env_var_or("LOG_LEVEL", "info"))
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Runtime environment; only affects the cookie `Secure` attribute and secret handling
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file path
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for URL schemes other than `sqlite:`
    pub fn parse_url(s: &str) -> Result<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.contains("://") {
            bail!("Unsupported database URL scheme: {s}");
        } else {
            // Bare paths are treated as SQLite files
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("office_staff.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Connection pool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Pool capacity; callers beyond it queue for a connection
    pub max_connections: u32,
    /// Seconds a queued caller waits before failing
    pub acquire_timeout_secs: u64,
}

/// Session credential and password hashing settings
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Session credential lifetime in hours
    pub session_expiry_hours: i64,
    /// Bcrypt cost for new password hashes
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("session_expiry_hours", &self.session_expiry_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origin list, or `*`
    pub allowed_origins: String,
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Runtime environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A numeric variable cannot be parsed
    /// - `DATABASE_URL` uses an unsupported scheme
    /// - `JWT_SECRET` is missing in production
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let config = Self {
            host: env_var_or("HOST", "0.0.0.0"),
            http_port: env_var_or("HTTP_PORT", &ports::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            log_level: LogLevel::from_env(),
            environment,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or(
                    "DATABASE_URL",
                    &DatabaseUrl::default().to_connection_string(),
                ))?,
                max_connections: env_var_or(
                    "DATABASE_MAX_CONNECTIONS",
                    &limits::DEFAULT_MAX_CONNECTIONS.to_string(),
                )
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS value")?,
                acquire_timeout_secs: env_var_or(
                    "DATABASE_ACQUIRE_TIMEOUT_SECS",
                    &limits::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid DATABASE_ACQUIRE_TIMEOUT_SECS value")?,
            },
            auth: AuthConfig {
                jwt_secret: load_jwt_secret(environment)?,
                session_expiry_hours: limits::SESSION_EXPIRY_HOURS,
                bcrypt_cost: env_var_or("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string())
                    .parse()
                    .context("Invalid BCRYPT_COST value")?,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
        };

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Human-readable summary for startup logs (never includes secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Office Staff Server Configuration:\n\
             - Bind: {}:{}\n\
             - Environment: {}\n\
             - Log Level: {} (RUST_LOG overrides)\n\
             - Database: {} (pool size {})\n\
             - Session Lifetime: {}h\n\
             - CORS Origins: {}",
            self.host,
            self.http_port,
            self.environment,
            self.log_level,
            self.database.url,
            self.database.max_connections,
            self.auth.session_expiry_hours,
            self.cors.allowed_origins,
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            http_port: ports::DEFAULT_HTTP_PORT,
            log_level: LogLevel::Info,
            environment: Environment::Development,
            database: DatabaseConfig {
                url: DatabaseUrl::default(),
                max_connections: limits::DEFAULT_MAX_CONNECTIONS,
                acquire_timeout_secs: limits::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            },
            auth: AuthConfig {
                jwt_secret: generate_jwt_secret(),
                session_expiry_hours: limits::SESSION_EXPIRY_HOURS,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
            cors: CorsConfig {
                allowed_origins: "*".to_owned(),
            },
        }
    }
}

/// Read `JWT_SECRET`, falling back to an ephemeral secret outside production
fn load_jwt_secret(environment: Environment) -> Result<String> {
    match env::var("JWT_SECRET") {
        Ok(secret) if !secret.trim().is_empty() => Ok(secret),
        _ if environment.is_production() => {
            bail!("JWT_SECRET must be set in production")
        }
        _ => {
            warn!("JWT_SECRET not set; generated an ephemeral secret, sessions will not survive restarts");
            Ok(generate_jwt_secret())
        }
    }
}

/// Generate a random 64 character signing secret
#[must_use]
pub fn generate_jwt_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
