//! Application configuration loading from environment variables.
//!
//! All configuration is loaded from the environment at startup via `std::env::var`,
//! optionally primed from a `.env` file by `dotenvy` in `main`.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `JWT_SECRET`: Secret key for signing bearer credentials
//! - `DATABASE_URL`: PostgreSQL connection string (only when `STORE_BACKEND=postgres`)
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,recipe_api=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `STORE_BACKEND`: `postgres` or `memory` (default: postgres)
//! - `DATABASE_MAX_CONNECTIONS`: DB pool size (default: 20)
//! - `JWT_TTL_HOURS`: Bearer credential lifetime (default: 168)
//! - `BCRYPT_COST`: Password hashing cost (default: `bcrypt::DEFAULT_COST`)
//! - `UPLOAD_DIR`: Directory for uploaded recipe images (default: "./uploads")
//! - `MAX_IMAGES_PER_RECIPE`: Images accepted per upload (default: 5)
//! - `MAX_BODY_BYTES`: Request body limit (default: 20 MiB)
//! - `ALLOWED_ORIGINS`: Comma separated CORS origins; empty allows any origin
//! - `SEED_SAMPLE_RECIPES`: Insert the sample recipes into an empty store (default: false)
//! - `IGNORE_MISSING_MIGRATIONS`: Skip missing migrations (default: true)

use std::{fmt, str::FromStr};

/// Which store implementation backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process-local documents, lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Complete server configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Store implementation for recipes, users and likes
    pub store_backend: StoreBackend,

    /// PostgreSQL connection string; required for the postgres backend
    pub database_url: Option<String>,

    /// Maximum number of concurrent database connections
    pub database_max_connections: u32,

    /// Secret key for JWT signing and verification
    pub jwt_secret: String,

    /// Lifetime of issued bearer credentials, in hours
    pub jwt_ttl_hours: i64,

    /// Bcrypt work factor for password hashes (4..=31)
    pub bcrypt_cost: u32,

    /// Directory uploaded images are written to and served from
    pub upload_dir: String,

    /// Maximum image parts accepted on recipe creation
    pub max_images_per_recipe: usize,

    /// Maximum request body size in bytes
    pub max_body_bytes: usize,

    /// CORS allow-list; empty means any origin
    pub allowed_origins: Vec<String>,

    /// Seed the sample recipes when the recipe store is empty
    pub seed_sample_recipes: bool,

    /// Skip missing migrations during startup
    pub ignore_missing_migrations: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required environment variable is missing or
    /// cannot be parsed to the expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        let store_backend: StoreBackend = env_or("STORE_BACKEND", StoreBackend::Postgres)?;
        let database_url = std::env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("Missing required environment variable: DATABASE_URL");
        }

        Ok(Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            store_backend,
            database_url,
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 20)?,
            jwt_secret: env_required("JWT_SECRET")?,
            jwt_ttl_hours: env_or("JWT_TTL_HOURS", 168)?,
            bcrypt_cost: env_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            upload_dir: env_or("UPLOAD_DIR", "./uploads".to_string())?,
            max_images_per_recipe: env_or("MAX_IMAGES_PER_RECIPE", 5)?,
            max_body_bytes: env_or("MAX_BODY_BYTES", 20 * 1024 * 1024)?,
            allowed_origins: parse_list(&std::env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            seed_sample_recipes: env_or("SEED_SAMPLE_RECIPES", false)?,
            ignore_missing_migrations: env_or("IGNORE_MISSING_MIGRATIONS", true)?,
        })
    }
}

/// Load a required environment variable.
///
/// # Errors
///
/// Returns an error if the variable is not set.
fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
