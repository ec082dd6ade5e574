/// Configuration for the API server
///
/// Loaded once at startup from environment variables (a `.env` file is read
/// first when present).
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `JWT_SECRET`: HS256 signing key, at least 32 characters (required)
/// - `JWT_EXPIRY_SECONDS`: Login token lifetime (default: 3600)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 5001)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any
///   (default: http://localhost:3000)
/// - `UPLOAD_DIR`: Where uploaded files are stored (default: uploads)
/// - `PRODUCTION`: `true` enables HSTS (default: false)
///
/// # Example
///
/// ```no_run
/// use campushub_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use campushub_shared::auth::jwt::DEFAULT_EXPIRATION_SECONDS;
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub uploads: UploadConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `*` means any
    pub cors_origins: Vec<String>,

    /// Enables production-only response headers
    pub production: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing key. Must be kept secret and be at least 32 bytes.
    pub secret: String,

    /// Lifetime of issued login tokens
    pub expiry_seconds: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a numeric variable
    /// does not parse, or `JWT_SECRET` is too short.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "5001".to_string())
            .parse::<u16>()?;

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        );

        let production = env::var("PRODUCTION")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let expiry_seconds = match env::var("JWT_EXPIRY_SECONDS") {
            Ok(v) => v.parse::<i64>()?,
            Err(_) => DEFAULT_EXPIRATION_SECONDS,
        };

        if expiry_seconds <= 0 {
            anyhow::bail!("JWT_EXPIRY_SECONDS must be positive");
        }

        let dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
            },
            database: DatabaseConfig {
                url,
                max_connections,
            },
            jwt: JwtConfig {
                secret,
                expiry_seconds,
            },
            uploads: UploadConfig { dir: dir.into() },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
