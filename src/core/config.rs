use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub mongo: MongoConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub url: String,
    pub database: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            // Only error if it's not "file not found" - that's acceptable
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            mongo: MongoConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl MongoConfig {
    // Conservative pool defaults for small-medium deployments
    const DEFAULT_MAX_POOL_SIZE: u32 = 10;
    const DEFAULT_MIN_POOL_SIZE: u32 = 1;
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_SERVER_SELECTION_TIMEOUT_SECS: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("MONGODB_URL").map_err(|_| "MONGODB_URL must be set".to_string())?;

        let database = env::var("MONGODB_DATABASE").unwrap_or_else(|_| "geoservice".to_string());

        let max_pool_size = env::var("MONGODB_MAX_POOL_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_POOL_SIZE.to_string())
            .parse::<u32>()
            .map_err(|_| "MONGODB_MAX_POOL_SIZE must be a valid number".to_string())?;

        let min_pool_size = env::var("MONGODB_MIN_POOL_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_POOL_SIZE.to_string())
            .parse::<u32>()
            .map_err(|_| "MONGODB_MIN_POOL_SIZE must be a valid number".to_string())?;

        let connect_timeout_secs = env::var("MONGODB_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_CONNECT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "MONGODB_CONNECT_TIMEOUT_SECS must be a valid number".to_string())?;

        let server_selection_timeout_secs = env::var("MONGODB_SERVER_SELECTION_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SERVER_SELECTION_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| {
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS must be a valid number".to_string()
            })?;

        Ok(Self {
            url,
            database,
            max_pool_size,
            min_pool_size,
            connect_timeout_secs,
            server_selection_timeout_secs,
        })
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.server_selection_timeout_secs)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Geo POI API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API for managing Points of Interest".to_string());

        Ok(Self {
            title,
            version,
            description,
        })
    }
}
