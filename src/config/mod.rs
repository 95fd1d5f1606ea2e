use std::env;
use thiserror::Error;

const DEV_JWT_SECRET: &str = "golf-api-development-secret";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub queue: QueueConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueBackend {
    Log,
    Sqs,
}

#[derive(Debug, Clone)]
pub struct QueueConfig {
    pub backend: QueueBackend,
    pub queue_url: Option<String>,
    pub capacity: usize,
    pub max_attempts: u32,
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is required when DATABASE_BACKEND=postgres")]
    MissingDatabaseUrl,

    #[error("HANDICAP_QUEUE_URL is required when QUEUE_BACKEND=sqs")]
    MissingQueueUrl,

    #[error("JWT_SECRET must be set outside development")]
    InsecureJwtSecret,

    #[error("QUEUE_BACKEND=sqs requires building with --features sqs")]
    SqsFeatureDisabled,

    #[error("QUEUE_CAPACITY must be greater than zero")]
    ZeroQueueCapacity,
}

impl QueueBackend {
    /// Deployed presets publish to SQS only when the transport is compiled in
    pub fn deployed_default() -> Self {
        if cfg!(feature = "sqs") {
            QueueBackend::Sqs
        } else {
            QueueBackend::Log
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    /// Reject combinations the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.backend == DatabaseBackend::Postgres && self.database.url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if self.queue.backend == QueueBackend::Sqs && self.queue.queue_url.is_none() {
            return Err(ConfigError::MissingQueueUrl);
        }
        if self.queue.backend == QueueBackend::Sqs && !cfg!(feature = "sqs") {
            return Err(ConfigError::SqsFeatureDisabled);
        }
        if self.environment != Environment::Development
            && (self.security.jwt_secret.is_empty() || self.security.jwt_secret == DEV_JWT_SECRET)
        {
            return Err(ConfigError::InsecureJwtSecret);
        }
        if self.queue.capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        Ok(())
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("REQUEST_TIMEOUT_SECS") {
            self.server.request_timeout_secs = v.parse().unwrap_or(self.server.request_timeout_secs);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_BACKEND") {
            self.database.backend = match v.to_lowercase().as_str() {
                "memory" => DatabaseBackend::Memory,
                "postgres" | "postgresql" => DatabaseBackend::Postgres,
                _ => self.database.backend,
            };
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations = v.parse().unwrap_or(self.database.run_migrations);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Queue overrides
        if let Ok(v) = env::var("QUEUE_BACKEND") {
            self.queue.backend = match v.to_lowercase().as_str() {
                "sqs" => QueueBackend::Sqs,
                "log" => QueueBackend::Log,
                _ => self.queue.backend,
            };
        }
        if let Ok(v) = env::var("HANDICAP_QUEUE_URL") {
            self.queue.queue_url = Some(v);
        }
        if let Ok(v) = env::var("QUEUE_CAPACITY") {
            self.queue.capacity = v.parse().unwrap_or(self.queue.capacity);
        }
        if let Ok(v) = env::var("QUEUE_MAX_ATTEMPTS") {
            self.queue.max_attempts = v.parse().unwrap_or(self.queue.max_attempts);
        }
        if let Ok(v) = env::var("QUEUE_RETRY_BACKOFF_MS") {
            self.queue.retry_backoff_ms = v.parse().unwrap_or(self.queue.retry_backoff_ms);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 8080,
                request_timeout_secs: 30,
            },
            database: DatabaseConfig {
                backend: DatabaseBackend::Postgres,
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                run_migrations: true,
            },
            security: SecurityConfig {
                jwt_secret: DEV_JWT_SECRET.to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
            queue: QueueConfig {
                backend: QueueBackend::Log,
                queue_url: None,
                capacity: 256,
                max_attempts: 3,
                retry_backoff_ms: 50,
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 8080,
                request_timeout_secs: 15,
            },
            database: DatabaseConfig {
                backend: DatabaseBackend::Postgres,
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                run_migrations: true,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                cors_origins: vec!["https://staging.footwedge.app".to_string()],
            },
            queue: QueueConfig {
                backend: QueueBackend::deployed_default(),
                queue_url: None,
                capacity: 1024,
                max_attempts: 5,
                retry_backoff_ms: 200,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 8080,
                request_timeout_secs: 10,
            },
            database: DatabaseConfig {
                backend: DatabaseBackend::Postgres,
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                run_migrations: false,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                cors_origins: vec!["https://footwedge.app".to_string()],
            },
            queue: QueueConfig {
                backend: QueueBackend::deployed_default(),
                queue_url: None,
                capacity: 4096,
                max_attempts: 5,
                retry_backoff_ms: 500,
            },
        }
    }
}
