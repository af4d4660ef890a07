//! User service configuration.

use std::env;
use std::str::FromStr;

use common::{
    CacheConfig, CorsConfig, DatabaseConfig, GrpcClientConfig, JwtConfig, ServerConfig,
    StreamConfig,
};

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    /// Public profile API
    pub http: ServerConfig,
    pub cors: CorsConfig,
    /// Auth-domain gRPC endpoints
    pub grpc: ServerConfig,
    pub file_service: GrpcClientConfig,
    pub jwt: JwtConfig,
    pub streams: StreamConfig,
    /// Base URL of the auth frontend that receives confirmation links
    pub auth_url: String,
    /// Path (with query prefix) appended to `auth_url` in confirmation links
    pub verification_path: String,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let streams = defaults.streams;
        let file_service = defaults.file_service;
        let cors = defaults.cors;

        Self {
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(defaults.database.min_connections),
            },
            cache: CacheConfig {
                url: env::var("USER_SERVICE_REDIS_URL")
                    .or_else(|_| env::var("REDIS_URL"))
                    .unwrap_or(defaults.cache.url),
            },
            http: ServerConfig {
                host: env::var("USER_SERVICE_HOST").unwrap_or(defaults.http.host),
                port: parse_env("USER_SERVICE_HTTP_PORT").unwrap_or(defaults.http.port),
            },
            cors: CorsConfig {
                allow_origins: list_env("CORS_ALLOW_ORIGINS").unwrap_or(cors.allow_origins),
                allow_methods: list_env("CORS_ALLOW_METHODS").unwrap_or(cors.allow_methods),
                allow_headers: list_env("CORS_ALLOW_HEADERS").unwrap_or(cors.allow_headers),
                expose_headers: list_env("CORS_EXPOSE_HEADERS").unwrap_or(cors.expose_headers),
                allow_credentials: parse_env("CORS_ALLOW_CREDENTIALS")
                    .unwrap_or(cors.allow_credentials),
                max_age_secs: parse_env("CORS_MAX_AGE").unwrap_or(cors.max_age_secs),
            },
            grpc: ServerConfig {
                host: env::var("USER_SERVICE_GRPC_HOST").unwrap_or(defaults.grpc.host),
                port: parse_env("USER_SERVICE_GRPC_PORT").unwrap_or(defaults.grpc.port),
            },
            file_service: GrpcClientConfig {
                endpoint: env::var("FILE_SERVICE_URL").unwrap_or(file_service.endpoint),
                connect_timeout_ms: parse_env("FILE_SERVICE_CONNECT_TIMEOUT_MS")
                    .unwrap_or(file_service.connect_timeout_ms),
                request_timeout_ms: parse_env("FILE_SERVICE_TIMEOUT_MS")
                    .unwrap_or(file_service.request_timeout_ms),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt.secret),
            },
            streams: StreamConfig {
                notification_stream: env::var("NOTIFICATION_STREAM")
                    .unwrap_or(streams.notification_stream),
                mail_subject: env::var("MAIL_SUBJECT").unwrap_or(streams.mail_subject),
                event_stream: env::var("EVENT_STREAM").unwrap_or(streams.event_stream),
                event_source: env::var("EVENT_SOURCE").unwrap_or(streams.event_source),
            },
            auth_url: env::var("AUTH_URL").unwrap_or(defaults.auth_url),
            verification_path: env::var("CHANGE_EMAIL_VERIFICATION_PATH")
                .unwrap_or(defaults.verification_path),
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            http: ServerConfig::new("0.0.0.0", 8080),
            cors: CorsConfig::default(),
            grpc: ServerConfig::new("0.0.0.0", 50052),
            file_service: GrpcClientConfig::default(),
            jwt: JwtConfig {
                secret: "change-me-in-production".to_string(),
            },
            streams: StreamConfig::default(),
            auth_url: "http://localhost:3000".to_string(),
            verification_path: "verify-change-email?".to_string(),
        }
    }
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn list_env(key: &str) -> Option<Vec<String>> {
    env::var(key).ok().map(|v| CorsConfig::parse_list(&v))
}
