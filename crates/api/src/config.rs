use pgwale_core::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use pgwale_core::rate_limit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW};

use crate::auth::firebase::FirebaseConfig;
use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except `JWT_SECRET` have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins in addition to any localhost origin.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub admin: AdminConfig,
    pub rate_limit: RateLimitConfig,
    pub default_page_size: i64,
    pub max_page_size: i64,
    pub max_images_per_pg: usize,
    /// Public site root used for links in emails.
    pub public_site_url: String,
    /// Platform WhatsApp number inquiries are routed to.
    pub whatsapp_number: String,
    /// Set when Firebase ID tokens should be accepted.
    pub firebase: Option<FirebaseConfig>,
}

/// Configured admin account. Login is disabled unless both are set.
#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub window_secs: u64,
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_WINDOW.as_secs(),
            max_requests: DEFAULT_MAX_REQUESTS,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                   |
    /// |---------------------------|---------------------------|
    /// | `HOST`                    | `0.0.0.0`                 |
    /// | `PORT`                    | `5000`                    |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`   |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                      |
    /// | `ADMIN_EMAIL`             | unset                     |
    /// | `ADMIN_PASSWORD`          | unset                     |
    /// | `RATE_LIMIT_WINDOW_SECS`  | `900`                     |
    /// | `RATE_LIMIT_MAX_REQUESTS` | `100`                     |
    /// | `DEFAULT_PAGE_SIZE`       | `12`                      |
    /// | `MAX_PAGE_SIZE`           | `100`                     |
    /// | `MAX_IMAGES_PER_PG`       | `15`                      |
    /// | `PUBLIC_SITE_URL`         | `http://localhost:5173`   |
    /// | `WHATSAPP_NUMBER`         | `919876543210`            |
    /// | `FIREBASE_PROJECT_ID`     | unset (Firebase disabled) |
    ///
    /// # Panics
    ///
    /// Panics on unparseable numeric values or a missing `JWT_SECRET`.
    pub fn from_env() -> Self {
        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let default_page_size = env_or("DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE);
        let max_page_size = env_or("MAX_PAGE_SIZE", MAX_PAGE_SIZE);
        assert!(
            default_page_size >= 1 && default_page_size <= max_page_size,
            "DEFAULT_PAGE_SIZE must be between 1 and MAX_PAGE_SIZE"
        );

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("PORT", 5000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
            admin: AdminConfig {
                email: env_opt("ADMIN_EMAIL"),
                password: env_opt("ADMIN_PASSWORD"),
            },
            rate_limit: RateLimitConfig {
                window_secs: env_or("RATE_LIMIT_WINDOW_SECS", DEFAULT_WINDOW.as_secs()),
                max_requests: env_or("RATE_LIMIT_MAX_REQUESTS", DEFAULT_MAX_REQUESTS),
            },
            default_page_size,
            max_page_size,
            max_images_per_pg: env_or(
                "MAX_IMAGES_PER_PG",
                pgwale_core::listing::DEFAULT_MAX_IMAGES,
            ),
            public_site_url: std::env::var("PUBLIC_SITE_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
            whatsapp_number: std::env::var("WHATSAPP_NUMBER")
                .unwrap_or_else(|_| "919876543210".into()),
            firebase: FirebaseConfig::from_env(),
        }
    }
}
