use std::sync::Arc;

use pgwale_events::EventBus;

use crate::auth::firebase::FirebaseVerifier;
use crate::auth::password::hash_password;
use crate::config::ServerConfig;
use crate::middleware::rate_limit::RateLimiter;

/// The configured admin account with its password already hashed.
#[derive(Debug)]
pub struct AdminAccount {
    pub email: String,
    pub password_hash: String,
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything shared sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: pgwale_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Publishes events for the email notifier.
    pub event_bus: Arc<EventBus>,
    pub rate_limiter: Arc<RateLimiter>,
    /// Present when Firebase ID tokens are accepted.
    pub firebase: Option<Arc<FirebaseVerifier>>,
    /// `None` disables admin login.
    pub admin: Option<Arc<AdminAccount>>,
}

impl AppState {
    /// Build state from config, hashing the admin password once up front.
    pub fn new(
        pool: pgwale_db::DbPool,
        config: ServerConfig,
        event_bus: Arc<EventBus>,
    ) -> Result<Self, argon2::password_hash::Error> {
        let admin = match (&config.admin.email, &config.admin.password) {
            (Some(email), Some(password)) => Some(Arc::new(AdminAccount {
                email: email.clone(),
                password_hash: hash_password(password)?,
            })),
            _ => None,
        };
        let firebase = config
            .firebase
            .clone()
            .map(|fb| Arc::new(FirebaseVerifier::new(fb)));
        let rate_limiter = Arc::new(RateLimiter::new(&config.rate_limit));

        Ok(Self {
            pool,
            config: Arc::new(config),
            event_bus,
            rate_limiter,
            firebase,
            admin,
        })
    }
}
