//! Firebase ID token verification.
//!
//! Tokens are RS256 JWTs signed by Google. Signing keys are fetched from the
//! public JWKS endpoint and cached for [`FirebaseConfig::jwks_ttl`]; a token
//! naming an unknown `kid` triggers a refresh before it is rejected, at most
//! once per [`MIN_REFRESH_INTERVAL`].

use std::time::{Duration, Instant};

use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};

const JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

const DEFAULT_JWKS_TTL_SECS: u64 = 3600;

/// HTTP timeout for JWKS fetches.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimum time between two JWKS fetches, successful or not.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub jwks_ttl: Duration,
}

impl FirebaseConfig {
    /// Returns `None` when `FIREBASE_PROJECT_ID` is unset, which disables
    /// Firebase token acceptance.
    ///
    /// | Env Var                  | Default |
    /// |--------------------------|---------|
    /// | `FIREBASE_PROJECT_ID`    | unset   |
    /// | `FIREBASE_JWKS_TTL_SECS` | `3600`  |
    pub fn from_env() -> Option<Self> {
        let project_id = std::env::var("FIREBASE_PROJECT_ID")
            .ok()
            .filter(|v| !v.trim().is_empty())?;
        let ttl_secs: u64 = std::env::var("FIREBASE_JWKS_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_JWKS_TTL_SECS.to_string())
            .parse()
            .expect("FIREBASE_JWKS_TTL_SECS must be a valid u64");
        Some(Self {
            project_id,
            jwks_ttl: Duration::from_secs(ttl_secs),
        })
    }

    pub fn issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FirebaseError {
    #[error("Failed to fetch signing keys: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Invalid token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Expected an RS256 token, got {0:?}")]
    UnsupportedAlgorithm(Algorithm),

    #[error("Token header has no key id")]
    MissingKeyId,

    #[error("No signing key with id {0}")]
    UnknownKey(String),
}

/// Verified claims of a Firebase ID token.
#[derive(Debug, Clone, Deserialize)]
pub struct FirebaseClaims {
    /// Firebase user id.
    pub sub: String,
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    /// Custom `role` claim, when the project sets one.
    pub role: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

pub struct FirebaseVerifier {
    config: FirebaseConfig,
    client: reqwest::Client,
    cache: RwLock<Option<CachedKeys>>,
    last_refresh: Mutex<Option<Instant>>,
}

impl FirebaseVerifier {
    pub fn new(config: FirebaseConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            config,
            client,
            cache: RwLock::new(None),
            last_refresh: Mutex::new(None),
        }
    }

    /// Verifier with a pre-loaded key set, as if it had just been fetched.
    #[cfg(test)]
    fn with_keys(config: FirebaseConfig, keys: JwkSet) -> Self {
        let mut verifier = Self::new(config);
        let now = Instant::now();
        verifier.cache = RwLock::new(Some(CachedKeys {
            keys,
            fetched_at: now,
        }));
        verifier.last_refresh = Mutex::new(Some(now));
        verifier
    }

    /// Validation rules for tokens of this project.
    pub fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.config.project_id.as_str()]);
        validation.set_issuer(&[self.config.issuer()]);
        validation
    }

    /// Verify signature, audience, issuer and expiry of `token`.
    pub async fn verify(&self, token: &str) -> Result<FirebaseClaims, FirebaseError> {
        let header = decode_header(token)?;
        if header.alg != Algorithm::RS256 {
            return Err(FirebaseError::UnsupportedAlgorithm(header.alg));
        }
        let kid = header.kid.ok_or(FirebaseError::MissingKeyId)?;

        let key = match self.cached_key(&kid).await? {
            Some(key) => key,
            None => {
                if !self.claim_refresh_slot().await {
                    return Err(FirebaseError::UnknownKey(kid));
                }
                self.refresh().await?;
                self.cached_key(&kid)
                    .await?
                    .ok_or_else(|| FirebaseError::UnknownKey(kid.clone()))?
            }
        };

        let data = decode::<FirebaseClaims>(token, &key, &self.validation())?;
        Ok(data.claims)
    }

    /// Decoding key for `kid` from a fresh cache, or `None` when the cache is
    /// stale, empty, or lacks the key.
    async fn cached_key(&self, kid: &str) -> Result<Option<DecodingKey>, FirebaseError> {
        let cache = self.cache.read().await;
        let Some(cached) = cache.as_ref() else {
            return Ok(None);
        };
        if cached.fetched_at.elapsed() > self.config.jwks_ttl {
            return Ok(None);
        }
        match cached.keys.find(kid) {
            Some(jwk) => Ok(Some(DecodingKey::from_jwk(jwk)?)),
            None => Ok(None),
        }
    }

    /// Reserve the next JWKS fetch. `false` while the previous one is more
    /// recent than [`MIN_REFRESH_INTERVAL`].
    async fn claim_refresh_slot(&self) -> bool {
        let mut last = self.last_refresh.lock().await;
        if last.is_some_and(|at| at.elapsed() < MIN_REFRESH_INTERVAL) {
            return false;
        }
        *last = Some(Instant::now());
        true
    }

    async fn refresh(&self) -> Result<(), FirebaseError> {
        let keys: JwkSet = self
            .client
            .get(JWKS_URL)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        tracing::debug!(key_count = keys.keys.len(), "Refreshed Firebase signing keys");
        *self.cache.write().await = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });
        Ok(())
    }
}
