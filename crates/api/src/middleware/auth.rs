//! Bearer-token authentication extractors for Axum handlers.
//!
//! Two token kinds are accepted: HS256 tokens issued by our own login
//! endpoints, and RS256 Firebase ID tokens when Firebase is configured.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode_header, Algorithm};
use pgwale_core::error::CoreError;
use pgwale_core::landlord::ensure_can_login;
use pgwale_core::roles::{ROLE_ADMIN, ROLE_LANDLORD};
use pgwale_core::types::DbId;
use pgwale_db::repositories::LandlordRepo;

use crate::auth::firebase::FirebaseClaims;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<ApiResponse<()>> {
///     tracing::info!(subject = %user.subject, role = %user.role, "handling request");
///     Ok(ApiResponse::message("ok"))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Token subject: landlord id, `"admin"`, or a Firebase uid.
    pub subject: String,
    pub role: String,
    pub email: Option<String>,
    /// Set for landlords whose account could be resolved.
    pub landlord_id: Option<DbId>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

fn no_token() -> AppError {
    AppError::Core(CoreError::unauthorized(
        "NO_TOKEN",
        "Access denied. No token provided.",
    ))
}

fn invalid_token() -> AppError {
    AppError::Core(CoreError::unauthorized("INVALID_TOKEN", "Invalid token."))
}

/// Token from `Authorization: Bearer <token>`, `None` when the header is absent.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| invalid_token())?.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let token = value.strip_prefix("Bearer ").ok_or_else(invalid_token)?.trim();
    if token.is_empty() {
        return Ok(None);
    }
    Ok(Some(token))
}

/// Resolve a raw token into the caller it identifies.
pub async fn authenticate(state: &AppState, token: &str) -> Result<AuthUser, AppError> {
    let header = decode_header(token).map_err(|_| invalid_token())?;

    if header.alg == Algorithm::RS256 {
        let Some(verifier) = &state.firebase else {
            return Err(invalid_token());
        };
        let claims = verifier.verify(token).await.map_err(|e| {
            tracing::debug!(error = %e, "Firebase token rejected");
            invalid_token()
        })?;
        return from_firebase(state, claims).await;
    }

    let claims = validate_token(token, &state.config.jwt).map_err(|_| invalid_token())?;
    let landlord_id = if claims.role == ROLE_LANDLORD {
        let id: DbId = claims.sub.parse().map_err(|_| invalid_token())?;
        ensure_landlord_active(state, id).await?;
        Some(id)
    } else {
        None
    };
    Ok(AuthUser {
        subject: claims.sub,
        role: claims.role,
        email: Some(claims.email),
        landlord_id,
    })
}

/// A landlord token stays usable only while its account exists and has not
/// been suspended or rejected since it was issued.
async fn ensure_landlord_active(state: &AppState, id: DbId) -> Result<(), AppError> {
    let landlord = LandlordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(invalid_token)?;
    ensure_can_login(&landlord.status)?;
    Ok(())
}

/// Role is the custom claim when it names a known role, else `admin` for the
/// configured admin email once Firebase has verified it, else `landlord`.
pub fn firebase_role(claims: &FirebaseClaims, admin_email: Option<&str>) -> &'static str {
    match claims.role.as_deref() {
        Some(ROLE_ADMIN) => return ROLE_ADMIN,
        Some(ROLE_LANDLORD) => return ROLE_LANDLORD,
        _ => {}
    }
    match (verified_email(claims), admin_email) {
        (Some(email), Some(admin)) if email.eq_ignore_ascii_case(admin) => ROLE_ADMIN,
        _ => ROLE_LANDLORD,
    }
}

/// The token's email, only when Firebase reports it as verified.
fn verified_email(claims: &FirebaseClaims) -> Option<&str> {
    claims.email.as_deref().filter(|_| claims.email_verified)
}

async fn from_firebase(state: &AppState, claims: FirebaseClaims) -> Result<AuthUser, AppError> {
    let role = firebase_role(&claims, state.config.admin.email.as_deref());
    let landlord_id = match (role, verified_email(&claims)) {
        (ROLE_LANDLORD, Some(email)) => {
            match LandlordRepo::find_by_email(&state.pool, email).await? {
                Some(landlord) => {
                    ensure_can_login(&landlord.status)?;
                    Some(landlord.id)
                }
                None => None,
            }
        }
        _ => None,
    };
    Ok(AuthUser {
        subject: claims.sub,
        role: role.to_string(),
        email: claims.email,
        landlord_id,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or_else(no_token)?;
        authenticate(state, token).await
    }
}

/// Attaches the caller when a valid token is present; never rejects.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match bearer_token(parts) {
            Ok(Some(token)) => token,
            _ => return Ok(OptionalAuth(None)),
        };
        match authenticate(state, token).await {
            Ok(user) => Ok(OptionalAuth(Some(user))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid optional token");
                Ok(OptionalAuth(None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(email: Option<&str>, role: Option<&str>) -> FirebaseClaims {
        FirebaseClaims {
            sub: "uid-1".into(),
            email: email.map(String::from),
            email_verified: true,
            role: role.map(String::from),
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn custom_role_claim_wins() {
        let c = claims(Some("someone@example.com"), Some("admin"));
        assert_eq!(firebase_role(&c, None), ROLE_ADMIN);
    }

    #[test]
    fn admin_email_match_is_case_insensitive() {
        let c = claims(Some("Admin@PGWale.com"), None);
        assert_eq!(firebase_role(&c, Some("admin@pgwale.com")), ROLE_ADMIN);
    }

    #[test]
    fn unknown_role_claim_falls_back_to_landlord() {
        let c = claims(Some("owner@example.com"), Some("superuser"));
        assert_eq!(firebase_role(&c, Some("admin@pgwale.com")), ROLE_LANDLORD);
    }

    #[test]
    fn unverified_admin_email_is_a_landlord() {
        let c = FirebaseClaims {
            email_verified: false,
            ..claims(Some("admin@pgwale.com"), None)
        };
        assert_eq!(firebase_role(&c, Some("admin@pgwale.com")), ROLE_LANDLORD);
        assert_eq!(verified_email(&c), None);
    }

    #[test]
    fn verified_email_is_exposed_for_landlord_linking() {
        let c = claims(Some("owner@example.com"), None);
        assert_eq!(verified_email(&c), Some("owner@example.com"));
    }
}
