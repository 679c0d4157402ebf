//! Per-IP fixed-window rate limiting.
//!
//! Counts live in process memory behind a mutex; they reset on restart and
//! are not shared between instances.

use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{SecondsFormat, Utc};
use pgwale_core::rate_limit::{FixedWindowLimiter, RateDecision};

use crate::config::RateLimitConfig;
use crate::response::error_response;
use crate::state::AppState;

pub const HEADER_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const HEADER_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const HEADER_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

#[derive(Debug)]
pub struct RateLimiter {
    inner: Mutex<FixedWindowLimiter<String>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            inner: Mutex::new(FixedWindowLimiter::new(
                Duration::from_secs(config.window_secs),
                config.max_requests,
            )),
        }
    }

    pub fn check(&self, client: &str) -> RateDecision {
        let mut limiter = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        limiter.check(&client.to_string(), Instant::now())
    }
}

/// First `X-Forwarded-For` entry, else the socket peer, else `"unknown"`.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(String::from)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

fn apply_headers(headers: &mut HeaderMap, decision: &RateDecision) {
    let reset_at = Utc::now()
        + chrono::Duration::from_std(decision.reset_after).unwrap_or_else(|_| chrono::Duration::zero());
    headers.insert(HEADER_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(HEADER_REMAINING, HeaderValue::from(decision.remaining));
    if let Ok(value) =
        HeaderValue::from_str(&reset_at.to_rfc3339_opts(SecondsFormat::Secs, true))
    {
        headers.insert(HEADER_RESET, value);
    }
}

/// Middleware counting every request against the caller's window.
pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_ip(request.headers(), peer);
    let decision = state.rate_limiter.check(&client);

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        tracing::warn!(client = %client, limit = decision.limit, "Rate limit exceeded");
        let mut response = error_response(
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMIT_EXCEEDED",
            "Too many requests from this IP, please try again later.",
        );
        response
            .headers_mut()
            .insert("retry-after", HeaderValue::from(decision.reset_after.as_secs()));
        response
    };
    apply_headers(response.headers_mut(), &decision);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        let peer: SocketAddr = "127.0.0.1:5000".parse().unwrap();
        assert_eq!(client_ip(&headers, Some(peer)), "203.0.113.7");
    }

    #[test]
    fn falls_back_to_peer_then_unknown() {
        let headers = HeaderMap::new();
        let peer: SocketAddr = "192.168.1.20:40000".parse().unwrap();
        assert_eq!(client_ip(&headers, Some(peer)), "192.168.1.20");
        assert_eq!(client_ip(&headers, None), "unknown");
    }

    #[test]
    fn limiter_rejects_after_threshold() {
        let limiter = RateLimiter::new(&RateLimitConfig {
            window_secs: 60,
            max_requests: 2,
        });
        assert!(limiter.check("a").allowed);
        assert!(limiter.check("a").allowed);
        let third = limiter.check("a");
        assert!(!third.allowed);
        assert_eq!(third.remaining, 0);
        assert!(limiter.check("b").allowed, "other clients are unaffected");
    }

    #[test]
    fn headers_are_rendered() {
        let mut headers = HeaderMap::new();
        apply_headers(
            &mut headers,
            &RateDecision {
                allowed: true,
                limit: 100,
                remaining: 99,
                reset_after: Duration::from_secs(900),
            },
        );
        assert_eq!(headers[HEADER_LIMIT], "100");
        assert_eq!(headers[HEADER_REMAINING], "99");
        assert!(headers[HEADER_RESET].to_str().unwrap().ends_with('Z'));
    }
}
