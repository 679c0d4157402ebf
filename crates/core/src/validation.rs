//! Field-level validation and input sanitization helpers.
//!
//! Handlers call [`require_fields`] before touching the database and run
//! every request DTO through [`Sanitize`] so stored text never carries
//! script fragments.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Indian-style phone numbers: optional `+`, no leading zero, 10-15 digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+]?[1-9][0-9]{9,14}$").expect("valid regex"));

static SCRIPT_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^<]*(?:<[^<]*)*?</script>").expect("valid regex")
});

static JS_SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("valid regex"));

static INLINE_HANDLER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)on\w+="[^"]*""#).expect("valid regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Phone numbers are checked after stripping whitespace and dashes.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    PHONE_RE.is_match(&compact)
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Invalid email address '{email}'")))
    }
}

pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Invalid phone number '{phone}'")))
    }
}

/// Names of fields that are absent or blank.
pub fn missing_fields<'a>(fields: &[(&'a str, Option<&str>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect()
}

/// Fail with a single message listing every missing field.
pub fn require_fields(fields: &[(&str, Option<&str>)]) -> Result<(), CoreError> {
    let missing = missing_fields(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Strip script tags, `javascript:` URLs and inline event handlers, then trim.
pub fn sanitize_text(input: &str) -> String {
    let without_scripts = SCRIPT_TAG_RE.replace_all(input, "");
    let without_scheme = JS_SCHEME_RE.replace_all(&without_scripts, "");
    let without_handlers = INLINE_HANDLER_RE.replace_all(&without_scheme, "");
    without_handlers.trim().to_string()
}

/// In-place sanitization of request payloads.
pub trait Sanitize {
    fn sanitize(&mut self);
}

impl Sanitize for String {
    fn sanitize(&mut self) {
        *self = sanitize_text(self);
    }
}

impl<T: Sanitize> Sanitize for Option<T> {
    fn sanitize(&mut self) {
        if let Some(inner) = self {
            inner.sanitize();
        }
    }
}

impl<T: Sanitize> Sanitize for Vec<T> {
    fn sanitize(&mut self) {
        for item in self.iter_mut() {
            item.sanitize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format() {
        assert!(is_valid_email("owner@example.com"));
        assert!(!is_valid_email("owner@example"));
        assert!(!is_valid_email("owner example@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_accepts_spacing_and_country_code() {
        assert!(is_valid_phone("+91 98765 43210"));
        assert!(is_valid_phone("98765-43210"));
        assert!(!is_valid_phone("0987654321"));
        assert!(!is_valid_phone("12345"));
    }

    #[test]
    fn missing_fields_reports_blank_and_absent() {
        let missing = missing_fields(&[
            ("title", Some("Green Valley")),
            ("area", Some("   ")),
            ("email", None),
        ]);
        assert_eq!(missing, vec!["area", "email"]);
    }

    #[test]
    fn require_fields_lists_all_missing() {
        let err = require_fields(&[("name", None), ("phone", Some(""))]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required fields: name, phone"
        );
    }

    #[test]
    fn sanitize_strips_scripts_and_handlers() {
        let dirty = r#"  Nice room<script>alert("x")</script> <a onclick="steal()">here</a> javascript:void(0) "#;
        let clean = sanitize_text(dirty);
        assert!(!clean.contains("<script"));
        assert!(!clean.contains("onclick"));
        assert!(!clean.to_lowercase().contains("javascript:"));
        assert!(clean.starts_with("Nice room"));
    }

    #[test]
    fn sanitize_trait_walks_options_and_vecs() {
        let mut tags = vec![" WiFi ".to_string(), "AC<script>x</script>".to_string()];
        tags.sanitize();
        assert_eq!(tags, vec!["WiFi".to_string(), "AC".to_string()]);

        let mut maybe: Option<String> = Some("  hi ".into());
        maybe.sanitize();
        assert_eq!(maybe.as_deref(), Some("hi"));
    }
}
