//! Shared query parameter types for API handlers.
//!
//! Numeric query values are parsed leniently: anything that does not parse
//! falls back to the default instead of failing the request.

use std::str::FromStr;

use pgwale_core::listing::STATUS_FILTER_ALL;
use pgwale_core::pagination::Page;
use serde::{Deserialize, Deserializer};

use crate::config::ServerConfig;

/// Deserialize an optional value from its string form, treating blanks and
/// unparseable input as absent.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

/// Like [`lenient`] but for free text: trims and drops blanks.
pub fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// `?page=&limit=&status=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct StatusPageParams {
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "non_blank")]
    pub status: Option<String>,
}

impl StatusPageParams {
    pub fn page(&self, config: &ServerConfig) -> Page {
        resolve_page(self.page, self.limit, config)
    }

    /// The status filter, with `all` meaning no filter.
    pub fn status_filter(&self) -> Option<&str> {
        status_filter(self.status.as_deref())
    }
}

pub fn resolve_page(page: Option<i64>, limit: Option<i64>, config: &ServerConfig) -> Page {
    Page::resolve(page, limit, config.default_page_size, config.max_page_size)
}

pub fn status_filter(status: Option<&str>) -> Option<&str> {
    status.filter(|s| *s != STATUS_FILTER_ALL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> StatusPageParams {
        let uri: axum::http::Uri = format!("/x?{query}").parse().unwrap();
        axum::extract::Query::<StatusPageParams>::try_from_uri(&uri)
            .unwrap()
            .0
    }

    #[test]
    fn garbage_numbers_fall_back() {
        let params = parse("page=abc&limit=-&status=pending");
        assert_eq!(params.page, None);
        assert_eq!(params.limit, None);
        assert_eq!(params.status_filter(), Some("pending"));
    }

    #[test]
    fn all_means_no_status_filter() {
        let params = parse("status=all&page=3");
        assert_eq!(params.page, Some(3));
        assert_eq!(params.status_filter(), None);
    }

    #[test]
    fn blank_status_is_absent() {
        assert_eq!(parse("status=%20").status, None);
    }
}
