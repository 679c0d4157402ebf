//! Request extractors that reject with the standard error envelope.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use pgwale_core::error::CoreError;
use pgwale_core::validation::Sanitize;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// JSON body that is sanitized and then validated before the handler runs.
///
/// Malformed JSON and failed `validator` rules both become 400
/// `VALIDATION_ERROR`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Sanitize,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        value.sanitize();
        value
            .validate()
            .map_err(|errors| AppError::Core(CoreError::Validation(describe(&errors))))?;
        Ok(ValidatedJson(value))
    }
}

/// Query string extractor with envelope rejections.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                AppError::Core(CoreError::Validation(rejection.body_text()))
            })?;
        Ok(ApiQuery(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::Core(CoreError::Validation(rejection.body_text()))
}

/// Flatten field errors into one deterministic message.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(length(max = 3, message = "Name is too long"))]
        name: String,
        #[validate(range(min = 1))]
        count: i32,
    }

    #[test]
    fn describe_uses_messages_and_field_fallback() {
        let sample = Sample {
            name: "abcdef".into(),
            count: 0,
        };
        let errors = sample.validate().unwrap_err();
        assert_eq!(describe(&errors), "Name is too long; count is invalid");
    }
}
