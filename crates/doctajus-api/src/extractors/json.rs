//! JSON body extractor that runs `validator` rules after deserializing.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use doctajus_core::error::AppError;

use crate::error::ApiError;

/// Deserialized and validated JSON body.
///
/// Malformed JSON and failed rules are both reported as 400 with the
/// standard error body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        data.validate()
            .map_err(|errors| AppError::validation(validation_message(&errors)))?;
        Ok(Self(data))
    }
}

/// One line per failed rule, sorted by field name.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: failed '{}'", e.code),
            })
        })
        .collect();
    lines.sort();
    lines.join("; ")
}
