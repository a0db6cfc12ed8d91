pub mod ingredient;
pub mod pagination;
pub mod recipe;
pub mod relation;
pub mod response;
pub mod short_link;
pub mod subscription;
pub mod tag;
pub mod user;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::de::DeserializeOwned;

use crate::error::FoodgramError;

/// Unwrap a JSON body, reporting malformed input as a validation error.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, FoodgramError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| FoodgramError::invalid("body", rejection.body_text()))
}

/// Parse a raw query string with `serde_qs`; absent query yields the default.
pub(crate) fn parse_query<T>(raw_query: Option<String>) -> Result<T, FoodgramError>
where
    T: DeserializeOwned + Default,
{
    raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| FoodgramError::InvalidQuery)
        .map(Option::unwrap_or_default)
}

/// Parse a numeric path id. Anything that is not an `i32` names no row,
/// so it maps to the resource's not-found error.
pub(crate) fn path_id(raw: &str, not_found: FoodgramError) -> Result<i32, FoodgramError> {
    raw.parse().map_err(|_| not_found)
}

/// Required field of a request body.
pub(crate) fn required<T>(field: &'static str, value: Option<T>) -> Result<T, FoodgramError> {
    value.ok_or_else(|| FoodgramError::invalid(field, "this field is required"))
}
