//! Gateway-injected identity header extractor.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::StatusCode;
use http::request::Parts;

use crate::USER_ID_HEADER;

/// User identity injected by the gateway via `x-foodgram-user-id`.
///
/// As a plain extractor it returns 401 when the header is absent or not an
/// integer. As `Option<IdentityHeaders>` an absent header means an anonymous
/// caller, while a malformed one is still rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityHeaders {
    pub user_id: i32,
}

/// `Ok(None)` when the header is absent, `Err` when it cannot be parsed.
fn read_user_id(parts: &Parts) -> Result<Option<i32>, StatusCode> {
    match parts.headers.get(USER_ID_HEADER) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<i32>().ok())
            .filter(|id| *id > 0)
            .map(Some)
            .ok_or(StatusCode::UNAUTHORIZED),
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Values are read synchronously so the returned future stays 'static.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = read_user_id(parts);
        async move {
            let user_id = user_id?.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id })
        }
    }
}

impl<S> OptionalFromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let user_id = read_user_id(parts);
        async move { Ok(user_id?.map(|user_id| Self { user_id })) }
    }
}
