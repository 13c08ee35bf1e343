use async_trait::async_trait;
use axum::extract::FromRequestParts;
use http::request::Parts;
use crate::error::{APIError, APIResult};

/// Header the upstream identity provider fills with the authenticated user id.
pub const CALLER_ID_HEADER: &str = "x-user-id";

/// Opaque user id issued by the identity provider.
pub type UserId = String;

/// The user on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
    where
        S: Send + Sync,
{
    type Rejection = APIError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> APIResult<Self> {
        let id = parts.headers
            .get(CALLER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(APIError::Unauthorized)?;

        Ok(Caller(id.to_owned()))
    }
}
