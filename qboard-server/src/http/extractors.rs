//! Custom Axum extractors

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Header carrying the admin secret for moderation endpoints.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Extract the optional `X-Admin-Token` header.
///
/// Extraction never fails; validation against the configured secret
/// happens in the handler via [`AdminGuard`](super::admin::AdminGuard),
/// which needs state this extractor does not have.
pub struct AdminToken(pub Option<String>);

impl<S> FromRequestParts<S> for AdminToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Ok(Self(token))
    }
}
