use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use crate::error::AppError;
use tracing::Span;

/// The opaque, already-authenticated user identity supplied by the
/// upstream access layer in the `X-User-Id` header. The core never
/// authenticates; it trusts this identity for all user-scoped
/// operations.
pub struct AuthUser(pub String);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts.headers.get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(AppError::Unauthorized)?
            .to_string();

        Span::current().record("user_id", user_id.as_str());

        Ok(AuthUser(user_id))
    }
}
