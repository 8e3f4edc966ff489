use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::AppError;

/// HTTP header carrying the authenticated user's identifier
///
/// Session handling lives in a separate service; by the time a request reaches
/// this API the session layer has already validated the caller and forwarded
/// an opaque user id in this header. Handlers never look identity up
/// themselves — they take it from this extractor, resolved exactly once.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller identity, extracted before any handler logic runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0
    }
}

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}
