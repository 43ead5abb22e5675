/// Request extractors
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use watchbox_core::types::UserId;

use crate::error::ServerError;

/// The acting user, taken from the `x-user-id` header.
///
/// Every queue mutation is attributed to a user; requests without the
/// header are rejected before the handler runs.
pub struct RequestUser(pub UserId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ServerError::MissingParameters("x-user-id".into()))?;

        Ok(RequestUser(UserId::new(header)))
    }
}
