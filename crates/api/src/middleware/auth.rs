//! Identity extractor for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use clinic_core::identity::Identity;

/// The caller's identity as resolved by the session middleware, if any.
///
/// Never rejects. Use it on public pages that adapt to the caller:
///
/// ```ignore
/// async fn layout(MaybeUser(user): MaybeUser) -> Json<Value> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Identity>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<Identity>().cloned()))
    }
}
