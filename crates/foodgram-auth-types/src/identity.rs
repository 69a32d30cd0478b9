//! Gateway-injected identity headers extractors.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-foodgram-user-id";

/// Authenticated user identity injected by the gateway via `x-foodgram-user-id`.
///
/// Returns 401 if the header is absent or cannot be parsed as UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
}

/// Identity for endpoints that also serve anonymous callers.
///
/// A missing or malformed header yields `MaybeIdentity(None)` instead of a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeIdentity(pub Option<IdentityHeaders>);

impl MaybeIdentity {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.map(|identity| identity.user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

fn read_user_id(parts: &Parts) -> Option<Uuid> {
    parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<Uuid>().ok())
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract synchronously and return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = read_user_id(parts);
        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id })
        }
    }
}

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = read_user_id(parts).map(|user_id| IdentityHeaders { user_id });
        async move { Ok(Self(identity)) }
    }
}
