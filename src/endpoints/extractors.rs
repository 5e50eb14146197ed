//! Handler-side extractors for the authenticated user.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::middleware::AuthenticatedUser;
use crate::models::user;

/// Extractor for any authenticated user.
///
/// The auth middleware must have run for the route; admin and ownership
/// checks happen in the services against the live role table, not here.
#[derive(Debug, Clone)]
pub struct Authenticated(pub user::Model);

impl Authenticated {
    pub fn user(&self) -> &user::Model {
        &self.0
    }

    pub fn user_id(&self) -> i64 {
        self.0.id
    }
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        Ok(Authenticated(auth_user.0.clone()))
    }
}
