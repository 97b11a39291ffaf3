//! Path parameter extractors
//!
//! Numeric ids in paths are parsed here so handlers never see raw strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;

/// A single numeric id from the path (`/businesses/:id`)
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        raw.parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(IdPath)
            .ok_or_else(|| ApiError::invalid_path(format!("Invalid id: {raw}")))
    }
}

/// Path parameters for `/admin/users/:id/roles/:role`
#[derive(Debug, Clone)]
pub struct UserRolePath {
    pub user_id: i64,
    pub role: String,
}

#[derive(Debug, Deserialize)]
struct RawUserRolePath {
    id: String,
    role: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for UserRolePath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawUserRolePath>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        let user_id = raw
            .id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid user id format"))?;

        Ok(Self {
            user_id,
            role: raw.role,
        })
    }
}
