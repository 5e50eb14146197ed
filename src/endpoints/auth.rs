//! Login endpoint issuing access tokens.

use axum::{extract::State, routing::post, Json, Router};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::user;
use crate::schemas::auth::{LoginPayload, TokenResponse};
use crate::services::security::{create_access_token, verify_password};
use crate::state::AppState;

pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/login", post(login))
        .with_state(state)
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<TokenResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = User::find()
        .filter(user::Column::Email.eq(payload.email.to_lowercase()))
        .filter(user::Column::IsActive.eq(true))
        .one(&state.db)
        .await?;

    // Same failure for unknown email and bad password.
    let user = user.ok_or_else(|| {
        AppError::Unauthorized("Invalid email or password".to_string())
    })?;

    if !verify_password(&payload.password, &user.hashed_password)? {
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let access_token = create_access_token(&user)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
