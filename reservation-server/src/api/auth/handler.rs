//! Auth API Handlers

use axum::{Json, extract::State};
use shared::models::{LoginResponse, UserLogin, UserRegister, UserResponse, UserRole};

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult};

/// POST /api/auth/register - 注册新用户 (customer 角色)
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserRegister>,
) -> AppResult<Json<LoginResponse>> {
    if payload.password.len() < 8 {
        return Err(AppError::validation(
            "Password must be at least 8 characters",
        ));
    }

    let hash = hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let created = user::create(
        &state.db.pool,
        &payload.name,
        &payload.email,
        &hash,
        payload.phone.as_deref(),
        UserRole::Customer,
    )
    .await?;

    let token = state
        .jwt_service
        .generate_token(created.id, &created.name, created.role)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;

    tracing::info!(user_id = created.id, "user registered");
    Ok(Json(LoginResponse {
        token,
        user: created.into(),
    }))
}

/// POST /api/auth/login - 登录
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<UserLogin>,
) -> AppResult<Json<LoginResponse>> {
    let found = user::find_by_email(&state.db.pool, &payload.email).await?;

    // Same error for unknown email and wrong password
    let found = found.ok_or_else(AppError::invalid_credentials)?;
    if !verify_password(&payload.password, &found.hash_pass) {
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(found.id, &found.name, found.role)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        user: found.into(),
    }))
}

/// GET /api/auth/me - 当前用户信息
pub async fn me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<UserResponse>> {
    let found = user::find_by_id(&state.db.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", current_user.id)))?;
    Ok(Json(found.into()))
}
