//! Health API

use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health - 健康检查 (验证数据库可达)
async fn health(State(state): State<ServerState>) -> AppResult<Json<Value>> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.db.pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(json!({
        "status": "ok",
        "environment": state.config.environment,
    })))
}
