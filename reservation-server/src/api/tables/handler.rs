//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};

use crate::core::ServerState;
use crate::db::repository::dining_table;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub zone_id: Option<i64>,
}

/// GET /api/tables - 获取所有桌台 (可按区域过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_all(&state.db.pool, params.zone_id).await?;
    Ok(Json(tables))
}

/// GET /api/tables/:id - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let found = dining_table::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;
    Ok(Json(found))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    let created = dining_table::create(&state.db.pool, payload).await?;
    Ok(Json(created))
}

/// PUT /api/tables/:id - 更新桌台 (缺省字段保留原值)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    let updated = dining_table::update(&state.db.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/tables/:id - 删除桌台 (有未来预订时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = dining_table::delete(&state.db.pool, id, state.business_today()).await?;
    Ok(Json(result))
}
