//! Zone API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{DiningTable, Zone, ZoneCreate, ZoneStatistics, ZoneUpdate, ZoneWithStats};

use crate::core::ServerState;
use crate::db::repository::{dining_table, zone};
use crate::utils::{AppError, AppResult};

/// GET /api/zones - 获取所有区域 (含桌台聚合)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ZoneWithStats>>> {
    let zones = zone::find_all_with_stats(&state.db.pool).await?;
    Ok(Json(zones))
}

/// GET /api/zones/:id - 获取单个区域
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Zone>> {
    let found = zone::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Zone {id} not found")))?;
    Ok(Json(found))
}

/// POST /api/zones - 创建区域
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ZoneCreate>,
) -> AppResult<Json<Zone>> {
    let created = zone::create(&state.db.pool, payload).await?;
    Ok(Json(created))
}

/// PUT /api/zones/:id - 更新区域
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ZoneUpdate>,
) -> AppResult<Json<Zone>> {
    let updated = zone::update(&state.db.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/zones/:id - 删除区域 (仍有桌台时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = zone::delete(&state.db.pool, id).await?;
    Ok(Json(result))
}

/// GET /api/zones/:id/statistics - 区域统计
pub async fn statistics(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ZoneStatistics>> {
    let stats = zone::statistics(&state.db.pool, id, state.business_today()).await?;
    Ok(Json(stats))
}

/// GET /api/zones/:id/tables - 获取区域内的所有桌台
pub async fn list_tables(
    State(state): State<ServerState>,
    Path(zone_id): Path<i64>,
) -> AppResult<Json<Vec<DiningTable>>> {
    if zone::find_by_id(&state.db.pool, zone_id).await?.is_none() {
        return Err(AppError::not_found(format!("Zone {zone_id} not found")));
    }
    let tables = dining_table::find_all(&state.db.pool, Some(zone_id)).await?;
    Ok(Json(tables))
}
