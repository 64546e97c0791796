//! Zone Repository

use super::{RepoError, RepoResult};
use chrono::{Duration, NaiveDate};
use shared::models::{
    Zone, ZoneCreate, ZoneReservationStats, ZoneStatistics, ZoneTableStats, ZoneUpdate,
    ZoneWithStats,
};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Zone>> {
    let zones = sqlx::query_as::<_, Zone>(
        "SELECT id, name, description, max_capacity, is_active FROM zone ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(zones)
}

/// Find all zones with per-zone table aggregates (list view)
pub async fn find_all_with_stats(pool: &SqlitePool) -> RepoResult<Vec<ZoneWithStats>> {
    let zones = sqlx::query_as::<_, ZoneWithStats>(
        "SELECT z.id, z.name, z.description, z.max_capacity, z.is_active, \
                COUNT(t.id) AS total_tables, \
                COALESCE(SUM(t.capacity), 0) AS total_capacity, \
                COALESCE(SUM(CASE WHEN t.status = 'available' THEN 1 ELSE 0 END), 0) AS available_tables \
         FROM zone z \
         LEFT JOIN dining_table t ON t.zone_id = z.id \
         GROUP BY z.id \
         ORDER BY z.name",
    )
    .fetch_all(pool)
    .await?;
    Ok(zones)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Zone>> {
    let zone = sqlx::query_as::<_, Zone>(
        "SELECT id, name, description, max_capacity, is_active FROM zone WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(zone)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Zone>> {
    let zone = sqlx::query_as::<_, Zone>(
        "SELECT id, name, description, max_capacity, is_active FROM zone WHERE name = ? LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(zone)
}

pub async fn create(pool: &SqlitePool, data: ZoneCreate) -> RepoResult<Zone> {
    if data.name.trim().is_empty() {
        return Err(RepoError::Validation("Zone name is required".into()));
    }
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Zone '{}' already exists",
            data.name
        )));
    }
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO zone (name, description, max_capacity) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.max_capacity.unwrap_or(50))
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create zone".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ZoneUpdate) -> RepoResult<Zone> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Zone {id} not found")))?;

    // Renaming must not collide with another zone
    if let Some(name) = &data.name
        && *name != existing.name
        && let Some(found) = find_by_name(pool, name).await?
        && found.id != id
    {
        return Err(RepoError::Duplicate(format!(
            "Zone '{}' already exists",
            name
        )));
    }

    sqlx::query(
        "UPDATE zone SET name = COALESCE(?, name), description = COALESCE(?, description), \
         max_capacity = COALESCE(?, max_capacity), is_active = COALESCE(?, is_active) \
         WHERE id = ?",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.max_capacity)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Zone {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    if find_by_id(pool, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Zone {id} not found")));
    }

    // A zone that still owns tables cannot be deleted
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dining_table WHERE zone_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Err(RepoError::Precondition(format!(
            "Cannot delete zone: it still has {count} table(s); move or delete them first"
        )));
    }

    sqlx::query("DELETE FROM zone WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}

/// Zone statistics: table counts by status plus trailing-30-day reservation stats
pub async fn statistics(
    pool: &SqlitePool,
    id: i64,
    today: NaiveDate,
) -> RepoResult<ZoneStatistics> {
    let zone = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Zone {id} not found")))?;

    let tables = sqlx::query_as::<_, ZoneTableStats>(
        "SELECT COUNT(*) AS total, \
                COALESCE(SUM(capacity), 0) AS total_capacity, \
                COALESCE(SUM(CASE WHEN status = 'available' THEN 1 ELSE 0 END), 0) AS available, \
                COALESCE(SUM(CASE WHEN status = 'occupied' THEN 1 ELSE 0 END), 0) AS occupied, \
                COALESCE(SUM(CASE WHEN status = 'reserved' THEN 1 ELSE 0 END), 0) AS reserved, \
                COALESCE(SUM(CASE WHEN status = 'maintenance' THEN 1 ELSE 0 END), 0) AS maintenance \
         FROM dining_table WHERE zone_id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    let since = today - Duration::days(30);
    let reservations = sqlx::query_as::<_, ZoneReservationStats>(
        "SELECT COUNT(*) AS total, \
                COALESCE(SUM(CASE WHEN r.status = 'confirmed' THEN 1 ELSE 0 END), 0) AS confirmed, \
                COALESCE(SUM(r.party_size), 0) AS total_guests, \
                COALESCE(SUM(CASE WHEN r.date >= ? THEN 1 ELSE 0 END), 0) AS upcoming \
         FROM reservation r \
         JOIN dining_table t ON r.table_id = t.id \
         WHERE t.zone_id = ? AND r.date >= ?",
    )
    .bind(today)
    .bind(id)
    .bind(since)
    .fetch_one(pool)
    .await?;

    Ok(ZoneStatistics {
        zone,
        tables,
        reservations,
    })
}
