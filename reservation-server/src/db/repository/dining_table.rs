//! Dining Table Repository

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus};
use sqlx::SqlitePool;

/// Find all dining tables, optionally filtered by zone
pub async fn find_all(pool: &SqlitePool, zone_id: Option<i64>) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(
        "SELECT id, zone_id, number, capacity, pos_x, pos_y, status FROM dining_table \
         WHERE (? IS NULL OR zone_id = ?) \
         ORDER BY zone_id, number",
    )
    .bind(zone_id)
    .bind(zone_id)
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, zone_id, number, capacity, pos_x, pos_y, status FROM dining_table WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

/// Find table by display number within a zone
pub async fn find_by_number_in_zone(
    pool: &SqlitePool,
    zone_id: i64,
    number: i64,
) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, zone_id, number, capacity, pos_x, pos_y, status FROM dining_table \
         WHERE zone_id = ? AND number = ? LIMIT 1",
    )
    .bind(zone_id)
    .bind(number)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

/// Create a new dining table
pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    if data.capacity < 1 {
        return Err(RepoError::Validation(
            "Table capacity must be at least 1".into(),
        ));
    }
    if super::zone::find_by_id(pool, data.zone_id).await?.is_none() {
        return Err(RepoError::NotFound(format!(
            "Zone {} not found",
            data.zone_id
        )));
    }

    // Check duplicate number in same zone
    if find_by_number_in_zone(pool, data.zone_id, data.number)
        .await?
        .is_some()
    {
        return Err(RepoError::Duplicate(format!(
            "Table {} already exists in this zone",
            data.number
        )));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO dining_table (zone_id, number, capacity, pos_x, pos_y, status) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.zone_id)
    .bind(data.number)
    .bind(data.capacity)
    .bind(data.pos_x.unwrap_or(0.0))
    .bind(data.pos_y.unwrap_or(0.0))
    .bind(data.status.unwrap_or_default())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

/// Update a dining table (absent fields keep their stored values)
pub async fn update(pool: &SqlitePool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))?;

    if let Some(capacity) = data.capacity
        && capacity < 1
    {
        return Err(RepoError::Validation(
            "Table capacity must be at least 1".into(),
        ));
    }

    // Check duplicate number in zone if changing number or zone
    let check_zone = data.zone_id.unwrap_or(existing.zone_id);
    let check_number = data.number.unwrap_or(existing.number);
    if data.number.is_some() || data.zone_id.is_some() {
        if let Some(zone_id) = data.zone_id
            && super::zone::find_by_id(pool, zone_id).await?.is_none()
        {
            return Err(RepoError::NotFound(format!("Zone {zone_id} not found")));
        }
        if let Some(found) = find_by_number_in_zone(pool, check_zone, check_number).await?
            && found.id != id
        {
            return Err(RepoError::Duplicate(format!(
                "Table {} already exists in this zone",
                check_number
            )));
        }
    }

    sqlx::query(
        "UPDATE dining_table SET zone_id = COALESCE(?, zone_id), number = COALESCE(?, number), \
         capacity = COALESCE(?, capacity), pos_x = COALESCE(?, pos_x), \
         pos_y = COALESCE(?, pos_y), status = COALESCE(?, status) \
         WHERE id = ?",
    )
    .bind(data.zone_id)
    .bind(data.number)
    .bind(data.capacity)
    .bind(data.pos_x)
    .bind(data.pos_y)
    .bind(data.status)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

/// Hard delete a dining table
///
/// Refused while any confirmed reservation dated today or later references it.
pub async fn delete(pool: &SqlitePool, id: i64, today: NaiveDate) -> RepoResult<bool> {
    if find_by_id(pool, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }

    let active: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservation \
         WHERE table_id = ? AND status = 'confirmed' AND date >= ?",
    )
    .bind(id)
    .bind(today)
    .fetch_one(pool)
    .await?;
    if active > 0 {
        return Err(RepoError::Precondition(format!(
            "Cannot delete table: it has {active} active reservation(s)"
        )));
    }

    sqlx::query("DELETE FROM dining_table WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}

/// Count tables in a zone with the given status
pub async fn count_with_status(
    pool: &SqlitePool,
    zone_id: i64,
    status: TableStatus,
) -> RepoResult<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM dining_table WHERE zone_id = ? AND status = ?")
            .bind(zone_id)
            .bind(status)
            .fetch_one(pool)
            .await?;
    Ok(count)
}
