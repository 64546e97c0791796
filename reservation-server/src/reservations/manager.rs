//! ReservationManager - booking transactions and reservation lifecycle

use chrono::{NaiveDate, NaiveTime};
use shared::models::{DiningTable, Reservation, ReservationAdminDetail, ReservationDetail};
use sqlx::SqlitePool;

use crate::db::repository::{RepoError, RepoResult, dining_table};

/// Two reservations on the same table and date conflict when their times are
/// strictly closer than this (symmetric buffer).
pub const CONFLICT_WINDOW_SECS: i64 = 2 * 60 * 60;

/// Result of a booking or re-validated update
///
/// A conflict is an expected outcome under contention, not a fault, so it is
/// a variant rather than an error: callers pick another table/time.
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Confirmed(Reservation),
    Rejected(ConflictRejection),
}

/// Detail of a conflict rejection, enough for the caller to re-select
#[derive(Debug, Clone)]
pub struct ConflictRejection {
    pub table_id: i64,
    pub date: NaiveDate,
    /// Committed reservations inside the window at decision time
    pub conflicting: i64,
}

/// Partial update for a reservation (parsed, typed; see the API layer for the
/// string-carrying payload)
#[derive(Debug, Clone, Default)]
pub struct ReservationPatch {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub party_size: Option<i32>,
    pub notes: Option<String>,
    /// Skip conflict re-validation when moving date/time (admin override)
    pub force: bool,
}

#[derive(Clone)]
pub struct ReservationManager {
    pool: SqlitePool,
}

impl ReservationManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Advisory availability query
    ///
    /// Snapshot read without the serializing lock; results may be stale by the
    /// time a booking commits and are never trusted for the commit decision.
    pub async fn find_available(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        party_size: i32,
        zone_id: Option<i64>,
    ) -> RepoResult<Vec<DiningTable>> {
        if party_size < 1 {
            return Err(RepoError::Validation(
                "Party size must be at least 1".into(),
            ));
        }
        let tables = sqlx::query_as::<_, DiningTable>(
            "SELECT t.id, t.zone_id, t.number, t.capacity, t.pos_x, t.pos_y, t.status \
             FROM dining_table t \
             WHERE t.capacity >= ? \
               AND t.status != 'maintenance' \
               AND (? IS NULL OR t.zone_id = ?) \
               AND NOT EXISTS ( \
                   SELECT 1 FROM reservation r \
                   WHERE r.table_id = t.id \
                     AND r.date = ? \
                     AND r.status = 'confirmed' \
                     AND ABS(strftime('%s', r.time) - strftime('%s', ?)) < ?) \
             ORDER BY t.zone_id, t.number",
        )
        .bind(party_size)
        .bind(zone_id)
        .bind(zone_id)
        .bind(date)
        .bind(time)
        .bind(CONFLICT_WINDOW_SECS)
        .fetch_all(&self.pool)
        .await?;
        Ok(tables)
    }

    /// Atomically validate and commit a booking
    ///
    /// Exactly one of any set of concurrent conflicting calls commits; the
    /// rest observe [`BookingOutcome::Rejected`]. A failed call commits
    /// nothing, so retrying after a storage error is safe.
    pub async fn book(
        &self,
        user_id: i64,
        table_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        party_size: i32,
        notes: Option<String>,
    ) -> RepoResult<BookingOutcome> {
        if party_size < 1 {
            return Err(RepoError::Validation(
                "Party size must be at least 1".into(),
            ));
        }
        // Eager existence check before any lock is taken
        dining_table::find_by_id(&self.pool, table_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {table_id} not found")))?;

        // Rolls back on drop if any path below errors out
        let mut tx = self.pool.begin().await?;

        // First write takes SQLite's writer lock for the rest of the
        // transaction, serializing concurrent bookings. rows_affected doubles
        // as the under-lock existence check.
        let locked = sqlx::query("UPDATE dining_table SET status = status WHERE id = ?")
            .bind(table_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if locked == 0 {
            tx.rollback().await?;
            return Err(RepoError::NotFound(format!("Table {table_id} not found")));
        }

        // Authoritative conflict re-check. The advisory read may be stale;
        // this count, taken under the lock, decides.
        let conflicting: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservation \
             WHERE table_id = ? AND date = ? AND status = 'confirmed' \
               AND ABS(strftime('%s', time) - strftime('%s', ?)) < ?",
        )
        .bind(table_id)
        .bind(date)
        .bind(time)
        .bind(CONFLICT_WINDOW_SECS)
        .fetch_one(&mut *tx)
        .await?;

        if conflicting > 0 {
            tx.rollback().await?;
            tracing::debug!(
                table_id,
                date = %date,
                time = %time,
                conflicting,
                "booking rejected: conflicting reservation(s) in window"
            );
            return Ok(BookingOutcome::Rejected(ConflictRejection {
                table_id,
                date,
                conflicting,
            }));
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO reservation (user_id, table_id, date, time, party_size, notes) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(user_id)
        .bind(table_id)
        .bind(date)
        .bind(time)
        .bind(party_size)
        .bind(&notes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE dining_table SET status = 'reserved' WHERE id = ?")
            .bind(table_id)
            .execute(&mut *tx)
            .await?;

        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT id, user_id, table_id, date, time, party_size, notes, status, created_at \
             FROM reservation WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(reservation_id = id, table_id, user_id, "reservation confirmed");
        Ok(BookingOutcome::Confirmed(reservation))
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT id, user_id, table_id, date, time, party_size, notes, status, created_at \
             FROM reservation WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(reservation)
    }

    /// Partially update a reservation
    ///
    /// When the date or time moves, the conflict window is re-checked under
    /// the same lock as a booking, unless `patch.force` is set.
    pub async fn update(&self, id: i64, patch: ReservationPatch) -> RepoResult<BookingOutcome> {
        if let Some(party_size) = patch.party_size
            && party_size < 1
        {
            return Err(RepoError::Validation(
                "Party size must be at least 1".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        // Take the writer lock up front; rows_affected is the existence check
        let locked = sqlx::query("UPDATE reservation SET id = id WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if locked == 0 {
            tx.rollback().await?;
            return Err(RepoError::NotFound(format!("Reservation {id} not found")));
        }

        let existing = sqlx::query_as::<_, Reservation>(
            "SELECT id, user_id, table_id, date, time, party_size, notes, status, created_at \
             FROM reservation WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let date = patch.date.unwrap_or(existing.date);
        let time = patch.time.unwrap_or(existing.time);
        let party_size = patch.party_size.unwrap_or(existing.party_size);
        let notes = patch.notes.or(existing.notes);

        let moved = date != existing.date || time != existing.time;
        if moved && !patch.force {
            let conflicting: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM reservation \
                 WHERE table_id = ? AND date = ? AND status = 'confirmed' AND id != ? \
                   AND ABS(strftime('%s', time) - strftime('%s', ?)) < ?",
            )
            .bind(existing.table_id)
            .bind(date)
            .bind(id)
            .bind(time)
            .bind(CONFLICT_WINDOW_SECS)
            .fetch_one(&mut *tx)
            .await?;
            if conflicting > 0 {
                tx.rollback().await?;
                tracing::debug!(
                    reservation_id = id,
                    table_id = existing.table_id,
                    date = %date,
                    "update rejected: new window conflicts"
                );
                return Ok(BookingOutcome::Rejected(ConflictRejection {
                    table_id: existing.table_id,
                    date,
                    conflicting,
                }));
            }
        }

        sqlx::query(
            "UPDATE reservation SET date = ?, time = ?, party_size = ?, notes = ? WHERE id = ?",
        )
        .bind(date)
        .bind(time)
        .bind(party_size)
        .bind(&notes)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query_as::<_, Reservation>(
            "SELECT id, user_id, table_id, date, time, party_size, notes, status, created_at \
             FROM reservation WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(BookingOutcome::Confirmed(updated))
    }

    /// Cancel (hard-delete) a reservation and reconcile the table status
    ///
    /// The table goes back to 'available' only if no other confirmed
    /// reservation dated `today` or later still covers it, and only from the
    /// 'reserved' status — occupied/maintenance labels are left alone.
    pub async fn cancel(&self, id: i64, today: NaiveDate) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query("UPDATE reservation SET id = id WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if locked == 0 {
            tx.rollback().await?;
            return Err(RepoError::NotFound(format!("Reservation {id} not found")));
        }

        let table_id: i64 = sqlx::query_scalar("SELECT table_id FROM reservation WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM reservation WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Recompute the cached status from the remaining reservations
        let remaining: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservation \
             WHERE table_id = ? AND status = 'confirmed' AND date >= ?",
        )
        .bind(table_id)
        .bind(today)
        .fetch_one(&mut *tx)
        .await?;
        if remaining == 0 {
            sqlx::query(
                "UPDATE dining_table SET status = 'available' WHERE id = ? AND status = 'reserved'",
            )
            .bind(table_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::info!(reservation_id = id, table_id, "reservation cancelled");
        Ok(())
    }

    /// Reservations of one user, newest first, with table/zone metadata
    pub async fn list_for_user(&self, user_id: i64) -> RepoResult<Vec<ReservationDetail>> {
        let reservations = sqlx::query_as::<_, ReservationDetail>(
            "SELECT r.id, r.user_id, r.table_id, r.date, r.time, r.party_size, r.notes, \
                    r.status, r.created_at, t.number AS table_number, z.name AS zone_name \
             FROM reservation r \
             JOIN dining_table t ON r.table_id = t.id \
             LEFT JOIN zone z ON t.zone_id = z.id \
             WHERE r.user_id = ? \
             ORDER BY r.date DESC, r.time DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reservations)
    }

    /// All reservations with user and table/zone metadata (admin)
    pub async fn list_all(&self) -> RepoResult<Vec<ReservationAdminDetail>> {
        let reservations = sqlx::query_as::<_, ReservationAdminDetail>(
            "SELECT r.id, r.user_id, r.table_id, r.date, r.time, r.party_size, r.notes, \
                    r.status, r.created_at, u.name AS user_name, u.email AS user_email, \
                    t.number AS table_number, z.name AS zone_name \
             FROM reservation r \
             JOIN app_user u ON r.user_id = u.id \
             JOIN dining_table t ON r.table_id = t.id \
             LEFT JOIN zone z ON t.zone_id = z.id \
             ORDER BY r.date DESC, r.time DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(reservations)
    }
}
