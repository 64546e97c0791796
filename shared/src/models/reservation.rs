//! Reservation Model

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Reservation status
///
/// Cancellation hard-deletes the row, so persisted rows are `confirmed` in
/// practice; the variant is kept for imports and API symmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

impl Default for ReservationStatus {
    fn default() -> Self {
        Self::Confirmed
    }
}

/// Reservation entity (预订)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    /// Booking user reference
    pub user_id: i64,
    /// Dining table reference
    pub table_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: i32,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub created_at: NaiveDateTime,
}

/// Create reservation payload
///
/// Date/time arrive as strings and are parsed at the API handler layer;
/// the engine only sees typed values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub table_id: i64,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM or HH:MM:SS
    pub time: String,
    pub party_size: i32,
    pub notes: Option<String>,
}

/// Update reservation payload (partial; admin)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationUpdate {
    /// YYYY-MM-DD
    pub date: Option<String>,
    /// HH:MM or HH:MM:SS
    pub time: Option<String>,
    pub party_size: Option<i32>,
    pub notes: Option<String>,
    /// Skip conflict re-validation when moving date/time (admin override)
    #[serde(default)]
    pub force: bool,
}

/// Reservation with table/zone metadata joined (user listing)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationDetail {
    pub id: i64,
    pub user_id: i64,
    pub table_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: i32,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub created_at: NaiveDateTime,
    pub table_number: i64,
    pub zone_name: Option<String>,
}

/// Reservation with user and table/zone metadata joined (admin listing)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationAdminDetail {
    pub id: i64,
    pub user_id: i64,
    pub table_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: i32,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub created_at: NaiveDateTime,
    pub user_name: String,
    pub user_email: String,
    pub table_number: i64,
    pub zone_name: Option<String>,
}
