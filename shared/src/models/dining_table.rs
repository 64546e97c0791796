//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table status (coarse label, cached)
///
/// This is a derived label for floor-plan rendering. Booking conflicts are
/// decided against the set of confirmed reservations, never against this
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

impl Default for TableStatus {
    fn default() -> Self {
        Self::Available
    }
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    /// Zone reference
    pub zone_id: i64,
    /// Display number, unique within the zone
    pub number: i64,
    pub capacity: i32,
    /// Floor-plan coordinates (opaque to the reservation engine)
    pub pos_x: f64,
    pub pos_y: f64,
    pub status: TableStatus,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub zone_id: i64,
    pub number: i64,
    pub capacity: i32,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub status: Option<TableStatus>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub zone_id: Option<i64>,
    pub number: Option<i64>,
    pub capacity: Option<i32>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub status: Option<TableStatus>,
}
