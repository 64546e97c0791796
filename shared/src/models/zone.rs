//! Zone Model

use serde::{Deserialize, Serialize};

/// Zone entity (区域：大厅、露台、包厢等)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Zone {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub max_capacity: i32,
    pub is_active: bool,
}

/// Create zone payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCreate {
    pub name: String,
    pub description: Option<String>,
    pub max_capacity: Option<i32>,
}

/// Update zone payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub max_capacity: Option<i32>,
    pub is_active: Option<bool>,
}

/// Zone row with per-zone table aggregates (list view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ZoneWithStats {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub max_capacity: i32,
    pub is_active: bool,
    pub total_tables: i64,
    pub total_capacity: i64,
    pub available_tables: i64,
}

/// Table counts by status for one zone
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ZoneTableStats {
    pub total: i64,
    pub total_capacity: i64,
    pub available: i64,
    pub occupied: i64,
    pub reserved: i64,
    pub maintenance: i64,
}

/// Reservation statistics for one zone (trailing 30 days)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ZoneReservationStats {
    pub total: i64,
    pub confirmed: i64,
    pub total_guests: i64,
    /// Reservations dated today or later
    pub upcoming: i64,
}

/// Full statistics response for GET /api/zones/:id/statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneStatistics {
    pub zone: Zone,
    pub tables: ZoneTableStats,
    pub reservations: ZoneReservationStats,
}
