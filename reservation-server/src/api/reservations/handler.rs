//! Reservation API Handlers
//!
//! String date/time parsing happens here; the engine only sees typed values.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;
use shared::models::{
    DiningTable, Reservation, ReservationAdminDetail, ReservationCreate, ReservationDetail,
    ReservationUpdate,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::reservations::{BookingOutcome, ReservationPatch};
use crate::utils::time::{parse_date, parse_time};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM or HH:MM:SS
    pub time: String,
    pub party_size: i32,
    pub zone_id: Option<i64>,
}

/// GET /api/availability - 查询可预订桌台 (advisory)
pub async fn availability(
    State(state): State<ServerState>,
    Query(params): Query<AvailabilityParams>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let date = parse_date(&params.date)?;
    let time = parse_time(&params.time)?;
    let tables = state
        .reservations
        .find_available(date, time, params.party_size, params.zone_id)
        .await?;
    Ok(Json(tables))
}

/// POST /api/reservations - 创建预订 (atomic, conflict-checked)
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    let date = parse_date(&payload.date)?;
    let time = parse_time(&payload.time)?;

    let outcome = state
        .reservations
        .book(
            current_user.id,
            payload.table_id,
            date,
            time,
            payload.party_size,
            payload.notes,
        )
        .await?;

    match outcome {
        BookingOutcome::Confirmed(reservation) => Ok(Json(reservation)),
        BookingOutcome::Rejected(rejection) => Err(AppError::conflict(format!(
            "Table {} already has {} reservation(s) within 2 hours of {} on {}",
            rejection.table_id, rejection.conflicting, payload.time, rejection.date
        ))),
    }
}

/// GET /api/reservations/mine - 当前用户的预订
pub async fn my_reservations(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<ReservationDetail>>> {
    let reservations = state.reservations.list_for_user(current_user.id).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations - 全部预订 (admin)
pub async fn list_all(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ReservationAdminDetail>>> {
    let reservations = state.reservations.list_all().await?;
    Ok(Json(reservations))
}

/// PUT /api/reservations/:id - 更新预订 (admin; 移动时间时重新校验冲突)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    let patch = ReservationPatch {
        date: payload.date.as_deref().map(parse_date).transpose()?,
        time: payload.time.as_deref().map(parse_time).transpose()?,
        party_size: payload.party_size,
        notes: payload.notes,
        force: payload.force,
    };

    match state.reservations.update(id, patch).await? {
        BookingOutcome::Confirmed(reservation) => Ok(Json(reservation)),
        BookingOutcome::Rejected(rejection) => Err(AppError::conflict(format!(
            "New time conflicts with {} reservation(s) on table {} ({})",
            rejection.conflicting, rejection.table_id, rejection.date
        ))),
    }
}

/// DELETE /api/reservations/:id - 取消预订 (admin)
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    state
        .reservations
        .cancel(id, state.business_today())
        .await?;
    Ok(Json(true))
}
