use super::*;

use chrono::{NaiveDate, NaiveTime};
use shared::models::{DiningTable, DiningTableCreate, User, UserRole, Zone, ZoneCreate};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use crate::db::repository::{dining_table, user, zone};

mod test_lifecycle;

async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .pragma("foreign_keys", "ON");
    // Single connection: one in-memory database shared by the whole test
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

async fn setup() -> (SqlitePool, ReservationManager) {
    let pool = test_pool().await;
    let manager = ReservationManager::new(pool.clone());
    (pool, manager)
}

async fn seed_zone(pool: &SqlitePool, name: &str) -> Zone {
    zone::create(
        pool,
        ZoneCreate {
            name: name.to_string(),
            description: None,
            max_capacity: None,
        },
    )
    .await
    .unwrap()
}

async fn seed_table(pool: &SqlitePool, zone_id: i64, number: i64, capacity: i32) -> DiningTable {
    dining_table::create(
        pool,
        DiningTableCreate {
            zone_id,
            number,
            capacity,
            pos_x: None,
            pos_y: None,
            status: None,
        },
    )
    .await
    .unwrap()
}

async fn seed_user(pool: &SqlitePool) -> User {
    user::create(
        pool,
        "Test Guest",
        "guest@example.com",
        "not-a-real-hash",
        None,
        UserRole::Customer,
    )
    .await
    .unwrap()
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn t(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

fn confirmed(outcome: BookingOutcome) -> shared::models::Reservation {
    match outcome {
        BookingOutcome::Confirmed(r) => r,
        BookingOutcome::Rejected(rej) => panic!("expected confirmation, got rejection: {rej:?}"),
    }
}

fn rejected(outcome: BookingOutcome) -> ConflictRejection {
    match outcome {
        BookingOutcome::Rejected(rej) => rej,
        BookingOutcome::Confirmed(r) => panic!("expected rejection, got confirmation: {r:?}"),
    }
}
