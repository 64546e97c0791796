//! Table registry rules: duplicate numbers, delete preconditions, cascades

use chrono::{NaiveDate, NaiveTime};
use reservation_server::db::DbService;
use reservation_server::db::repository::{RepoError, dining_table, user, zone};
use reservation_server::reservations::{BookingOutcome, ReservationManager};
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus, UserRole, Zone, ZoneCreate,
    ZoneUpdate,
};

struct Fixture {
    _dir: tempfile::TempDir,
    db: DbService,
}

async fn setup() -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("registry.db");
    let db = DbService::new(db_path.to_str().unwrap())
        .await
        .expect("open database");
    Fixture { _dir: dir, db }
}

async fn create_zone(db: &DbService, name: &str) -> Zone {
    zone::create(
        &db.pool,
        ZoneCreate {
            name: name.to_string(),
            description: None,
            max_capacity: None,
        },
    )
    .await
    .unwrap()
}

async fn create_table(db: &DbService, zone_id: i64, number: i64, capacity: i32) -> DiningTable {
    dining_table::create(
        &db.pool,
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

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn t(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

#[tokio::test]
async fn duplicate_table_number_rejected_within_zone_only() {
    let fx = setup().await;
    let patio = create_zone(&fx.db, "Patio").await;
    let hall = create_zone(&fx.db, "Main Hall").await;
    create_table(&fx.db, patio.id, 5, 4).await;

    let err = dining_table::create(
        &fx.db.pool,
        DiningTableCreate {
            zone_id: patio.id,
            number: 5,
            capacity: 2,
            pos_x: None,
            pos_y: None,
            status: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    // Same number is fine in a different zone
    create_table(&fx.db, hall.id, 5, 4).await;
}

#[tokio::test]
async fn zone_with_tables_cannot_be_deleted() {
    let fx = setup().await;
    let patio = create_zone(&fx.db, "Patio").await;
    let table = create_table(&fx.db, patio.id, 5, 4).await;

    let err = zone::delete(&fx.db.pool, patio.id).await.unwrap_err();
    assert!(matches!(err, RepoError::Precondition(_)));

    // The zone must be left untouched by the failed delete
    let still_there = zone::find_by_id(&fx.db.pool, patio.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(still_there.name, "Patio");

    // After removing the table, deletion goes through
    dining_table::delete(&fx.db.pool, table.id, d("2024-06-01"))
        .await
        .unwrap();
    assert!(zone::delete(&fx.db.pool, patio.id).await.unwrap());
    assert!(zone::find_by_id(&fx.db.pool, patio.id).await.unwrap().is_none());
}

#[tokio::test]
async fn table_with_future_reservations_cannot_be_deleted() {
    let fx = setup().await;
    let patio = create_zone(&fx.db, "Patio").await;
    let table = create_table(&fx.db, patio.id, 5, 4).await;
    let guest = user::create(
        &fx.db.pool,
        "Guest",
        "guest@example.com",
        "not-a-real-hash",
        None,
        UserRole::Customer,
    )
    .await
    .unwrap();

    let manager = ReservationManager::new(fx.db.pool.clone());
    match manager
        .book(guest.id, table.id, d("2024-06-01"), t(19, 0), 2, None)
        .await
        .unwrap()
    {
        BookingOutcome::Confirmed(_) => {}
        BookingOutcome::Rejected(_) => panic!("fresh table must accept a booking"),
    };

    let err = dining_table::delete(&fx.db.pool, table.id, d("2024-06-01"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Precondition(_)));

    // A reservation in the past no longer blocks deletion
    dining_table::delete(&fx.db.pool, table.id, d("2024-06-02"))
        .await
        .unwrap();

    // Cleanup path: cancel then delete also works on a fresh table
    let table2 = create_table(&fx.db, patio.id, 6, 4).await;
    let r2 = match manager
        .book(guest.id, table2.id, d("2024-06-01"), t(19, 0), 2, None)
        .await
        .unwrap()
    {
        BookingOutcome::Confirmed(r) => r,
        BookingOutcome::Rejected(_) => panic!("fresh table must accept a booking"),
    };
    manager.cancel(r2.id, d("2024-06-01")).await.unwrap();
    dining_table::delete(&fx.db.pool, table2.id, d("2024-06-01"))
        .await
        .unwrap();
}

#[tokio::test]
async fn table_update_falls_back_to_stored_values() {
    let fx = setup().await;
    let patio = create_zone(&fx.db, "Patio").await;
    let table = create_table(&fx.db, patio.id, 5, 4).await;

    let updated = dining_table::update(
        &fx.db.pool,
        table.id,
        DiningTableUpdate {
            capacity: Some(6),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.capacity, 6);
    assert_eq!(updated.number, 5);
    assert_eq!(updated.zone_id, patio.id);
    assert_eq!(updated.status, TableStatus::Available);
}

#[tokio::test]
async fn zone_rename_collision_rejected() {
    let fx = setup().await;
    let patio = create_zone(&fx.db, "Patio").await;
    create_zone(&fx.db, "Main Hall").await;

    let names: Vec<String> = zone::find_all(&fx.db.pool)
        .await
        .unwrap()
        .into_iter()
        .map(|z| z.name)
        .collect();
    assert_eq!(names, vec!["Main Hall", "Patio"]);

    let err = zone::update(
        &fx.db.pool,
        patio.id,
        ZoneUpdate {
            name: Some("Main Hall".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn zone_list_aggregates_and_statistics() {
    let fx = setup().await;
    let patio = create_zone(&fx.db, "Patio").await;
    create_table(&fx.db, patio.id, 1, 4).await;
    create_table(&fx.db, patio.id, 2, 6).await;

    let zones = zone::find_all_with_stats(&fx.db.pool).await.unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].total_tables, 2);
    assert_eq!(zones[0].total_capacity, 10);
    assert_eq!(zones[0].available_tables, 2);

    let guest = user::create(
        &fx.db.pool,
        "Guest",
        "guest@example.com",
        "not-a-real-hash",
        None,
        UserRole::Customer,
    )
    .await
    .unwrap();
    let manager = ReservationManager::new(fx.db.pool.clone());
    let table = dining_table::find_by_number_in_zone(&fx.db.pool, patio.id, 1)
        .await
        .unwrap()
        .unwrap();
    manager
        .book(guest.id, table.id, d("2024-06-01"), t(19, 0), 3, None)
        .await
        .unwrap();

    assert_eq!(
        dining_table::count_with_status(&fx.db.pool, patio.id, TableStatus::Reserved)
            .await
            .unwrap(),
        1
    );

    let stats = zone::statistics(&fx.db.pool, patio.id, d("2024-06-01"))
        .await
        .unwrap();
    assert_eq!(stats.tables.total, 2);
    assert_eq!(stats.tables.reserved, 1);
    assert_eq!(stats.tables.available, 1);
    assert_eq!(stats.reservations.total, 1);
    assert_eq!(stats.reservations.confirmed, 1);
    assert_eq!(stats.reservations.total_guests, 3);
    assert_eq!(stats.reservations.upcoming, 1);
}
