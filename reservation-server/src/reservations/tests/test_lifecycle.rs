use super::*;
use shared::models::{DiningTableUpdate, TableStatus};

#[tokio::test]
async fn cancel_resets_table_status() {
    let (pool, manager) = setup().await;
    let patio = seed_zone(&pool, "Patio").await;
    let table = seed_table(&pool, patio.id, 5, 4).await;
    let guest = seed_user(&pool).await;

    let reservation = confirmed(
        manager
            .book(guest.id, table.id, d("2024-06-01"), t(19, 0), 2, None)
            .await
            .unwrap(),
    );
    assert_eq!(
        dining_table::find_by_id(&pool, table.id)
            .await
            .unwrap()
            .unwrap()
            .status,
        TableStatus::Reserved
    );

    manager.cancel(reservation.id, d("2024-06-01")).await.unwrap();

    assert_eq!(
        dining_table::find_by_id(&pool, table.id)
            .await
            .unwrap()
            .unwrap()
            .status,
        TableStatus::Available
    );
    assert!(manager.find_by_id(reservation.id).await.unwrap().is_none());
}

#[tokio::test]
async fn cancel_keeps_reserved_while_another_future_booking_covers_table() {
    let (pool, manager) = setup().await;
    let patio = seed_zone(&pool, "Patio").await;
    let table = seed_table(&pool, patio.id, 5, 4).await;
    let guest = seed_user(&pool).await;

    let first = confirmed(
        manager
            .book(guest.id, table.id, d("2024-06-01"), t(19, 0), 2, None)
            .await
            .unwrap(),
    );
    let second = confirmed(
        manager
            .book(guest.id, table.id, d("2024-06-01"), t(21, 30), 2, None)
            .await
            .unwrap(),
    );

    // The second reservation still covers the table
    manager.cancel(first.id, d("2024-06-01")).await.unwrap();
    assert_eq!(
        dining_table::find_by_id(&pool, table.id)
            .await
            .unwrap()
            .unwrap()
            .status,
        TableStatus::Reserved
    );

    manager.cancel(second.id, d("2024-06-01")).await.unwrap();
    assert_eq!(
        dining_table::find_by_id(&pool, table.id)
            .await
            .unwrap()
            .unwrap()
            .status,
        TableStatus::Available
    );
}

#[tokio::test]
async fn cancel_does_not_clobber_maintenance_label() {
    let (pool, manager) = setup().await;
    let patio = seed_zone(&pool, "Patio").await;
    let table = seed_table(&pool, patio.id, 5, 4).await;
    let guest = seed_user(&pool).await;

    let reservation = confirmed(
        manager
            .book(guest.id, table.id, d("2024-06-01"), t(19, 0), 2, None)
            .await
            .unwrap(),
    );
    dining_table::update(
        &pool,
        table.id,
        DiningTableUpdate {
            status: Some(TableStatus::Maintenance),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    manager.cancel(reservation.id, d("2024-06-01")).await.unwrap();

    assert_eq!(
        dining_table::find_by_id(&pool, table.id)
            .await
            .unwrap()
            .unwrap()
            .status,
        TableStatus::Maintenance
    );
}

#[tokio::test]
async fn cancel_unknown_reservation_is_not_found() {
    let (_pool, manager) = setup().await;
    let err = manager.cancel(12345, d("2024-06-01")).await.unwrap_err();
    assert!(matches!(err, crate::db::repository::RepoError::NotFound(_)));
}

#[tokio::test]
async fn update_revalidates_conflict_when_time_moves() {
    let (pool, manager) = setup().await;
    let patio = seed_zone(&pool, "Patio").await;
    let table = seed_table(&pool, patio.id, 5, 4).await;
    let guest = seed_user(&pool).await;

    confirmed(
        manager
            .book(guest.id, table.id, d("2024-06-01"), t(19, 0), 2, None)
            .await
            .unwrap(),
    );
    let second = confirmed(
        manager
            .book(guest.id, table.id, d("2024-06-01"), t(21, 30), 2, None)
            .await
            .unwrap(),
    );

    // Moving into the first reservation's window is rejected...
    let patch = ReservationPatch {
        time: Some(t(20, 0)),
        ..Default::default()
    };
    rejected(manager.update(second.id, patch).await.unwrap());

    // ...and the stored record is untouched
    let unchanged = manager.find_by_id(second.id).await.unwrap().unwrap();
    assert_eq!(unchanged.time, t(21, 30));

    // The explicit override skips re-validation
    let forced = ReservationPatch {
        time: Some(t(20, 0)),
        force: true,
        ..Default::default()
    };
    let moved = confirmed(manager.update(second.id, forced).await.unwrap());
    assert_eq!(moved.time, t(20, 0));
}

#[tokio::test]
async fn update_to_free_window_succeeds() {
    let (pool, manager) = setup().await;
    let patio = seed_zone(&pool, "Patio").await;
    let table = seed_table(&pool, patio.id, 5, 4).await;
    let guest = seed_user(&pool).await;

    let reservation = confirmed(
        manager
            .book(guest.id, table.id, d("2024-06-01"), t(19, 0), 2, None)
            .await
            .unwrap(),
    );

    let patch = ReservationPatch {
        date: Some(d("2024-06-02")),
        time: Some(t(20, 0)),
        party_size: Some(4),
        ..Default::default()
    };
    let updated = confirmed(manager.update(reservation.id, patch).await.unwrap());
    assert_eq!(updated.date, d("2024-06-02"));
    assert_eq!(updated.time, t(20, 0));
    assert_eq!(updated.party_size, 4);
}

#[tokio::test]
async fn update_partial_fields_keep_stored_values() {
    let (pool, manager) = setup().await;
    let patio = seed_zone(&pool, "Patio").await;
    let table = seed_table(&pool, patio.id, 5, 4).await;
    let guest = seed_user(&pool).await;

    let reservation = confirmed(
        manager
            .book(
                guest.id,
                table.id,
                d("2024-06-01"),
                t(19, 0),
                2,
                Some("window seat".to_string()),
            )
            .await
            .unwrap(),
    );

    let patch = ReservationPatch {
        notes: Some("birthday cake".to_string()),
        ..Default::default()
    };
    let updated = confirmed(manager.update(reservation.id, patch).await.unwrap());

    assert_eq!(updated.date, d("2024-06-01"));
    assert_eq!(updated.time, t(19, 0));
    assert_eq!(updated.party_size, 2);
    assert_eq!(updated.notes.as_deref(), Some("birthday cake"));
}

#[tokio::test]
async fn update_unknown_reservation_is_not_found() {
    let (_pool, manager) = setup().await;
    let err = manager
        .update(999, ReservationPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, crate::db::repository::RepoError::NotFound(_)));
}

#[tokio::test]
async fn listings_are_ordered_newest_first() {
    let (pool, manager) = setup().await;
    let patio = seed_zone(&pool, "Patio").await;
    let table = seed_table(&pool, patio.id, 5, 4).await;
    let guest = seed_user(&pool).await;

    confirmed(
        manager
            .book(guest.id, table.id, d("2024-06-01"), t(19, 0), 2, None)
            .await
            .unwrap(),
    );
    confirmed(
        manager
            .book(guest.id, table.id, d("2024-06-02"), t(13, 0), 2, None)
            .await
            .unwrap(),
    );
    confirmed(
        manager
            .book(guest.id, table.id, d("2024-06-02"), t(20, 0), 2, None)
            .await
            .unwrap(),
    );

    let mine = manager.list_for_user(guest.id).await.unwrap();
    let ordering: Vec<(chrono::NaiveDate, chrono::NaiveTime)> =
        mine.iter().map(|r| (r.date, r.time)).collect();
    assert_eq!(
        ordering,
        vec![
            (d("2024-06-02"), t(20, 0)),
            (d("2024-06-02"), t(13, 0)),
            (d("2024-06-01"), t(19, 0)),
        ]
    );
    assert_eq!(mine[0].table_number, 5);
    assert_eq!(mine[0].zone_name.as_deref(), Some("Patio"));

    let all = manager.list_all().await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].user_email, "guest@example.com");
}
