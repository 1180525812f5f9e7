//! Registration backfill end-to-end tests
//!
//! Runs the full job against an in-memory SQLite store.

use std::sync::Arc;

use nursery_core::application::RegistrationBackfill;
use nursery_core::domain::{Booking, Farmer};
use nursery_core::port::{BookingRepository, FarmerRepository, FixedTimeProvider};
use nursery_infra_sqlite::{
    create_pool, create_schema, SqliteBookingRepository, SqliteFarmerRepository,
    SqliteRegistrationIndex,
};
use serde_json::json;
use sqlx::SqlitePool;

struct Store {
    pool: SqlitePool,
    farmers: Arc<SqliteFarmerRepository>,
    bookings: Arc<SqliteBookingRepository>,
}

async fn setup_store() -> Store {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    create_schema(&pool).await.unwrap();

    Store {
        farmers: Arc::new(SqliteFarmerRepository::new(pool.clone())),
        bookings: Arc::new(SqliteBookingRepository::new(pool.clone())),
        pool,
    }
}

fn backfill(store: &Store, now: i64) -> RegistrationBackfill {
    RegistrationBackfill::new(
        store.farmers.clone(),
        store.bookings.clone(),
        Arc::new(SqliteRegistrationIndex::new(store.pool.clone())),
        Arc::new(FixedTimeProvider(now)),
    )
}

async fn registration_of(store: &Store, farmer_id: &str) -> Option<String> {
    store
        .farmers
        .find_by_id(&farmer_id.to_string())
        .await
        .unwrap()
        .unwrap()
        .registration_no
}

async fn copied_registration_of(store: &Store, booking_id: &str) -> Option<String> {
    store
        .bookings
        .find_by_id(&booking_id.to_string())
        .await
        .unwrap()
        .unwrap()
        .farmer_registration_no
}

/// Three farmers (one pre-registered) and two bookings
#[tokio::test]
async fn test_mixed_store_scenario() {
    let store = setup_store().await;

    let p1 = Farmer::new("P1", 100, "Asha", None).unwrap();
    let p2 = Farmer::new("P2", 200, "Ravi", None)
        .unwrap()
        .with_registration_no("REG-000050");
    let p3 = Farmer::new("P3", 300, "Meena", None).unwrap();
    for f in [&p1, &p2, &p3] {
        store.farmers.insert(f).await.unwrap();
    }
    store
        .bookings
        .insert(&Booking::new("B1", 100, json!("P1"), Some("Tomato".into()), 500))
        .await
        .unwrap();
    store
        .bookings
        .insert(&Booking::new("B2", 200, json!("P2"), Some("Brinjal".into()), 250))
        .await
        .unwrap();

    let report = backfill(&store, 9_000).run().await.unwrap();

    assert_eq!(registration_of(&store, "P1").await.as_deref(), Some("REG-000051"));
    assert_eq!(registration_of(&store, "P2").await.as_deref(), Some("REG-000050"));
    assert_eq!(registration_of(&store, "P3").await.as_deref(), Some("REG-000052"));

    assert_eq!(copied_registration_of(&store, "B1").await.as_deref(), Some("REG-000051"));
    assert_eq!(copied_registration_of(&store, "B2").await.as_deref(), Some("REG-000050"));

    assert_eq!(report.farmers_scanned, 3);
    assert_eq!(report.registrations_assigned, 2);
    assert_eq!(report.already_registered, 1);
    assert_eq!(report.bookings_updated, 2);
    assert_eq!(report.bookings_unresolved, 0);
    assert!(report.index.is_created());
    assert!(report.is_clean());

    // Pre-registered farmer was not written at all
    let p2_stored = store.farmers.find_by_id(&"P2".to_string()).await.unwrap().unwrap();
    assert_eq!(p2_stored, p2);
}

/// Empty store: first registration number is REG-000001
#[tokio::test]
async fn test_first_registration_number() {
    let store = setup_store().await;
    store
        .farmers
        .insert(&Farmer::new("F1", 1, "Asha", None).unwrap())
        .await
        .unwrap();

    backfill(&store, 1).run().await.unwrap();

    assert_eq!(registration_of(&store, "F1").await.as_deref(), Some("REG-000001"));
}

/// Wrapped and raw references resolve to the same farmer
#[tokio::test]
async fn test_wrapped_reference_resolution() {
    let store = setup_store().await;
    store
        .farmers
        .insert(&Farmer::new("P1", 1, "Asha", None).unwrap())
        .await
        .unwrap();
    store
        .bookings
        .insert(&Booking::new("raw", 1, json!("P1"), None, 1))
        .await
        .unwrap();
    store
        .bookings
        .insert(&Booking::new("wrapped", 2, json!({"$oid": "P1"}), None, 1))
        .await
        .unwrap();

    backfill(&store, 1).run().await.unwrap();

    let raw = copied_registration_of(&store, "raw").await;
    let wrapped = copied_registration_of(&store, "wrapped").await;
    assert_eq!(raw.as_deref(), Some("REG-000001"));
    assert_eq!(raw, wrapped);
}

/// Null and dangling references are reported, not fatal
#[tokio::test]
async fn test_unresolved_references_are_reported() {
    let store = setup_store().await;
    store
        .farmers
        .insert(&Farmer::new("P1", 1, "Asha", None).unwrap())
        .await
        .unwrap();
    let orphan = Booking::new("orphan", 1, json!("deleted-farmer"), None, 3);
    let empty = Booking::new("empty", 2, json!(null), None, 4);
    store.bookings.insert(&orphan).await.unwrap();
    store.bookings.insert(&empty).await.unwrap();

    let report = backfill(&store, 1).run().await.unwrap();

    assert_eq!(report.bookings_scanned, 2);
    assert_eq!(report.bookings_updated, 0);
    assert_eq!(report.bookings_unresolved, 2);
    assert!(!report.is_clean());

    let stored = store.bookings.find_all().await.unwrap();
    assert_eq!(stored, vec![orphan, empty]);
}

/// Running twice leaves the store exactly as one run did
#[tokio::test]
async fn test_rerun_is_idempotent() {
    let store = setup_store().await;
    for (i, id) in ["A", "B", "C"].iter().enumerate() {
        store
            .farmers
            .insert(&Farmer::new(*id, i as i64, format!("farmer {}", id), None).unwrap())
            .await
            .unwrap();
    }
    store
        .bookings
        .insert(&Booking::new("B1", 1, json!({"$oid": "C"}), None, 1))
        .await
        .unwrap();

    backfill(&store, 1_000).run().await.unwrap();
    let farmers_once = store.farmers.find_all().await.unwrap();
    let bookings_once = store.bookings.find_all().await.unwrap();

    let second = backfill(&store, 1_000).run().await.unwrap();

    assert_eq!(second.registrations_assigned, 0);
    assert_eq!(second.already_registered, 3);
    assert_eq!(second.next_counter, 4);
    assert!(second.index.is_created());
    assert_eq!(store.farmers.find_all().await.unwrap(), farmers_once);
    assert_eq!(store.bookings.find_all().await.unwrap(), bookings_once);

    let mut numbers: Vec<String> = farmers_once
        .into_iter()
        .filter_map(|f| f.registration_no)
        .collect();
    numbers.sort();
    assert_eq!(numbers, vec!["REG-000001", "REG-000002", "REG-000003"]);
}
