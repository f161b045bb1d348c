//! Integration tests for persistence layer using in-memory and file-backed
//! SQLite databases
//!
//! These tests verify the measurement store through the port used by the
//! application layer.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use application::ports::{BulkInsertOutcome, MeasurementStore};
use chrono::{Duration, NaiveDate};
use domain::{DateRange, MeasurementId, NewMeasurement};
use infrastructure::{DatabaseConfig, SqliteMeasurementStore, create_pool};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn create_test_store() -> SqliteMeasurementStore {
    let pool = create_pool(&DatabaseConfig::in_memory()).expect("Failed to create pool");
    SqliteMeasurementStore::new(Arc::new(pool))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

async fn insert(
    store: &SqliteMeasurementStore,
    location: &str,
    rows: &[(NaiveDate, Option<f64>)],
) -> Vec<MeasurementId> {
    let batch: Vec<NewMeasurement> = rows
        .iter()
        .map(|(d, t)| NewMeasurement::new(*d, *t))
        .collect();
    store
        .insert_batch(location, &batch)
        .await
        .into_result()
        .expect("insert should succeed")
}

// ============================================================================
// Measurement Store Tests
// ============================================================================

mod measurement_store_tests {
    use super::*;

    #[tokio::test]
    async fn test_bulk_insert_stores_exact_rows_in_order() {
        let store = create_test_store();
        let rows = [
            (date(2024, 1, 1), Some(1.0)),
            (date(2024, 1, 2), None),
            (date(2024, 1, 3), Some(-2.5)),
        ];

        let ids = insert(&store, "Berlin", &rows).await;
        assert_eq!(ids.len(), 3);

        let stored = store
            .list_in_range("Berlin", DateRange::new(date(2024, 1, 1), date(2024, 1, 3)))
            .await
            .unwrap();
        assert_eq!(stored.len(), 3);
        for ((m, (d, t)), id) in stored.iter().zip(rows.iter()).zip(ids.iter()) {
            assert_eq!(m.location, "Berlin");
            assert_eq!(m.measurement_date, *d);
            assert_eq!(m.temp_c, *t);
            assert_eq!(m.id, *id);
        }
    }

    #[tokio::test]
    async fn test_location_is_stored_verbatim() {
        let store = create_test_store();
        insert(&store, "  New York ", &[(date(2024, 1, 1), None)]).await;

        let all = store.list_all().await.unwrap();
        assert_eq!(all[0].location, "  New York ");

        let trimmed = store
            .list_in_range("New York", DateRange::new(date(2024, 1, 1), date(2024, 1, 1)))
            .await
            .unwrap();
        assert!(trimmed.is_empty());
    }

    #[tokio::test]
    async fn test_identical_batches_produce_distinct_rows() {
        let store = create_test_store();
        let rows = [(date(2024, 1, 1), Some(3.0))];

        let first = insert(&store, "Oslo", &rows).await;
        let second = insert(&store, "Oslo", &rows).await;

        assert_ne!(first[0], second[0]);
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|m| m.temp_c == Some(3.0)));
    }

    #[tokio::test]
    async fn test_deleted_id_is_never_reused() {
        let store = create_test_store();
        let ids = insert(&store, "Rome", &[(date(2024, 1, 1), None)]).await;
        assert!(store.delete(ids[0]).await.unwrap());

        let next = insert(&store, "Rome", &[(date(2024, 1, 1), None)]).await;
        assert!(next[0] > ids[0]);
    }

    #[tokio::test]
    async fn test_delete_missing_changes_nothing() {
        let store = create_test_store();
        insert(&store, "Rome", &[(date(2024, 1, 1), None), (date(2024, 1, 2), None)]).await;
        let before = store.list_all().await.unwrap();

        assert!(!store.delete(MeasurementId::new(424_242)).await.unwrap());

        let after = store.list_all().await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_count_tracks_inserts_and_deletes() {
        let store = create_test_store();
        assert_eq!(store.count().await.unwrap(), 0);

        let ids = insert(&store, "Lima", &[(date(2024, 1, 1), None), (date(2024, 1, 2), None)]).await;
        assert_eq!(store.count().await.unwrap(), 2);

        store.delete(ids[1]).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_file_backed_store_persists_across_pools() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("weatherlog.db").to_string_lossy().into_owned(),
            max_connections: 4,
            run_migrations: true,
        };

        {
            let store = SqliteMeasurementStore::new(Arc::new(create_pool(&config).unwrap()));
            insert(&store, "Kyiv", &[(date(2024, 5, 1), Some(18.0))]).await;
        }

        let store = SqliteMeasurementStore::new(Arc::new(create_pool(&config).unwrap()));
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].location, "Kyiv");
    }

    #[tokio::test]
    async fn test_concurrent_inserts_all_land() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("concurrent.db").to_string_lossy().into_owned(),
            max_connections: 4,
            run_migrations: true,
        };
        let store = SqliteMeasurementStore::new(Arc::new(create_pool(&config).unwrap()));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let location = format!("City{i}");
                let outcome = store
                    .insert_batch(&location, &[NewMeasurement::new(date(2024, 1, 1), None)])
                    .await;
                matches!(outcome, BulkInsertOutcome::Committed { .. })
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        assert_eq!(store.count().await.unwrap(), 8);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn day_offset() -> impl Strategy<Value = i64> {
    0i64..60
}

fn base() -> NaiveDate {
    date(2024, 1, 1)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Filtered reads return exactly the rows with the location and an
    /// in-range date, oldest first
    #[test]
    fn filtered_read_matches_in_memory_filter(
        rows in prop::collection::vec((prop::sample::select(vec!["A", "B"]), day_offset()), 0..25),
        start in day_offset(),
        end in day_offset(),
    ) {
        tokio_test::block_on(async {
            let store = create_test_store();
            for (location, offset) in &rows {
                insert(&store, location, &[(base() + Duration::days(*offset), None)]).await;
            }

            let range = DateRange::new(base() + Duration::days(start), base() + Duration::days(end));
            let result = store.list_in_range("A", range).await.unwrap();

            let expected = rows
                .iter()
                .filter(|(loc, off)| *loc == "A" && range.contains(base() + Duration::days(*off)))
                .count();
            prop_assert_eq!(result.len(), expected);
            prop_assert!(result.iter().all(|m| m.location == "A" && range.contains(m.measurement_date)));
            prop_assert!(result.windows(2).all(|w| w[0].measurement_date <= w[1].measurement_date));
            Ok(())
        })?;
    }

    /// The unfiltered read is sorted by date descending, then location ascending
    #[test]
    fn unfiltered_read_is_sorted(
        rows in prop::collection::vec((prop::sample::select(vec!["A", "B", "C"]), day_offset()), 0..25),
    ) {
        tokio_test::block_on(async {
            let store = create_test_store();
            for (location, offset) in &rows {
                insert(&store, location, &[(base() + Duration::days(*offset), None)]).await;
            }

            let all = store.list_all().await.unwrap();
            prop_assert_eq!(all.len(), rows.len());
            let is_sorted = all.windows(2).all(|w| {
                w[0].measurement_date > w[1].measurement_date
                    || (w[0].measurement_date == w[1].measurement_date && w[0].location <= w[1].location)
            });
            prop_assert!(is_sorted);
            Ok(())
        })?;
    }
}
