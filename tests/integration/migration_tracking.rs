use crate::helpers::harness::with_test_db;
use tidemark::config::types::TrackingTable;
use tidemark::migration::Direction;
use tidemark::migration_tracking::{
    applied_versions, ensure_tracking_table_exists, format_tracking_table_name, record_version,
};

#[tokio::test]
async fn test_record_and_remove_versions() {
    with_test_db(async |db| {
        let table = TrackingTable::default();
        let table_name = format_tracking_table_name(&table).unwrap();
        let mut conn = db.pool().acquire().await.unwrap();

        ensure_tracking_table_exists(&mut conn, &table).await.unwrap();
        // Creating it twice is fine
        ensure_tracking_table_exists(&mut conn, &table).await.unwrap();

        record_version(&mut conn, &table_name, "1_init", Direction::Up)
            .await
            .unwrap();
        record_version(&mut conn, &table_name, "20_users", Direction::Up)
            .await
            .unwrap();

        let mut versions = applied_versions(&mut conn, &table_name).await.unwrap();
        versions.sort();
        assert_eq!(versions, vec!["1_init", "20_users"]);

        record_version(&mut conn, &table_name, "1_init", Direction::Down)
            .await
            .unwrap();

        assert_eq!(
            applied_versions(&mut conn, &table_name).await.unwrap(),
            vec!["20_users"]
        );
    })
    .await;
}

#[tokio::test]
async fn test_recording_a_version_twice_fails() {
    with_test_db(async |db| {
        let table = TrackingTable::default();
        let table_name = format_tracking_table_name(&table).unwrap();
        let mut conn = db.pool().acquire().await.unwrap();
        ensure_tracking_table_exists(&mut conn, &table).await.unwrap();

        record_version(&mut conn, &table_name, "1_init", Direction::Up)
            .await
            .unwrap();
        let err = record_version(&mut conn, &table_name, "1_init", Direction::Up)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to record version 1_init (up)"));
    })
    .await;
}
