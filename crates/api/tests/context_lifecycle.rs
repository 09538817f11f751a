//! Integration tests for AppContext construction
//!
//! Tests verify that the context can be wired from configuration and that
//! invalid configuration is rejected before any database is touched.

mod support;

use schedulr_api::AppContext;
use schedulr_domain::{Config, DatabaseConfig, SchedulrError};
use tempfile::TempDir;

#[tokio::test(flavor = "multi_thread")]
async fn test_context_creation_succeeds() {
    let temp_dir = TempDir::new().expect("failed to create temporary directory");
    let db_path = temp_dir.path().join("nested").join("schedulr.db");

    let config = Config {
        database: DatabaseConfig { path: db_path.to_string_lossy().to_string(), pool_size: 2 },
        ..Config::default()
    };

    let ctx = AppContext::new_with_config(config).await.expect("context should build");
    assert!(db_path.exists(), "database file should be created with its parent directory");
    assert_eq!(ctx.config.scheduling.max_range_days, 7);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().expect("failed to create temporary directory");
    let db_path = temp_dir.path().join("never.db");

    let mut config = Config {
        database: DatabaseConfig { path: db_path.to_string_lossy().to_string(), pool_size: 2 },
        ..Config::default()
    };
    config.scheduling.default_timezone = "Mars/Olympus_Mons".into();

    let err = AppContext::new_with_config(config).await.err().expect("config must be rejected");
    assert!(matches!(err, SchedulrError::Config(_)));
    assert!(!db_path.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_context_can_be_rebuilt_on_same_database() {
    let first = support::setup_test_context().await;
    let path = first.ctx.db.path().to_path_buf();

    let config = Config {
        database: DatabaseConfig { path: path.to_string_lossy().to_string(), pool_size: 2 },
        ..Config::default()
    };
    // Migrations are idempotent.
    AppContext::new_with_config(config).await.expect("second context should build");
}
