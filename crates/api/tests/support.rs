#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use schedulr_api::{AppContext, Hooks};
use schedulr_core::FixedClock;
use schedulr_domain::{Config, DatabaseConfig};
use tempfile::TempDir;

/// Sunday 2030-01-06 12:00 UTC; the following Monday is 2030-01-07.
pub fn default_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 6, 12, 0, 0).unwrap()
}

/// Shared context for command tests against a throwaway database.
pub struct TestContext {
    pub ctx: AppContext,
    pub clock: Arc<FixedClock>,
    /// Keep temporary directory alive for the lifetime of the context.
    _temp_dir: TempDir,
}

/// Create a context on a fresh database with the clock fixed at [`default_now`].
pub async fn setup_test_context() -> TestContext {
    let temp_dir = TempDir::new().expect("failed to create temporary database directory");
    let db_path = temp_dir.path().join("schedulr.db");

    let config = Config {
        database: DatabaseConfig { path: db_path.to_string_lossy().to_string(), pool_size: 4 },
        ..Config::default()
    };

    let clock = Arc::new(FixedClock::new(default_now()));
    let ctx = AppContext::assemble(config, clock.clone(), Hooks::default())
        .await
        .expect("failed to assemble application context");

    TestContext { ctx, clock, _temp_dir: temp_dir }
}
