//! Test harness for HTTP integration testing.
//!
//! Each test gets its own temp directory holding the site file, so tests
//! never share state and can run in parallel.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use cardsite::{MemoryStorage, SiteStorage, SiteValidator};
use server_core::server::{build_app, load_validator, AppState};
use tempfile::TempDir;
use test_context::AsyncTestContext;

use super::HttpClient;

/// Test harness that owns a temp-dir-backed app.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let (status, body) = ctx.http().get("/sites").await;
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Site file the app reads and writes - use this for seeding raw records.
    pub sites_file: PathBuf,
    pub state: AppState,
    app: Router,
    _dir: TempDir,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Temp directory is removed on drop
    }
}

impl TestHarness {
    /// Creates a harness backed by a JSON file in a fresh temp directory.
    pub fn new() -> Result<Self> {
        init_tracing();

        let dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let sites_file = dir.path().join("data").join("sites.json");
        let config = server_core::Config {
            port: 0,
            sites_file: sites_file.clone(),
            schema_dir: None,
        };
        let state = AppState::from_config(&config).context("Failed to build app state")?;

        Ok(Self {
            sites_file,
            app: build_app(state.clone()),
            state,
            _dir: dir,
        })
    }

    /// Creates a harness over an in-memory backend the caller keeps a handle to.
    pub fn with_memory(storage: Arc<MemoryStorage>) -> Result<Self> {
        init_tracing();

        let dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let validator: Arc<SiteValidator> = Arc::new(load_validator(None)?);
        let storage: Arc<dyn SiteStorage> = storage;
        let state = AppState::new(storage, validator);

        Ok(Self {
            sites_file: dir.path().join("unused.json"),
            app: build_app(state.clone()),
            state,
            _dir: dir,
        })
    }

    /// Write raw records straight to the site file, bypassing the store.
    pub fn seed_raw(&self, records: &serde_json::Value) -> Result<()> {
        if let Some(parent) = self.sites_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.sites_file, serde_json::to_vec_pretty(records)?)?;
        Ok(())
    }

    /// Raw records currently in the site file.
    pub fn read_raw(&self) -> Result<serde_json::Value> {
        let bytes = std::fs::read(&self.sites_file)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Get an HTTP client for this harness.
    pub fn http(&self) -> HttpClient {
        HttpClient::new(self.app.clone())
    }
}

fn init_tracing() {
    // Uses try_init() to avoid panicking if already initialized.
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
