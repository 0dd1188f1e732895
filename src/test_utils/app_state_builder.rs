//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates a minimal `AppState` backed by an in-memory
//! repo, a failing repo, or a real file store at a caller-chosen path.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::HeaderValue;

use crate::{
    adapters::{http::app_state::AppState, persistence::JsonFileWaitlistStore},
    domain::entities::waitlist_entry::WaitlistEntry,
    infra::config::AppConfig,
    test_utils::{FailingWaitlistRepo, InMemoryWaitlistRepo},
    use_cases::waitlist::{WaitlistRepo, WaitlistUseCases},
};

/// Builder for creating `AppState` with test dependencies.
///
/// # Example
///
/// ```ignore
/// let (app_state, repo) = TestAppStateBuilder::new()
///     .with_entry(create_test_entry(|e| e.email = "a@x.com".into()))
///     .build_with_repo();
/// ```
#[derive(Default)]
pub struct TestAppStateBuilder {
    entries: Vec<WaitlistEntry>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing entry (in-memory builds only).
    pub fn with_entry(mut self, entry: WaitlistEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn build(self) -> AppState {
        self.build_with_repo().0
    }

    /// Build the state and hand back the in-memory repo for assertions.
    pub fn build_with_repo(self) -> (AppState, Arc<InMemoryWaitlistRepo>) {
        let repo = Arc::new(InMemoryWaitlistRepo::with_entries(self.entries));
        let state = app_state(repo.clone(), PathBuf::from("unused.json"));
        (state, repo)
    }

    /// Every repo call fails with a storage error.
    pub fn build_failing(self) -> AppState {
        app_state(Arc::new(FailingWaitlistRepo), PathBuf::from("unused.json"))
    }

    /// Back the state with a real JSON file store at `path`.
    pub fn build_with_file_store(self, path: PathBuf) -> AppState {
        let store = Arc::new(JsonFileWaitlistStore::new(path.clone()));
        app_state(store, path)
    }
}

fn app_state(repo: Arc<dyn WaitlistRepo>, waitlist_path: PathBuf) -> AppState {
    let config = AppConfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        waitlist_path,
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        log_file: PathBuf::from("app.log"),
    };

    AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(WaitlistUseCases::new(repo)),
    }
}
