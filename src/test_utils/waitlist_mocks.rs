//! In-memory mock implementations of `WaitlistRepo`.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::{
    app_error::{AppError, AppResult},
    application::validators::WaitlistEmail,
    domain::entities::waitlist_entry::WaitlistEntry,
    use_cases::waitlist::WaitlistRepo,
};

/// In-memory implementation of WaitlistRepo for testing.
#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    pub entries: Mutex<Vec<WaitlistEntry>>,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial entries for testing.
    pub fn with_entries(entries: Vec<WaitlistEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Get all entries (for test assertions).
    pub fn get_all(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn add(&self, email: &WaitlistEmail) -> AppResult<usize> {
        let mut entries = self.entries.lock().unwrap();

        if entries.iter().any(|e| e.email == email.as_ref()) {
            return Err(AppError::AlreadyRegistered);
        }

        let last_timestamp = entries.last().map(|e| e.timestamp);
        entries.push(WaitlistEntry::new(email.to_string(), last_timestamp));
        Ok(entries.len())
    }

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.entries.lock().unwrap().len())
    }
}

/// Repo whose every operation fails like an unreadable file would.
#[derive(Default)]
pub struct FailingWaitlistRepo;

#[async_trait]
impl WaitlistRepo for FailingWaitlistRepo {
    async fn add(&self, _email: &WaitlistEmail) -> AppResult<usize> {
        Err(AppError::Storage("disk unavailable".into()))
    }

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        Err(AppError::Storage("disk unavailable".into()))
    }

    async fn count(&self) -> AppResult<usize> {
        Err(AppError::Storage("disk unavailable".into()))
    }
}
