use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::validators::WaitlistEmail,
    domain::entities::waitlist_entry::WaitlistEntry,
};

/// Durable, deduplicated set of signups.
///
/// Implementations must make `add` atomic with respect to other `add` calls:
/// the duplicate check and the write happen under one serialization point.
#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    /// Appends a new entry for `email`. Returns the total entry count after the
    /// append, or `AppError::AlreadyRegistered` if the email is already present.
    async fn add(&self, email: &WaitlistEmail) -> AppResult<usize>;

    /// All entries in insertion order. Empty if the store was never written.
    async fn list(&self) -> AppResult<Vec<WaitlistEntry>>;

    /// Same value as `list().len()`.
    async fn count(&self) -> AppResult<usize>;
}

/// What `GET /waitlist` returns: the count, plus the entries only when the
/// full listing was requested.
#[derive(Debug, Clone)]
pub struct WaitlistSnapshot {
    pub entries: Option<Vec<WaitlistEntry>>,
    pub count: usize,
}

#[derive(Clone)]
pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
}

impl WaitlistUseCases {
    pub fn new(repo: Arc<dyn WaitlistRepo>) -> Self {
        Self { repo }
    }

    /// Registers `email` and returns the new total member count.
    #[instrument(skip(self))]
    pub async fn join(&self, email: &str) -> AppResult<usize> {
        let email = WaitlistEmail::parse(email)?;

        match self.repo.add(&email).await {
            Ok(total) => {
                tracing::info!(total_members = total, "Waitlist signup stored");
                Ok(total)
            }
            Err(AppError::AlreadyRegistered) => {
                tracing::info!("Duplicate waitlist signup rejected");
                Err(AppError::AlreadyRegistered)
            }
            Err(err) => Err(err),
        }
    }

    /// Reads the waitlist. Raw emails are only loaded when `full` is set.
    #[instrument(skip(self))]
    pub async fn snapshot(&self, full: bool) -> AppResult<WaitlistSnapshot> {
        if full {
            let entries = self.repo.list().await?;
            let count = entries.len();
            return Ok(WaitlistSnapshot {
                entries: Some(entries),
                count,
            });
        }

        Ok(WaitlistSnapshot {
            entries: None,
            count: self.repo.count().await?,
        })
    }
}
