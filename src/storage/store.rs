//! Driver Store Contract
//!
//! The read/write capability the driver service and the nearby search need from
//! a document store. Implementations own connection handling and consistency;
//! callers thread a [`ReadContext`] through every call to bound it in time.

use crate::drivers::types::{Driver, TaxiType};

use async_trait::async_trait;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store deadline exceeded")]
    DeadlineExceeded,
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Per-call context passed to every store operation.
///
/// Carries an optional deadline. Stores must fail fast with
/// [`StoreError::DeadlineExceeded`] once it has passed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadContext {
    deadline: Option<Instant>,
}

impl ReadContext {
    /// No deadline.
    pub fn background() -> Self {
        Self { deadline: None }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline; `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn check(&self) -> Result<(), StoreError> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(StoreError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

/// A candidate record exactly as the store holds it.
///
/// `taxi_type` is the raw category tag used for store-side narrowing. The body
/// is schemaless and may fail to decode into a [`Driver`].
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub taxi_type: Option<String>,
    pub body: serde_json::Value,
}

impl StoredDocument {
    pub fn decode(&self) -> Result<Driver, serde_json::Error> {
        let mut driver: Driver = serde_json::from_value(self.body.clone())?;
        driver.id = self.id.clone();
        Ok(driver)
    }
}

#[derive(Debug, Clone)]
pub struct DriverPage {
    pub drivers: Vec<Driver>,
    pub total_count: u64,
}

#[async_trait]
pub trait DriverStore: Send + Sync {
    /// Every stored candidate, narrowed to `category` when given.
    ///
    /// The sequence reflects one collection state: no duplicates, in insertion
    /// order, so identical calls against an unchanged store return identical
    /// sequences.
    async fn fetch_candidates(
        &self,
        ctx: &ReadContext,
        category: Option<TaxiType>,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    async fn insert(&self, ctx: &ReadContext, driver: Driver) -> Result<Driver, StoreError>;

    /// Replaces an existing record. [`StoreError::NotFound`] when `driver.id` is unknown.
    async fn update(&self, ctx: &ReadContext, driver: Driver) -> Result<(), StoreError>;

    async fn get(&self, ctx: &ReadContext, id: &str) -> Result<Option<Driver>, StoreError>;

    /// Newest first. `page` is 1-based.
    async fn list(
        &self,
        ctx: &ReadContext,
        page: usize,
        page_size: usize,
    ) -> Result<DriverPage, StoreError>;
}
