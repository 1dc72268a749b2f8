use super::store::{DriverPage, DriverStore, ReadContext, StoreError, StoredDocument};
use crate::drivers::types::{Driver, TaxiType};

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

struct DocumentEntry {
    seq: u64,
    taxi_type: Option<String>,
    body: serde_json::Value,
}

/// In-process document store for driver records.
///
/// Documents are kept as schemaless JSON, the way a document database holds
/// them, so records written by other tools may not decode into a [`Driver`].
pub struct InMemoryDriverStore {
    documents: Arc<DashMap<String, DocumentEntry>>,
    next_seq: AtomicU64,
    available: AtomicBool,
}

impl InMemoryDriverStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
            next_seq: AtomicU64::new(0),
            available: AtomicBool::new(true),
        }
    }

    /// Stores a raw document verbatim. Generates an id when none is given.
    pub fn insert_document(&self, id: Option<String>, body: serde_json::Value) -> String {
        let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let taxi_type = body
            .get("taxiType")
            .and_then(|value| value.as_str())
            .map(str::to_string);

        self.documents.insert(
            id.clone(),
            DocumentEntry {
                seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
                taxi_type,
                body,
            },
        );
        id
    }

    /// Simulates an outage: while unavailable every operation fails.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn ensure_ready(&self, ctx: &ReadContext) -> Result<(), StoreError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store is offline".to_string(),
            ));
        }
        ctx.check()
    }
}

impl Default for InMemoryDriverStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriverStore for InMemoryDriverStore {
    async fn fetch_candidates(
        &self,
        ctx: &ReadContext,
        category: Option<TaxiType>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        self.ensure_ready(ctx)?;

        let mut candidates: Vec<(u64, StoredDocument)> = self
            .documents
            .iter()
            .filter(|entry| match category {
                Some(category) => entry.value().taxi_type.as_deref() == Some(category.as_str()),
                None => true,
            })
            .map(|entry| {
                (
                    entry.value().seq,
                    StoredDocument {
                        id: entry.key().clone(),
                        taxi_type: entry.value().taxi_type.clone(),
                        body: entry.value().body.clone(),
                    },
                )
            })
            .collect();

        candidates.sort_by_key(|(seq, _)| *seq);
        tracing::debug!("Fetched {} candidate documents", candidates.len());

        Ok(candidates.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn insert(&self, ctx: &ReadContext, driver: Driver) -> Result<Driver, StoreError> {
        self.ensure_ready(ctx)?;

        let body = serde_json::to_value(&driver)?;
        self.insert_document(Some(driver.id.clone()), body);
        Ok(driver)
    }

    async fn update(&self, ctx: &ReadContext, driver: Driver) -> Result<(), StoreError> {
        self.ensure_ready(ctx)?;

        let body = serde_json::to_value(&driver)?;
        match self.documents.get_mut(&driver.id) {
            Some(mut entry) => {
                entry.taxi_type = Some(driver.taxi_type.as_str().to_string());
                entry.body = body;
                Ok(())
            }
            None => Err(StoreError::NotFound(driver.id)),
        }
    }

    async fn get(&self, ctx: &ReadContext, id: &str) -> Result<Option<Driver>, StoreError> {
        self.ensure_ready(ctx)?;

        let Some(entry) = self.documents.get(id) else {
            return Ok(None);
        };
        let document = StoredDocument {
            id: id.to_string(),
            taxi_type: entry.taxi_type.clone(),
            body: entry.body.clone(),
        };
        drop(entry);

        Ok(Some(document.decode()?))
    }

    async fn list(
        &self,
        ctx: &ReadContext,
        page: usize,
        page_size: usize,
    ) -> Result<DriverPage, StoreError> {
        self.ensure_ready(ctx)?;

        let total_count = self.documents.len() as u64;
        let mut drivers: Vec<(u64, Driver)> = Vec::with_capacity(self.documents.len());
        for entry in self.documents.iter() {
            let document = StoredDocument {
                id: entry.key().clone(),
                taxi_type: entry.value().taxi_type.clone(),
                body: entry.value().body.clone(),
            };
            match document.decode() {
                Ok(driver) => drivers.push((entry.value().seq, driver)),
                Err(e) => {
                    tracing::warn!("Skipping malformed driver document {}: {}", document.id, e)
                }
            }
        }

        drivers.sort_by(|a, b| b.1.created_at.cmp(&a.1.created_at).then(a.0.cmp(&b.0)));

        let skip = page.saturating_sub(1).saturating_mul(page_size);
        let drivers = drivers
            .into_iter()
            .skip(skip)
            .take(page_size)
            .map(|(_, driver)| driver)
            .collect();

        Ok(DriverPage {
            drivers,
            total_count,
        })
    }
}
