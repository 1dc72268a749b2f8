//! Startup seeding of the in-memory store from a JSON file.

use super::memory::InMemoryDriverStore;

use anyhow::{Context, Result};
use std::path::Path;

/// Reads a JSON array of driver documents.
pub fn load_seed_file(path: &Path) -> Result<Vec<serde_json::Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let documents: Vec<serde_json::Value> = serde_json::from_str(&raw)
        .with_context(|| format!("Seed file {} is not a JSON array", path.display()))?;
    Ok(documents)
}

/// Inserts documents verbatim and returns how many were stored.
///
/// An `id` string field is used as the document key and removed from the body;
/// other documents get a generated id. A non-string `id` stays in the body.
/// Bodies are not validated.
pub fn seed_store(store: &InMemoryDriverStore, documents: Vec<serde_json::Value>) -> usize {
    let mut count = 0;
    for mut document in documents {
        let id = match document.get("id") {
            Some(serde_json::Value::String(id)) => Some(id.clone()),
            Some(other) => {
                tracing::warn!("Seed document has non-string id {}, generating one", other);
                None
            }
            None => None,
        };
        if id.is_some() {
            if let Some(object) = document.as_object_mut() {
                object.remove("id");
            }
        }
        store.insert_document(id, document);
        count += 1;
    }
    count
}
