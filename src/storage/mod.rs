//! Driver Storage Module
//!
//! Implements the document store behind the driver service.
//!
//! ## Core Concepts
//! - **Contract**: `DriverStore` is the only storage capability the rest of the crate sees.
//!   Every call takes a `ReadContext` carrying an optional deadline.
//! - **Documents**: Records are held as schemaless JSON. Decoding into a `Driver`
//!   happens on read, so a malformed record affects only itself.
//! - **Ordering**: Candidate reads return documents in insertion order, which keeps
//!   tie ordering in search results reproducible.
//! - **Seeding**: A JSON file can pre-populate the in-memory store at startup.

pub mod memory;
pub mod seed;
pub mod store;

pub use memory::InMemoryDriverStore;
pub use store::{DriverPage, DriverStore, ReadContext, StoreError, StoredDocument};
