//! Driver Records Module
//!
//! CRUD over taxi driver records, exposed under `/api/v1/drivers`.
//!
//! ## Core Concepts
//! - **Service**: `DriverService` validates and normalizes input before anything is
//!   written. Plates are stored upper-cased; ids are UUIDs assigned on creation.
//! - **Categories**: `TaxiType` is a closed set (`sari`, `turkuaz`, `siyah`).
//! - **Errors**: Every failure is returned as `{"error": {"code", "message"}}`.
//!   Validation problems are 400, unknown drivers 404 and store failures 500
//!   with a generic message.
//!
//! ## Submodules
//! - **`error`**: Domain errors and their HTTP mapping.
//! - **`handlers`**: Axum handlers for create, read, update and list.
//! - **`protocol`**: Endpoint paths and request/response DTOs.
//! - **`service`**: Business rules.
//! - **`types`**: The `Driver` record and `TaxiType`.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod service;
pub mod types;

pub use error::{ApiError, DriverError};
pub use service::{DriverService, ServiceSettings};
pub use types::{Driver, TaxiType};
