//! TaxiHub Gateway Library
//!
//! The public edge in front of the driver service.
//!
//! ## Modules
//! - **`client`**: `DriverServiceClient`, the HTTP hop to the driver service.
//! - **`config`**: Environment-driven settings.
//! - **`handlers`**: Public `/drivers` endpoints. Answers are relayed verbatim;
//!   an unreachable driver service yields 502.
//! - **`rate_limit`**: Per-client token buckets applied to every request.
//! - **`routes`**: Router assembly.

pub mod client;
pub mod config;
pub mod handlers;
pub mod rate_limit;
pub mod routes;
