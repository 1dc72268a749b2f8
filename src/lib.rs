//! TaxiHub Driver Service Library
//!
//! This library crate defines the modules behind the driver service binary
//! (`main.rs`): driver records plus nearby-driver search.
//!
//! ## Architecture Modules
//! - **`geo`**: Pure geographic primitives. Haversine distance and the coordinate
//!   validator that decides whether a stored position can be ranked.
//! - **`search`**: The nearby query executor. One candidate read per query, then
//!   in-memory filtering, scoring and sorting by distance.
//! - **`storage`**: The `DriverStore` contract and its in-memory document store,
//!   including startup seeding from a JSON file.
//! - **`drivers`**: Driver records: validation, CRUD and the HTTP error envelope.
//! - **`config`**: Environment-driven settings.
//! - **`routes`**: Assembles the HTTP router.

pub mod config;
pub mod drivers;
pub mod geo;
pub mod routes;
pub mod search;
pub mod storage;

#[cfg(test)]
mod testing;
