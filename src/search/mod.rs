//! Nearby Search Module
//!
//! Answers "which drivers are close to this point?" over the driver store.
//!
//! ## Core Concepts
//! - **Query**: A center point, an optional taxi category and a radius in kilometers.
//! - **Single Read**: Each query performs exactly one candidate read. Filtering,
//!   scoring and sorting happen in memory.
//! - **Ranking**: Results are ordered by great-circle distance, nearest first.
//!   Equal distances keep the order in which the store returned the candidates.
//! - **Data Quality**: Records that cannot be decoded, or that still carry the
//!   `(0, 0)` "no location" sentinel, are left out of the results.
//!
//! ## Submodules
//! - **`engine`**: The query executor and the pure ranking step.
//! - **`handlers`**: The HTTP handler for `GET /api/v1/drivers/nearby`.
//! - **`types`**: Query, result and error types.

pub mod engine;
pub mod handlers;
pub mod types;

pub use engine::{find_nearby, rank_candidates};
pub use types::{DEFAULT_RADIUS_KM, NearbyOutcome, RankedResult, SearchError, SearchQuery};
