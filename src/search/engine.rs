use super::types::{NearbyOutcome, RankedResult, SearchError, SearchQuery};
use crate::drivers::types::{Driver, TaxiType};
use crate::geo::{GeoPoint, distance_km, is_valid_location, validate_range};
use crate::storage::{DriverStore, ReadContext, StoreError};

/// Finds candidates within `query.radius_km` of `query.center`, nearest first.
///
/// Performs a single candidate read, then filters, scores and sorts in memory.
/// Store failures abort the query. Candidates that fail to decode are skipped
/// and counted in the outcome; reporting them is left to the caller.
pub async fn find_nearby(
    store: &dyn DriverStore,
    ctx: &ReadContext,
    query: &SearchQuery,
) -> Result<NearbyOutcome, SearchError> {
    validate_query(query)?;

    let fetch = store.fetch_candidates(ctx, query.category);
    let documents = match ctx.remaining() {
        Some(remaining) => tokio::time::timeout(remaining, fetch)
            .await
            .map_err(|_| StoreError::DeadlineExceeded)??,
        None => fetch.await?,
    };

    let total = documents.len();
    let mut skipped_malformed = 0usize;
    let drivers: Vec<Driver> = documents
        .into_iter()
        .filter_map(|doc| match doc.decode() {
            Ok(driver) => Some(driver),
            Err(_) => {
                skipped_malformed += 1;
                None
            }
        })
        .collect();

    let results = rank_candidates(query.center, query.category, query.radius_km, drivers);
    tracing::debug!(
        "Nearby search ranked {} of {} candidates (radius {} km)",
        results.len(),
        total,
        query.radius_km
    );

    Ok(NearbyOutcome {
        results,
        skipped_malformed,
    })
}

/// The in-memory part of the search: filter, score and sort.
///
/// The category filter is applied here even when the store already narrowed
/// the candidates. Sorting is stable, so equal distances keep candidate order.
pub fn rank_candidates(
    center: GeoPoint,
    category: Option<TaxiType>,
    radius_km: f64,
    candidates: impl IntoIterator<Item = Driver>,
) -> Vec<RankedResult> {
    let mut results: Vec<RankedResult> = candidates
        .into_iter()
        .filter(|driver| category.is_none_or(|category| driver.taxi_type == category))
        .filter(|driver| is_valid_location(driver.location))
        .filter_map(|driver| {
            let distance = distance_km(center, driver.location);
            (distance <= radius_km).then(|| RankedResult::from_driver(driver, distance))
        })
        .collect();

    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    results
}

fn validate_query(query: &SearchQuery) -> Result<(), SearchError> {
    validate_range(query.center).map_err(|e| SearchError::InvalidArgument(e.to_string()))?;

    if !query.radius_km.is_finite() || query.radius_km < 0.0 {
        return Err(SearchError::InvalidArgument(format!(
            "radius must be a non-negative number of kilometers, got {}",
            query.radius_km
        )));
    }
    Ok(())
}
