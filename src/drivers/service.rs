//! Driver Service
//!
//! Business rules for driver records: input validation, normalization,
//! timestamps, pagination bounds, and the entry point of nearby search.

use super::error::DriverError;
use super::protocol::{CreateDriverRequest, ListDriversResponse, UpdateDriverRequest};
use super::types::{Driver, TaxiType};
use crate::geo::{GeoPoint, validate_range};
use crate::search::{self, DEFAULT_RADIUS_KM, RankedResult, SearchQuery};
use crate::storage::{DriverStore, ReadContext, StoreError};

use chrono::Utc;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

/// Turkish plates, simplified: 2-3 digits, 1-3 letters, 1-4 digits.
static PLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2,3}[A-Z]{1,3}[0-9]{1,4}$").expect("plate pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceSettings {
    /// Radius of nearby search.
    pub radius_km: f64,
    /// Bound on each store call; `None` waits indefinitely.
    pub store_timeout: Option<Duration>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            store_timeout: Some(Duration::from_secs(5)),
        }
    }
}

pub struct DriverService {
    store: Arc<dyn DriverStore>,
    settings: ServiceSettings,
}

impl DriverService {
    pub fn new(store: Arc<dyn DriverStore>, settings: ServiceSettings) -> Arc<Self> {
        Arc::new(Self { store, settings })
    }

    pub fn settings(&self) -> ServiceSettings {
        self.settings
    }

    fn read_context(&self) -> ReadContext {
        match self.settings.store_timeout {
            Some(timeout) => ReadContext::with_timeout(timeout),
            None => ReadContext::background(),
        }
    }

    pub async fn create_driver(&self, req: CreateDriverRequest) -> Result<Driver, DriverError> {
        require_non_empty(&req.first_name, "firstName")?;
        require_non_empty(&req.last_name, "lastName")?;
        let plate = validate_plate(&req.plate)?;
        let taxi_type = parse_taxi_type(&req.taxi_type)?;
        require_non_empty(&req.car_brand, "carBrand")?;
        require_non_empty(&req.car_model, "carModel")?;
        let location = GeoPoint::new(req.lat, req.lon);
        validate_location(location)?;

        let now = Utc::now();
        let driver = Driver {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: req.first_name,
            last_name: req.last_name,
            plate,
            taxi_type,
            car_brand: req.car_brand,
            car_model: req.car_model,
            location,
            created_at: now,
            updated_at: now,
        };

        let driver = self.store.insert(&self.read_context(), driver).await?;
        tracing::info!("Driver created: {} (plate {})", driver.id, driver.plate);
        Ok(driver)
    }

    pub async fn update_driver(
        &self,
        id: &str,
        req: UpdateDriverRequest,
    ) -> Result<Driver, DriverError> {
        let mut driver = self.get_driver(id).await?;

        if let Some(first_name) = req.first_name {
            require_not_blanked(&first_name, "firstName")?;
            driver.first_name = first_name;
        }
        if let Some(last_name) = req.last_name {
            require_not_blanked(&last_name, "lastName")?;
            driver.last_name = last_name;
        }
        if let Some(plate) = req.plate {
            driver.plate = validate_plate(&plate)?;
        }
        if let Some(taxi_type) = req.taxi_type {
            driver.taxi_type = parse_taxi_type(&taxi_type)?;
        }
        if let Some(car_brand) = req.car_brand {
            require_not_blanked(&car_brand, "carBrand")?;
            driver.car_brand = car_brand;
        }
        if let Some(car_model) = req.car_model {
            require_not_blanked(&car_model, "carModel")?;
            driver.car_model = car_model;
        }
        if let Some(location) = requested_location(req.location, req.lat, req.lon)? {
            validate_location(location)?;
            driver.location = location;
        }

        driver.updated_at = Utc::now();

        match self.store.update(&self.read_context(), driver.clone()).await {
            Ok(()) => {
                tracing::info!("Driver updated: {}", driver.id);
                Ok(driver)
            }
            Err(StoreError::NotFound(_)) => Err(DriverError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_driver(&self, id: &str) -> Result<Driver, DriverError> {
        if uuid::Uuid::parse_str(id).is_err() {
            return Err(DriverError::Validation("invalid driver ID".to_string()));
        }

        self.store
            .get(&self.read_context(), id)
            .await?
            .ok_or(DriverError::NotFound)
    }

    /// `page < 1` becomes 1; `page_size` falls back to 20 below 1 and is capped at 100.
    pub async fn list_drivers(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<ListDriversResponse, DriverError> {
        let page = usize::try_from(page).ok().filter(|&p| p >= 1).unwrap_or(1);
        let page_size = match usize::try_from(page_size) {
            Ok(0) | Err(_) => DEFAULT_PAGE_SIZE,
            Ok(size) => size.min(MAX_PAGE_SIZE),
        };

        let result = self
            .store
            .list(&self.read_context(), page, page_size)
            .await?;

        Ok(ListDriversResponse {
            drivers: result.drivers,
            total_count: result.total_count,
            page,
            page_size,
        })
    }

    /// Drivers within the configured radius of `center`, nearest first.
    pub async fn find_nearby(
        &self,
        center: GeoPoint,
        category: Option<TaxiType>,
    ) -> Result<Vec<RankedResult>, DriverError> {
        let query = SearchQuery::new(center, category).with_radius(self.settings.radius_km);
        let outcome =
            search::find_nearby(self.store.as_ref(), &self.read_context(), &query).await?;

        if outcome.skipped_malformed > 0 {
            tracing::warn!(
                "Nearby search skipped {} malformed driver record(s)",
                outcome.skipped_malformed
            );
        }
        tracing::info!("Found {} nearby drivers", outcome.results.len());

        Ok(outcome.results)
    }
}

fn require_non_empty(value: &str, field: &str) -> Result<(), DriverError> {
    if value.is_empty() {
        return Err(DriverError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn require_not_blanked(value: &str, field: &str) -> Result<(), DriverError> {
    if value.is_empty() {
        return Err(DriverError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Returns the plate upper-cased.
fn validate_plate(plate: &str) -> Result<String, DriverError> {
    if plate.is_empty() {
        return Err(DriverError::Validation("plate is required".to_string()));
    }
    let plate = plate.to_uppercase();
    if !PLATE_RE.is_match(&plate) {
        return Err(DriverError::Validation(
            "plate must be in format: 2-3 digits, 1-3 letters, 1-4 digits (e.g., 34ABC123)"
                .to_string(),
        ));
    }
    Ok(plate)
}

fn parse_taxi_type(raw: &str) -> Result<TaxiType, DriverError> {
    raw.parse::<TaxiType>()
        .map_err(|e| DriverError::Validation(e.to_string()))
}

fn validate_location(location: GeoPoint) -> Result<(), DriverError> {
    validate_range(location).map_err(|e| DriverError::Validation(e.to_string()))
}

fn requested_location(
    location: Option<GeoPoint>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<Option<GeoPoint>, DriverError> {
    match (location, lat, lon) {
        (None, None, None) => Ok(None),
        (Some(location), None, None) => Ok(Some(location)),
        (None, Some(lat), Some(lon)) => Ok(Some(GeoPoint::new(lat, lon))),
        (Some(_), _, _) => Err(DriverError::Validation(
            "provide either location or lat/lon, not both".to_string(),
        )),
        _ => Err(DriverError::Validation(
            "both lat and lon must be provided together".to_string(),
        )),
    }
}
