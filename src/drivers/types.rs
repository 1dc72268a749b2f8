//! Driver Domain Types
//!
//! The driver record as it is stored and served, plus the closed set of taxi
//! categories used as the search filter.

use crate::geo::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Taxi category. A closed set; unknown tags never reach the search core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxiType {
    Sari,
    Turkuaz,
    Siyah,
}

impl TaxiType {
    pub const ALL: [TaxiType; 3] = [TaxiType::Sari, TaxiType::Turkuaz, TaxiType::Siyah];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxiType::Sari => "sari",
            TaxiType::Turkuaz => "turkuaz",
            TaxiType::Siyah => "siyah",
        }
    }
}

impl fmt::Display for TaxiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTaxiType(pub String);

impl fmt::Display for UnknownTaxiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid taksiType: {}. Must be one of: sari, turkuaz, siyah",
            self.0
        )
    }
}

impl std::error::Error for UnknownTaxiType {}

impl FromStr for TaxiType {
    type Err = UnknownTaxiType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sari" => Ok(TaxiType::Sari),
            "turkuaz" => Ok(TaxiType::Turkuaz),
            "siyah" => Ok(TaxiType::Siyah),
            other => Err(UnknownTaxiType(other.to_string())),
        }
    }
}

/// A taxi driver record.
///
/// `location` is `(0, 0)` when the driver never reported a position; such
/// records are kept but never appear in nearby search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(default)]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub plate: String,
    pub taxi_type: TaxiType,
    pub car_brand: String,
    pub car_model: String,
    pub location: GeoPoint,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
