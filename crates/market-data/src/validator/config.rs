use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::MetadataField;

/// Default upper bound for any price field.
pub const DEFAULT_MAX_PRICE: f64 = 1_000_000.0;

/// Default lower bound for any price field.
pub const DEFAULT_MIN_PRICE: f64 = 1e-6;

/// Default upper bound for volume.
pub const DEFAULT_MAX_VOLUME: f64 = 1e12;

/// Default maximum age of a real-time quote.
pub const DEFAULT_MAX_DATA_AGE: Duration = Duration::from_secs(5 * 60);

/// Validator configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Maximum allowed price value (sanity check).
    pub max_price: f64,
    /// Minimum allowed price value.
    pub min_price: f64,
    /// Maximum allowed volume.
    pub max_volume: f64,
    /// Maximum age of a real-time quote before it is reported stale.
    #[serde(rename = "max_data_age_secs", with = "duration_secs")]
    pub max_data_age: Duration,
    /// Metadata fields that must be non-empty.
    pub required_fields: Vec<MetadataField>,
    /// Stop running rules once an error-severity rule reports a violation.
    pub strict: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_price: DEFAULT_MAX_PRICE,
            min_price: DEFAULT_MIN_PRICE,
            max_volume: DEFAULT_MAX_VOLUME,
            max_data_age: DEFAULT_MAX_DATA_AGE,
            required_fields: vec![
                MetadataField::Symbol,
                MetadataField::Name,
                MetadataField::AssetType,
                MetadataField::Exchange,
            ],
            strict: false,
        }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
