//! Pluggable validation rules.
//!
//! A rule is a single check over one or more record kinds. The engine runs
//! every registered rule against every record it validates, so a rule that
//! does not apply to a record kind returns an empty, passing result for it
//! (the default trait methods do exactly that).
//!
//! Built-in rules:
//! - [`TimeIntervalRule`] - timestamp ordering and spacing of series
//! - [`PriceVolatilityRule`] - rolling price range / standard deviation
//! - [`VolumeAnomalyRule`] - volume spikes against a trailing average
//! - [`MetadataConsistencyRule`] - per-asset-type required metadata fields

mod metadata_consistency;
mod time_interval;
mod volatility;
mod volume_anomaly;

pub use metadata_consistency::{optional_fields, required_fields, MetadataConsistencyRule};
pub use time_interval::TimeIntervalRule;
pub use volatility::{calculate_price_range, calculate_std_dev, PriceVolatilityRule, VolatilityMetric};
pub use volume_anomaly::VolumeAnomalyRule;

use crate::errors::Result;
use crate::models::{AssetMetadata, HistoricalSeries, RealTimeQuote, Severity, ValidationResult};

/// Trait for validation rules.
///
/// Implement this trait to add a new check; the engine does not need to
/// change. Rules must be free of side effects so that registration order
/// only affects the order of reported violations.
///
/// # Example
///
/// ```ignore
/// use market_data_quality::rules::ValidationRule;
///
/// struct SymbolCaseRule;
///
/// impl ValidationRule for SymbolCaseRule {
///     fn name(&self) -> &str { "symbol_case" }
///     fn description(&self) -> &str { "Symbols must be upper case" }
///     fn severity(&self) -> Severity { Severity::Warning }
///
///     fn validate_real_time(&self, quote: &RealTimeQuote) -> Result<ValidationResult> {
///         // ...
///     }
/// }
/// ```
pub trait ValidationRule: Send + Sync {
    /// Stable identifier used in logs and error wrapping.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn severity(&self) -> Severity;

    fn validate_historical(&self, series: &HistoricalSeries) -> Result<ValidationResult> {
        let _ = series;
        Ok(ValidationResult::valid())
    }

    fn validate_real_time(&self, quote: &RealTimeQuote) -> Result<ValidationResult> {
        let _ = quote;
        Ok(ValidationResult::valid())
    }

    fn validate_metadata(&self, metadata: &AssetMetadata) -> Result<ValidationResult> {
        let _ = metadata;
        Ok(ValidationResult::valid())
    }
}

/// Field path of a point inside a series.
pub(crate) fn point_field(index: usize, field: &str) -> String {
    format!("data[{}].{}", index, field)
}
