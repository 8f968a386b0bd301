use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::errors::Result;
use crate::models::{
    codes, AssetMetadata, AssetType, MetadataField, Severity, ValidationResult,
    ValidationViolation,
};

use super::ValidationRule;

/// Required and optional metadata fields for one asset type.
struct FieldRequirements {
    required: &'static [MetadataField],
    optional: &'static [MetadataField],
}

const BASE_REQUIRED: &[MetadataField] = &[MetadataField::Symbol, MetadataField::Name];

const BASE_OPTIONAL: &[MetadataField] = &[
    MetadataField::Exchange,
    MetadataField::Currency,
    MetadataField::Country,
    MetadataField::Description,
    MetadataField::Website,
    MetadataField::LogoUrl,
];

lazy_static! {
    static ref FIELD_REQUIREMENTS: HashMap<AssetType, FieldRequirements> = {
        use crate::models::MetadataField as F;

        let mut m = HashMap::new();
        m.insert(
            AssetType::Stock,
            FieldRequirements {
                required: &[
                    F::Symbol,
                    F::Name,
                    F::Exchange,
                    F::Currency,
                    F::Country,
                    F::Sector,
                    F::Industry,
                ],
                optional: &[F::Description, F::Website, F::LogoUrl],
            },
        );
        m.insert(
            AssetType::Etf,
            FieldRequirements {
                required: &[F::Symbol, F::Name, F::Exchange, F::Currency, F::Description],
                optional: &[F::Country, F::Sector, F::Industry, F::Website, F::LogoUrl],
            },
        );
        m.insert(
            AssetType::Crypto,
            FieldRequirements {
                required: &[F::Symbol, F::Name, F::Exchange, F::Currency],
                optional: &[F::Description, F::Website, F::LogoUrl],
            },
        );
        m.insert(
            AssetType::Forex,
            FieldRequirements {
                required: &[F::Symbol, F::Name, F::Currency],
                optional: &[F::Exchange, F::Description],
            },
        );
        m
    };
}

/// Fields that must be non-empty for the given asset type.
pub fn required_fields(asset_type: AssetType) -> &'static [MetadataField] {
    FIELD_REQUIREMENTS
        .get(&asset_type)
        .map(|r| r.required)
        .unwrap_or(BASE_REQUIRED)
}

/// Fields that are expected but may be empty for the given asset type.
pub fn optional_fields(asset_type: AssetType) -> &'static [MetadataField] {
    FIELD_REQUIREMENTS
        .get(&asset_type)
        .map(|r| r.optional)
        .unwrap_or(BASE_OPTIONAL)
}

/// Checks that metadata carries the fields its asset type requires.
///
/// The asset type tag is first resolved through the synonym table
/// (e.g. "Equities" -> stock, "digital asset" -> crypto). An unrecognized tag
/// yields a single `unknown` violation and no field checks.
#[derive(Clone, Debug)]
pub struct MetadataConsistencyRule {
    severity: Severity,
}

impl MetadataConsistencyRule {
    pub fn new(severity: Severity) -> Self {
        Self { severity }
    }
}

impl Default for MetadataConsistencyRule {
    fn default() -> Self {
        Self::new(Severity::Error)
    }
}

impl ValidationRule for MetadataConsistencyRule {
    fn name(&self) -> &str {
        "metadata_consistency"
    }

    fn description(&self) -> &str {
        "Checks that metadata includes the fields required for its asset type"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn validate_metadata(&self, metadata: &AssetMetadata) -> Result<ValidationResult> {
        let mut result = ValidationResult::valid();

        let Some(asset_type) = metadata.kind() else {
            result.push(ValidationViolation::new(
                MetadataField::AssetType.as_str(),
                codes::UNKNOWN,
                format!("Unrecognized asset type '{}'", metadata.asset_type),
                metadata.asset_type.as_str(),
            ));
            return Ok(result);
        };

        for field in required_fields(asset_type) {
            if metadata.is_blank(*field) {
                result.push(ValidationViolation::new(
                    field.as_str(),
                    codes::REQUIRED_FOR_ASSET_TYPE,
                    format!("{} is required for asset type {}", field, asset_type),
                    asset_type.as_str(),
                ));
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HistoricalSeries, Interval, RealTimeQuote};
    use chrono::Utc;

    fn complete_stock() -> AssetMetadata {
        AssetMetadata::new("AAPL", "stock", "Apple Inc.")
            .exchange("NASDAQ")
            .currency("USD")
            .country("US")
            .sector("Technology")
            .industry("Consumer Electronics")
    }

    #[test]
    fn test_complete_stock_passes() {
        let rule = MetadataConsistencyRule::default();
        let result = rule.validate_metadata(&complete_stock()).unwrap();
        assert!(result.is_valid);
    }

    #[test]
    fn test_stock_missing_three_fields() {
        let rule = MetadataConsistencyRule::new(Severity::Warning);
        let metadata = AssetMetadata::new("AAPL", "stock", "Apple Inc.")
            .exchange("NASDAQ")
            .currency("USD");

        let result = rule.validate_metadata(&metadata).unwrap();

        assert_eq!(result.violations.len(), 3);
        assert!(result
            .violations
            .iter()
            .all(|v| v.code == codes::REQUIRED_FOR_ASSET_TYPE));
        let fields: Vec<_> = result.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["country", "sector", "industry"]);
    }

    #[test]
    fn test_unknown_asset_type_short_circuits() {
        let rule = MetadataConsistencyRule::default();
        let metadata = AssetMetadata::new("", "collectible", "");

        let result = rule.validate_metadata(&metadata).unwrap();

        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].code, codes::UNKNOWN);
        assert_eq!(result.violations[0].field, "asset_type");
    }

    #[test]
    fn test_synonym_resolves_before_field_checks() {
        let rule = MetadataConsistencyRule::default();
        let metadata = AssetMetadata::new("SPY", "Exchange-Traded Fund", "SPDR S&P 500")
            .exchange("NYSE Arca")
            .currency("USD");

        let result = rule.validate_metadata(&metadata).unwrap();
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].field, "description");
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let rule = MetadataConsistencyRule::default();
        let metadata = AssetMetadata::new("EURUSD", "fx", "Euro / US Dollar").currency("   ");

        let result = rule.validate_metadata(&metadata).unwrap();
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].field, "currency");
    }

    #[test]
    fn test_other_types_use_base_requirements() {
        assert_eq!(required_fields(AssetType::Bond), BASE_REQUIRED);
        assert_eq!(optional_fields(AssetType::Index), BASE_OPTIONAL);
        assert!(required_fields(AssetType::Stock).contains(&MetadataField::Industry));
        assert!(optional_fields(AssetType::Etf).contains(&MetadataField::Sector));

        let rule = MetadataConsistencyRule::default();
        let metadata = AssetMetadata::new("US10Y", "bond", "US Treasury 10Y");
        assert!(rule.validate_metadata(&metadata).unwrap().is_valid);
    }

    #[test]
    fn test_other_record_kinds_pass() {
        let rule = MetadataConsistencyRule::default();
        let series = HistoricalSeries::new("X", "nonsense", Interval::OneDay, Vec::new());
        let quote = RealTimeQuote::new("X", "nonsense", 1.0, Utc::now().fixed_offset());

        assert!(rule.validate_historical(&series).unwrap().is_valid);
        assert!(rule.validate_real_time(&quote).unwrap().is_valid);
    }
}
