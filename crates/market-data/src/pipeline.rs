//! Normalize-then-validate composition.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::{AssetMetadata, HistoricalSeries, RealTimeQuote, ValidationResult};
use crate::normalizer::Normalizer;
use crate::rules::ValidationRule;
use crate::validator::Validator;

/// A normalized record together with its validation outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Processed<T> {
    pub record: T,
    pub validation: ValidationResult,
}

impl<T> Processed<T> {
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }

    /// Returns the record only if it passed validation.
    pub fn into_valid(self) -> Option<T> {
        if self.validation.is_valid {
            Some(self.record)
        } else {
            None
        }
    }
}

/// Runs every record through a [`Normalizer`] and then a [`Validator`].
#[derive(Debug, Default)]
pub struct Pipeline {
    normalizer: Normalizer,
    validator: Validator,
}

impl Pipeline {
    pub fn new(normalizer: Normalizer, validator: Validator) -> Self {
        Self {
            normalizer,
            validator,
        }
    }

    /// Builder form of [`Validator::add_rule`].
    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.validator.add_rule(Box::new(rule));
        self
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn validator_mut(&mut self) -> &mut Validator {
        &mut self.validator
    }

    pub fn process_historical(
        &self,
        series: Option<&HistoricalSeries>,
    ) -> Result<Processed<HistoricalSeries>> {
        let record = self.normalizer.normalize_historical(series)?;
        let validation = self.validator.validate_historical(Some(&record))?;
        log_outcome("series", &record.symbol, &validation);
        Ok(Processed { record, validation })
    }

    pub fn process_real_time(
        &self,
        quote: Option<&RealTimeQuote>,
    ) -> Result<Processed<RealTimeQuote>> {
        let record = self.normalizer.normalize_real_time(quote)?;
        let validation = self.validator.validate_real_time(Some(&record))?;
        log_outcome("quote", &record.symbol, &validation);
        Ok(Processed { record, validation })
    }

    pub fn process_metadata(
        &self,
        metadata: Option<&AssetMetadata>,
    ) -> Result<Processed<AssetMetadata>> {
        let record = self.normalizer.normalize_metadata(metadata)?;
        let validation = self.validator.validate_metadata(Some(&record))?;
        log_outcome("metadata", &record.symbol, &validation);
        Ok(Processed { record, validation })
    }
}

fn log_outcome(kind: &str, symbol: &str, validation: &ValidationResult) {
    debug!(
        "Processed {} for {}: valid={}, {} violation(s)",
        kind,
        symbol,
        validation.is_valid,
        validation.violations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{codes, Interval, PricePoint, Severity};
    use crate::normalizer::NormalizerConfig;
    use crate::rules::TimeIntervalRule;
    use chrono::{Duration, TimeZone, Utc};
    use chrono_tz::America::New_York;

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap()
    }

    fn pipeline() -> Pipeline {
        let normalizer = Normalizer::with_config(NormalizerConfig {
            target_timezone: New_York,
            ..Default::default()
        });
        Pipeline::new(normalizer, Validator::new().with_clock(now))
    }

    #[test]
    fn test_absent_inputs_propagate() {
        let pipeline = pipeline();
        assert!(pipeline.process_historical(None).unwrap_err().is_invalid_input());
        assert!(pipeline.process_real_time(None).unwrap_err().is_invalid_input());
        assert!(pipeline.process_metadata(None).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_series_is_filled_before_validation() {
        let pipeline = pipeline();
        let start = now();
        let mut gap = PricePoint::ohlcv(
            (start + Duration::days(1)).fixed_offset(),
            0.0,
            0.0,
            0.0,
            101.0,
            0,
        );
        gap.adj_close = 0.0;
        let series = HistoricalSeries::new(
            "AAPL",
            "stock",
            Interval::OneDay,
            vec![
                PricePoint::ohlcv(start.fixed_offset(), 100.0, 102.0, 99.0, 100.0, 1_000),
                gap,
            ],
        );

        let processed = pipeline.process_historical(Some(&series)).unwrap();

        let filled = &processed.record.data[1];
        assert_eq!(filled.open, 100.0);
        assert_eq!(filled.high, 102.0);
        assert_eq!(filled.low, 99.0);
        assert_eq!(filled.volume, 1_000);
        assert!(processed.is_valid(), "{}", processed.validation.summary());
        assert_eq!(
            processed.record.data[0].timestamp.map(|t| t.offset().local_minus_utc()),
            Some(-5 * 3600)
        );
    }

    #[test]
    fn test_rule_violations_reach_the_caller() {
        let pipeline =
            pipeline().with_rule(TimeIntervalRule::new(Duration::hours(24), Severity::Error));
        let start = now();
        let series = HistoricalSeries::new(
            "AAPL",
            "stock",
            Interval::OneDay,
            vec![
                PricePoint::ohlcv(start.fixed_offset(), 100.0, 102.0, 99.0, 100.0, 1_000),
                PricePoint::ohlcv(
                    (start + Duration::hours(36)).fixed_offset(),
                    100.0,
                    102.0,
                    99.0,
                    101.0,
                    1_000,
                ),
            ],
        );

        let processed = pipeline.process_historical(Some(&series)).unwrap();

        assert!(!processed.is_valid());
        assert!(processed.validation.has_code(codes::TIME_GAP));
        assert!(processed.into_valid().is_none());
    }

    #[test]
    fn test_quote_and_metadata() {
        let pipeline = pipeline();

        let quote = RealTimeQuote::new("BTC", "crypto", 42_000.0, now().fixed_offset())
            .with_range_24h(41_000.0, 43_000.0)
            .with_change(500.0, 1.2);
        let processed = pipeline.process_real_time(Some(&quote)).unwrap();
        assert!(processed.is_valid());
        assert_eq!(processed.record.change_percent, 1.2);

        let metadata = AssetMetadata::new("BTC", "crypto", "Bitcoin")
            .exchange("Coinbase")
            .last_updated(now().fixed_offset());
        let processed = pipeline.process_metadata(Some(&metadata)).unwrap();
        assert!(processed.is_valid());
        assert_eq!(processed.record.currency, "USD");
        assert_eq!(processed.into_valid().map(|m| m.symbol), Some("BTC".to_string()));
    }
}
