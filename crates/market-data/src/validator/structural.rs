//! Built-in structural checks.
//!
//! These run before any registered rule and write straight into the
//! call's result:
//! - required identifiers and timestamps
//! - price and volume thresholds
//! - OHLC and 24h high/low relationships
//! - real-time staleness

use chrono::{DateTime, Utc};

use crate::models::{
    codes, AssetMetadata, HistoricalSeries, PricePoint, RealTimeQuote, ValidationResult,
    ValidationViolation, ViolationValue,
};
use crate::rules::point_field;

use super::config::ValidatorConfig;

pub(crate) fn check_historical(
    series: &HistoricalSeries,
    config: &ValidatorConfig,
    result: &mut ValidationResult,
) {
    check_required_text("symbol", &series.symbol, result);
    check_required_text("asset_type", &series.asset_type, result);

    if series.data.is_empty() {
        result.push(ValidationViolation::bare(
            "data",
            codes::REQUIRED,
            "Series contains no data points",
        ));
        return;
    }

    for (i, point) in series.data.iter().enumerate() {
        check_point(i, point, config, result);
    }
}

fn check_point(
    index: usize,
    point: &PricePoint,
    config: &ValidatorConfig,
    result: &mut ValidationResult,
) {
    if point.timestamp.is_none() {
        result.push(ValidationViolation::bare(
            point_field(index, "timestamp"),
            codes::REQUIRED,
            "Timestamp is required",
        ));
    }

    for (name, value) in [
        ("open", point.open),
        ("high", point.high),
        ("low", point.low),
        ("close", point.close),
    ] {
        check_price(&point_field(index, name), value, config, result);
    }
    check_volume(&point_field(index, "volume"), point.volume, config, result);

    if point.low > point.high {
        result.push(ValidationViolation::new(
            point_field(index, "low"),
            codes::LOGIC,
            format!("Low ({}) is greater than High ({})", point.low, point.high),
            ViolationValue::map([("low", point.low), ("high", point.high)]),
        ));
    }
    if point.open < point.low || point.open > point.high {
        result.push(ValidationViolation::new(
            point_field(index, "open"),
            codes::LOGIC,
            format!(
                "Open ({}) is outside Low/High range ({}-{})",
                point.open, point.low, point.high
            ),
            ViolationValue::map([
                ("open", point.open),
                ("low", point.low),
                ("high", point.high),
            ]),
        ));
    }
    if point.close < point.low || point.close > point.high {
        result.push(ValidationViolation::new(
            point_field(index, "close"),
            codes::LOGIC,
            format!(
                "Close ({}) is outside Low/High range ({}-{})",
                point.close, point.low, point.high
            ),
            ViolationValue::map([
                ("close", point.close),
                ("low", point.low),
                ("high", point.high),
            ]),
        ));
    }
}

pub(crate) fn check_real_time(
    quote: &RealTimeQuote,
    config: &ValidatorConfig,
    now: DateTime<Utc>,
    result: &mut ValidationResult,
) {
    check_required_text("symbol", &quote.symbol, result);
    check_required_text("asset_type", &quote.asset_type, result);

    match quote.timestamp {
        None => result.push(ValidationViolation::bare(
            "timestamp",
            codes::REQUIRED,
            "Timestamp is required",
        )),
        Some(timestamp) => {
            let age = now.signed_duration_since(timestamp);
            // A negative age (clock skew) is not stale.
            let stale = age
                .to_std()
                .map(|age| age > config.max_data_age)
                .unwrap_or(false);
            if stale {
                result.push(ValidationViolation::new(
                    "timestamp",
                    codes::STALE,
                    format!(
                        "Quote is {} seconds old, maximum is {} seconds",
                        age.num_seconds(),
                        config.max_data_age.as_secs()
                    ),
                    timestamp,
                ));
            }
        }
    }

    check_price("price", quote.price, config, result);
    check_volume("volume", quote.volume, config, result);

    if quote.low_24h > quote.high_24h {
        result.push(ValidationViolation::new(
            "low_24h",
            codes::LOGIC,
            format!(
                "24h low ({}) is greater than 24h high ({})",
                quote.low_24h, quote.high_24h
            ),
            ViolationValue::map([("low_24h", quote.low_24h), ("high_24h", quote.high_24h)]),
        ));
    }
    if quote.price < quote.low_24h || quote.price > quote.high_24h {
        result.push(ValidationViolation::new(
            "price",
            codes::LOGIC,
            format!(
                "Price ({}) is outside 24h range ({}-{})",
                quote.price, quote.low_24h, quote.high_24h
            ),
            ViolationValue::map([
                ("price", quote.price),
                ("low_24h", quote.low_24h),
                ("high_24h", quote.high_24h),
            ]),
        ));
    }
}

pub(crate) fn check_metadata(
    metadata: &AssetMetadata,
    config: &ValidatorConfig,
    result: &mut ValidationResult,
) {
    for field in &config.required_fields {
        if metadata.is_blank(*field) {
            result.push(ValidationViolation::bare(
                field.as_str(),
                codes::REQUIRED,
                format!("{} is required", field),
            ));
        }
    }

    if metadata.last_updated.is_none() {
        result.push(ValidationViolation::bare(
            "last_updated",
            codes::REQUIRED,
            "Last updated timestamp is required",
        ));
    }
}

fn check_required_text(field: &str, value: &str, result: &mut ValidationResult) {
    if value.trim().is_empty() {
        result.push(ValidationViolation::bare(
            field,
            codes::REQUIRED,
            format!("{} is required", field),
        ));
    }
}

fn check_price(field: &str, value: f64, config: &ValidatorConfig, result: &mut ValidationResult) {
    if !value.is_finite() || value < config.min_price || value > config.max_price {
        result.push(ValidationViolation::new(
            field,
            codes::RANGE,
            format!(
                "Price {} is outside allowed range ({}-{})",
                value, config.min_price, config.max_price
            ),
            value,
        ));
    }
}

fn check_volume(field: &str, value: i64, config: &ValidatorConfig, result: &mut ValidationResult) {
    if value < 0 || value as f64 > config.max_volume {
        result.push(ValidationViolation::new(
            field,
            codes::RANGE,
            format!(
                "Volume {} is outside allowed range (0-{})",
                value, config.max_volume
            ),
            value,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Interval;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 15, 0, 0).unwrap()
    }

    fn good_point(minutes: i64) -> PricePoint {
        PricePoint::ohlcv(
            (now() + Duration::minutes(minutes)).fixed_offset(),
            100.0,
            105.0,
            95.0,
            102.0,
            1_000,
        )
    }

    #[test]
    fn test_clean_series_has_no_violations() {
        let series = HistoricalSeries::new(
            "AAPL",
            "stock",
            Interval::OneMinute,
            vec![good_point(0), good_point(1)],
        );
        let mut result = ValidationResult::valid();
        check_historical(&series, &ValidatorConfig::default(), &mut result);
        assert!(result.is_valid, "{}", result.summary());
    }

    #[test]
    fn test_empty_series_and_missing_identifiers() {
        let series = HistoricalSeries::new("", " ", Interval::OneDay, Vec::new());
        let mut result = ValidationResult::valid();
        check_historical(&series, &ValidatorConfig::default(), &mut result);

        let fields: Vec<_> = result.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["symbol", "asset_type", "data"]);
        assert!(result.violations.iter().all(|v| v.code == codes::REQUIRED));
    }

    #[test]
    fn test_point_range_and_logic() {
        let mut bad = good_point(0);
        bad.timestamp = None;
        bad.low = 110.0; // above high, open and close
        bad.volume = -1;

        let series = HistoricalSeries::new("AAPL", "stock", Interval::OneDay, vec![bad]);
        let mut result = ValidationResult::valid();
        check_historical(&series, &ValidatorConfig::default(), &mut result);

        let summary: Vec<_> = result
            .violations
            .iter()
            .map(|v| (v.field.as_str(), v.code.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("data[0].timestamp", codes::REQUIRED),
                ("data[0].volume", codes::RANGE),
                ("data[0].low", codes::LOGIC),
                ("data[0].open", codes::LOGIC),
                ("data[0].close", codes::LOGIC),
            ]
        );
    }

    #[test]
    fn test_price_thresholds() {
        let mut point = good_point(0);
        point.high = 2_000_000.0;
        point.open = 0.0;

        let series = HistoricalSeries::new("AAPL", "stock", Interval::OneDay, vec![point]);
        let mut result = ValidationResult::valid();
        check_historical(&series, &ValidatorConfig::default(), &mut result);

        let ranges: Vec<_> = result
            .violations_with_code(codes::RANGE)
            .map(|v| v.field.as_str())
            .collect();
        assert_eq!(ranges, vec!["data[0].open", "data[0].high"]);
    }

    #[test]
    fn test_real_time_staleness() {
        let config = ValidatorConfig::default();
        let quote_at = |offset: Duration| {
            RealTimeQuote::new("AAPL", "stock", 100.0, (now() + offset).fixed_offset())
                .with_range_24h(99.0, 101.0)
        };
        let fresh = quote_at(Duration::minutes(-4));
        let stale = quote_at(Duration::minutes(-6));
        let future = quote_at(Duration::minutes(1));

        let mut result = ValidationResult::valid();
        check_real_time(&fresh, &config, now(), &mut result);
        assert!(result.is_valid);

        let mut result = ValidationResult::valid();
        check_real_time(&future, &config, now(), &mut result);
        assert!(result.is_valid);

        let mut result = ValidationResult::valid();
        check_real_time(&stale, &config, now(), &mut result);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].code, codes::STALE);
    }

    #[test]
    fn test_real_time_range_logic() {
        let config = ValidatorConfig::default();
        let ts = now().fixed_offset();

        let inverted = RealTimeQuote::new("AAPL", "stock", 100.0, ts).with_range_24h(105.0, 95.0);
        let mut result = ValidationResult::valid();
        check_real_time(&inverted, &config, now(), &mut result);
        let fields: Vec<_> = result.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["low_24h", "price"]);

        let in_range = RealTimeQuote::new("AAPL", "stock", 100.0, ts).with_range_24h(95.0, 105.0);
        let mut result = ValidationResult::valid();
        check_real_time(&in_range, &config, now(), &mut result);
        assert!(result.is_valid);
    }

    #[test]
    fn test_real_time_without_24h_range_is_flagged() {
        let quote = RealTimeQuote::new("AAPL", "stock", 100.0, now().fixed_offset()).with_volume(10);

        let mut result = ValidationResult::valid();
        check_real_time(&quote, &ValidatorConfig::default(), now(), &mut result);

        assert!(!result.is_valid);
        let logic: Vec<_> = result
            .violations_with_code(codes::LOGIC)
            .map(|v| v.field.as_str())
            .collect();
        assert_eq!(logic, vec!["price"]);
    }

    #[test]
    fn test_metadata_required_fields() {
        let config = ValidatorConfig::default();
        let metadata = AssetMetadata::new("AAPL", "stock", "");

        let mut result = ValidationResult::valid();
        check_metadata(&metadata, &config, &mut result);

        let fields: Vec<_> = result.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "exchange", "last_updated"]);
    }
}
