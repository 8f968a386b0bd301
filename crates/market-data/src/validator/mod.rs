//! Validation engine.
//!
//! Validates normalized records to ensure data quality:
//! - Built-in structural checks (required fields, price/volume ranges,
//!   OHLC and 24h range consistency, staleness)
//! - Registered [`ValidationRule`]s, run in insertion order
//!
//! Data problems are reported as violations in the returned
//! [`ValidationResult`]; only an absent record or a failing rule is an error.

mod config;
mod structural;

pub use config::{
    ValidatorConfig, DEFAULT_MAX_DATA_AGE, DEFAULT_MAX_PRICE, DEFAULT_MAX_VOLUME,
    DEFAULT_MIN_PRICE,
};

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::errors::{PipelineError, Result};
use crate::models::{AssetMetadata, HistoricalSeries, RealTimeQuote, Severity, ValidationResult};
use crate::rules::ValidationRule;

/// Source of "now" for staleness checks.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Record validator.
///
/// Holds the configuration, an ordered list of rules and a clock. Adding a
/// rule takes `&mut self`, so rules cannot change while a validation call
/// borrows the validator.
pub struct Validator {
    config: ValidatorConfig,
    rules: Vec<Box<dyn ValidationRule>>,
    clock: Clock,
}

impl Validator {
    /// Create a new validator with default configuration and no rules.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create a validator with custom configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            rules: Vec::new(),
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the clock used for staleness checks.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Builder form of [`add_rule`](Self::add_rule).
    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.add_rule(Box::new(rule));
        self
    }

    /// Append a rule. Rules run in insertion order; duplicates are kept.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        debug!(
            "Registered validation rule '{}' ({})",
            rule.name(),
            rule.severity()
        );
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Box<dyn ValidationRule>] {
        &self.rules
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a historical series.
    pub fn validate_historical(&self, series: Option<&HistoricalSeries>) -> Result<ValidationResult> {
        let series = series.ok_or_else(|| {
            PipelineError::InvalidInput("historical series is absent".to_string())
        })?;

        let mut result = ValidationResult::valid();
        structural::check_historical(series, &self.config, &mut result);
        self.apply_rules(&series.symbol, &mut result, |rule| {
            rule.validate_historical(series)
        })?;

        Ok(result)
    }

    /// Validate a real-time quote.
    pub fn validate_real_time(&self, quote: Option<&RealTimeQuote>) -> Result<ValidationResult> {
        let quote = quote
            .ok_or_else(|| PipelineError::InvalidInput("real-time quote is absent".to_string()))?;

        let mut result = ValidationResult::valid();
        structural::check_real_time(quote, &self.config, (self.clock)(), &mut result);
        self.apply_rules(&quote.symbol, &mut result, |rule| {
            rule.validate_real_time(quote)
        })?;

        Ok(result)
    }

    /// Validate asset metadata.
    pub fn validate_metadata(&self, metadata: Option<&AssetMetadata>) -> Result<ValidationResult> {
        let metadata = metadata
            .ok_or_else(|| PipelineError::InvalidInput("asset metadata is absent".to_string()))?;

        let mut result = ValidationResult::valid();
        structural::check_metadata(metadata, &self.config, &mut result);
        self.apply_rules(&metadata.symbol, &mut result, |rule| {
            rule.validate_metadata(metadata)
        })?;

        Ok(result)
    }

    /// Validate all quotes in a batch.
    ///
    /// Returns a tuple of (valid_quotes, invalid_quotes_with_results). A rule
    /// error aborts the whole batch.
    pub fn validate_quotes_batch(
        &self,
        quotes: Vec<RealTimeQuote>,
    ) -> Result<(Vec<RealTimeQuote>, Vec<(RealTimeQuote, ValidationResult)>)> {
        let mut valid = Vec::with_capacity(quotes.len());
        let mut invalid = Vec::new();

        for quote in quotes {
            let result = self.validate_real_time(Some(&quote))?;
            if result.is_valid {
                valid.push(quote);
            } else {
                invalid.push((quote, result));
            }
        }

        Ok((valid, invalid))
    }

    fn apply_rules<F>(&self, symbol: &str, result: &mut ValidationResult, run: F) -> Result<()>
    where
        F: Fn(&dyn ValidationRule) -> Result<ValidationResult>,
    {
        for rule in &self.rules {
            let outcome =
                run(rule.as_ref()).map_err(|e| PipelineError::rule_execution(rule.name(), e))?;
            if outcome.is_empty() {
                continue;
            }

            let severity = rule.severity();
            log_rule_violations(rule.name(), severity, symbol, &outcome);

            result.extend(outcome);

            if self.config.strict && severity == Severity::Error {
                debug!(
                    "Strict mode: skipping remaining rules for {} after '{}'",
                    symbol,
                    rule.name()
                );
                break;
            }
        }

        // Any violation, structural or from a rule, makes the record invalid.
        if !result.is_empty() {
            result.is_valid = false;
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("config", &self.config)
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn log_rule_violations(rule: &str, severity: Severity, symbol: &str, outcome: &ValidationResult) {
    let count = outcome.violations.len();
    match severity {
        Severity::Error => warn!(
            "Rule '{}' reported {} violation(s) for {}: {}",
            rule,
            count,
            symbol,
            outcome.summary()
        ),
        Severity::Warning => info!(
            "Rule '{}' reported {} violation(s) for {}: {}",
            rule,
            count,
            symbol,
            outcome.summary()
        ),
        Severity::Info => debug!(
            "Rule '{}' reported {} violation(s) for {}: {}",
            rule,
            count,
            symbol,
            outcome.summary()
        ),
    }
}
