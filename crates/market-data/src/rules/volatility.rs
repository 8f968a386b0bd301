use serde::{Deserialize, Serialize};

use crate::errors::{PipelineError, Result};
use crate::models::{
    codes, HistoricalSeries, PricePoint, RealTimeQuote, Severity, ValidationResult,
    ValidationViolation, ViolationValue,
};

use super::{point_field, ValidationRule};

/// How price movement inside a window is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityMetric {
    /// Highest high minus lowest low.
    #[default]
    Range,
    /// Sample standard deviation of closes.
    StdDev,
}

/// Flags windows whose relative price movement exceeds a threshold.
///
/// Historical series: for every index `i >= lookback_period`, the window is
/// the `lookback_period` points ending at `i`. The metric is divided by the
/// window's last close (windows with a zero last close are skipped).
///
/// Real-time quotes: `(high_24h - low_24h) / low_24h` when both are positive.
#[derive(Clone, Debug)]
pub struct PriceVolatilityRule {
    max_volatility: f64,
    lookback_period: usize,
    metric: VolatilityMetric,
    severity: Severity,
}

impl PriceVolatilityRule {
    pub fn new(
        max_volatility: f64,
        lookback_period: usize,
        metric: VolatilityMetric,
        severity: Severity,
    ) -> Self {
        Self {
            max_volatility,
            lookback_period,
            metric,
            severity,
        }
    }

    /// Like [`new`](Self::new), rejecting a zero lookback or a non-finite threshold.
    pub fn try_new(
        max_volatility: f64,
        lookback_period: usize,
        metric: VolatilityMetric,
        severity: Severity,
    ) -> Result<Self> {
        if lookback_period == 0 {
            return Err(PipelineError::InvalidConfig(
                "lookback_period must be at least 1".to_string(),
            ));
        }
        if !max_volatility.is_finite() || max_volatility < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "max_volatility must be a non-negative number, got {}",
                max_volatility
            )));
        }
        Ok(Self::new(max_volatility, lookback_period, metric, severity))
    }

    fn window_value(&self, window: &[PricePoint]) -> f64 {
        match self.metric {
            VolatilityMetric::Range => calculate_price_range(window),
            VolatilityMetric::StdDev => {
                let closes: Vec<f64> = window.iter().map(|p| p.close).collect();
                calculate_std_dev(&closes)
            }
        }
    }
}

impl ValidationRule for PriceVolatilityRule {
    fn name(&self) -> &str {
        "price_volatility"
    }

    fn description(&self) -> &str {
        "Detects price movement above the allowed volatility over a rolling window"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn validate_historical(&self, series: &HistoricalSeries) -> Result<ValidationResult> {
        if self.lookback_period == 0 {
            return Err(PipelineError::RuleFailed {
                message: "lookback_period must be at least 1".to_string(),
            });
        }

        let mut result = ValidationResult::valid();
        let points = &series.data;

        for i in self.lookback_period..points.len() {
            let window = &points[i + 1 - self.lookback_period..=i];
            let last_close = window[window.len() - 1].close;
            if last_close == 0.0 {
                continue;
            }

            let volatility = self.window_value(window) / last_close;
            if volatility > self.max_volatility {
                result.push(ValidationViolation::new(
                    point_field(i, "close"),
                    codes::HIGH_VOLATILITY,
                    format!(
                        "Volatility {:.4} over {} points exceeds maximum {:.4}",
                        volatility, self.lookback_period, self.max_volatility
                    ),
                    volatility,
                ));
            }
        }

        Ok(result)
    }

    fn validate_real_time(&self, quote: &RealTimeQuote) -> Result<ValidationResult> {
        let mut result = ValidationResult::valid();

        if quote.high_24h > 0.0 && quote.low_24h > 0.0 {
            let volatility = (quote.high_24h - quote.low_24h) / quote.low_24h;
            if volatility > self.max_volatility {
                result.push(ValidationViolation::new(
                    "high_24h",
                    codes::HIGH_VOLATILITY,
                    format!(
                        "24h volatility {:.4} exceeds maximum {:.4}",
                        volatility, self.max_volatility
                    ),
                    ViolationValue::map([
                        ("high_24h", quote.high_24h),
                        ("low_24h", quote.low_24h),
                        ("volatility", volatility),
                    ]),
                ));
            }
        }

        Ok(result)
    }
}

/// Highest high minus lowest low; zero for an empty slice.
pub fn calculate_price_range(points: &[PricePoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let high = points.iter().map(|p| p.high).fold(f64::NEG_INFINITY, f64::max);
    let low = points.iter().map(|p| p.low).fold(f64::INFINITY, f64::min);
    high - low
}

/// Sample standard deviation (n - 1 denominator); zero for fewer than two values.
pub fn calculate_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}
