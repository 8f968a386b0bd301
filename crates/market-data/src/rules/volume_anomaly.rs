use crate::errors::{PipelineError, Result};
use crate::models::{
    codes, HistoricalSeries, Severity, ValidationResult, ValidationViolation, ViolationValue,
};

use super::{point_field, ValidationRule};

/// Flags volume spikes against the trailing average.
///
/// For every index `i >= lookback_period`, the volume at `i` is compared to
/// the mean volume of the `lookback_period` points before it. Points whose
/// trailing average is zero are skipped. Real-time quotes carry no history
/// and metadata has no volume, so both always pass.
#[derive(Clone, Debug)]
pub struct VolumeAnomalyRule {
    max_multiplier: f64,
    lookback_period: usize,
    severity: Severity,
}

impl VolumeAnomalyRule {
    pub fn new(max_multiplier: f64, lookback_period: usize, severity: Severity) -> Self {
        Self {
            max_multiplier,
            lookback_period,
            severity,
        }
    }

    /// Like [`new`](Self::new), rejecting a zero lookback or a non-finite multiplier.
    pub fn try_new(max_multiplier: f64, lookback_period: usize, severity: Severity) -> Result<Self> {
        if lookback_period == 0 {
            return Err(PipelineError::InvalidConfig(
                "lookback_period must be at least 1".to_string(),
            ));
        }
        if !max_multiplier.is_finite() || max_multiplier < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "max_multiplier must be a non-negative number, got {}",
                max_multiplier
            )));
        }
        Ok(Self::new(max_multiplier, lookback_period, severity))
    }
}

impl ValidationRule for VolumeAnomalyRule {
    fn name(&self) -> &str {
        "volume_anomaly"
    }

    fn description(&self) -> &str {
        "Detects volume spikes relative to the trailing average volume"
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
            let trailing = &points[i - self.lookback_period..i];
            let average =
                trailing.iter().map(|p| p.volume as f64).sum::<f64>() / trailing.len() as f64;
            if average == 0.0 {
                continue;
            }

            let volume = points[i].volume;
            let multiplier = volume as f64 / average;
            if multiplier > self.max_multiplier {
                result.push(ValidationViolation::new(
                    point_field(i, "volume"),
                    codes::VOLUME_ANOMALY,
                    format!(
                        "Volume {} is {:.2}x the {}-point average ({:.0}), above {:.2}x",
                        volume, multiplier, self.lookback_period, average, self.max_multiplier
                    ),
                    ViolationValue::map([
                        ("volume", volume as f64),
                        ("average", average),
                        ("multiplier", multiplier),
                    ]),
                ));
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Interval, PricePoint, RealTimeQuote};
    use chrono::Utc;

    fn series(volumes: &[i64]) -> HistoricalSeries {
        let data = volumes
            .iter()
            .map(|v| PricePoint {
                timestamp: None,
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.0,
                adj_close: 100.0,
                volume: *v,
            })
            .collect();
        HistoricalSeries::new("AAPL", "stock", Interval::OneDay, data)
    }

    #[test]
    fn test_spike_is_flagged() {
        let rule = VolumeAnomalyRule::new(3.0, 3, Severity::Warning);
        let result = rule
            .validate_historical(&series(&[1_000, 1_200, 800, 5_000, 1_000]))
            .unwrap();

        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].code, codes::VOLUME_ANOMALY);
        assert_eq!(result.violations[0].field, "data[3].volume");
    }

    #[test]
    fn test_multiplier_at_threshold_passes() {
        let rule = VolumeAnomalyRule::new(2.0, 2, Severity::Warning);
        let result = rule.validate_historical(&series(&[100, 100, 200])).unwrap();
        assert!(result.is_valid);
    }

    #[test]
    fn test_zero_average_is_skipped() {
        let rule = VolumeAnomalyRule::new(2.0, 2, Severity::Warning);
        let result = rule.validate_historical(&series(&[0, 0, 1_000_000])).unwrap();
        assert!(result.is_valid);
    }

    #[test]
    fn test_zero_lookback_fails() {
        let rule = VolumeAnomalyRule::new(2.0, 0, Severity::Warning);
        assert!(rule.validate_historical(&series(&[1, 2])).is_err());
        assert!(VolumeAnomalyRule::try_new(2.0, 0, Severity::Warning).is_err());
        assert!(VolumeAnomalyRule::try_new(2.0, 5, Severity::Warning).is_ok());
    }

    #[test]
    fn test_real_time_not_applicable() {
        let rule = VolumeAnomalyRule::new(0.0, 1, Severity::Error);
        let quote = RealTimeQuote::new("AAPL", "stock", 100.0, Utc::now().fixed_offset())
            .with_volume(i64::MAX);
        assert!(rule.validate_real_time(&quote).unwrap().is_valid);
    }
}
