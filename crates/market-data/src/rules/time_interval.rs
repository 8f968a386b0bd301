use chrono::Duration;

use crate::errors::{PipelineError, Result};
use crate::models::{
    codes, HistoricalSeries, Interval, Severity, ValidationResult, ValidationViolation,
    ViolationValue,
};

use super::{point_field, ValidationRule};

/// Checks ordering and spacing of timestamps in a series.
///
/// For each adjacent pair, a reversal (later point earlier than the previous)
/// is reported as `time_reversal` and the gap check is skipped for that pair.
/// Otherwise a spacing above `max_gap` is reported as `time_gap`. Pairs with
/// a missing timestamp are left to the structural checks.
#[derive(Clone, Debug)]
pub struct TimeIntervalRule {
    max_gap: Duration,
    severity: Severity,
}

impl TimeIntervalRule {
    pub fn new(max_gap: Duration, severity: Severity) -> Self {
        Self { max_gap, severity }
    }

    /// Rule whose allowed gap is the interval's nominal spacing times `tolerance`.
    ///
    /// Daily bars with `tolerance = 4.0` accept a long weekend, for example.
    pub fn for_interval(interval: Interval, tolerance: f64, severity: Severity) -> Result<Self> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                tolerance
            )));
        }
        let nominal_ms = interval.nominal_duration().num_milliseconds() as f64;
        let max_gap = Duration::milliseconds((nominal_ms * tolerance).round() as i64);
        Ok(Self::new(max_gap, severity))
    }

    pub fn max_gap(&self) -> Duration {
        self.max_gap
    }
}

impl ValidationRule for TimeIntervalRule {
    fn name(&self) -> &str {
        "time_interval"
    }

    fn description(&self) -> &str {
        "Detects out-of-order timestamps and gaps larger than the allowed interval"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn validate_historical(&self, series: &HistoricalSeries) -> Result<ValidationResult> {
        let mut result = ValidationResult::valid();

        for (i, pair) in series.data.windows(2).enumerate() {
            let index = i + 1;
            let (Some(previous), Some(current)) = (pair[0].timestamp, pair[1].timestamp) else {
                continue;
            };

            if current < previous {
                result.push(ValidationViolation::new(
                    point_field(index, "timestamp"),
                    codes::TIME_REVERSAL,
                    format!(
                        "Timestamp {} precedes previous point's timestamp {}",
                        current.to_rfc3339(),
                        previous.to_rfc3339()
                    ),
                    current,
                ));
                continue;
            }

            let elapsed = current - previous;
            if elapsed > self.max_gap {
                result.push(ValidationViolation::new(
                    point_field(index, "timestamp"),
                    codes::TIME_GAP,
                    format!(
                        "Gap of {} minutes exceeds maximum of {} minutes",
                        elapsed.num_minutes(),
                        self.max_gap.num_minutes()
                    ),
                    ViolationValue::map([
                        ("gap_seconds", elapsed.num_seconds() as f64),
                        ("max_gap_seconds", self.max_gap.num_seconds() as f64),
                    ]),
                ));
            }
        }

        Ok(result)
    }
}
