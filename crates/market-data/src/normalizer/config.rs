use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{PipelineError, Result};

/// Default currency substituted into metadata without one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Default maximum close-to-close move that is still treated as missing data.
pub const DEFAULT_MAX_GAP_RATIO: f64 = 0.10;

/// How missing values in a historical series are filled.
///
/// Every method except `Disabled` currently forward-fills from the previous
/// point; `Linear` and `Zero` are accepted as aliases of `Previous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    #[default]
    Linear,
    Previous,
    Zero,
    /// Leave missing values untouched.
    #[serde(rename = "none")]
    Disabled,
}

impl InterpolationMethod {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, InterpolationMethod::Disabled)
    }
}

/// Normalizer configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Zone every timestamp is re-expressed in.
    pub target_timezone: Tz,
    /// Currency substituted into metadata with an empty currency.
    pub default_currency: String,
    /// Gap-fill method for historical series.
    pub interpolation: InterpolationMethod,
    /// Multiplier applied to every price field.
    pub price_scale: f64,
    /// Multiplier applied to volumes before truncation.
    pub volume_scale: f64,
    /// Close-to-close ratio above which a pair is not gap-filled.
    pub max_gap_ratio: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            target_timezone: Tz::UTC,
            default_currency: DEFAULT_CURRENCY.to_string(),
            interpolation: InterpolationMethod::default(),
            price_scale: 1.0,
            volume_scale: 1.0,
            max_gap_ratio: DEFAULT_MAX_GAP_RATIO,
        }
    }
}

impl NormalizerConfig {
    /// Reject scale factors and ratios that cannot produce meaningful output.
    pub fn validate(&self) -> Result<()> {
        if !self.price_scale.is_finite() {
            return Err(PipelineError::InvalidConfig(format!(
                "price_scale must be finite, got {}",
                self.price_scale
            )));
        }
        if !self.volume_scale.is_finite() {
            return Err(PipelineError::InvalidConfig(format!(
                "volume_scale must be finite, got {}",
                self.volume_scale
            )));
        }
        if self.max_gap_ratio.is_nan() || self.max_gap_ratio < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "max_gap_ratio must be non-negative, got {}",
                self.max_gap_ratio
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NormalizerConfig::default();
        assert_eq!(config.target_timezone, Tz::UTC);
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.interpolation, InterpolationMethod::Linear);
        assert_eq!(config.price_scale, 1.0);
        assert_eq!(config.volume_scale, 1.0);
        assert_eq!(config.max_gap_ratio, 0.10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: NormalizerConfig = serde_json::from_str(
            r#"{"target_timezone": "America/New_York", "interpolation": "none", "price_scale": 0.01}"#,
        )
        .unwrap();

        assert_eq!(config.target_timezone, chrono_tz::America::New_York);
        assert_eq!(config.interpolation, InterpolationMethod::Disabled);
        assert!(!config.interpolation.is_enabled());
        assert_eq!(config.price_scale, 0.01);
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.max_gap_ratio, 0.10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = NormalizerConfig {
            price_scale: f64::INFINITY,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = NormalizerConfig {
            max_gap_ratio: -0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
