//! Error types for the normalization and validation pipeline.
//!
//! Only conditions that stop a call are errors. Data quality problems
//! (out-of-range prices, OHLC inconsistencies, stale quotes, anomalies,
//! metadata gaps) are reported as violations inside a successfully
//! returned [`ValidationResult`](crate::models::ValidationResult).

use thiserror::Error;

/// Errors that can occur while normalizing or validating market data.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The record handed to an entry point was absent.
    /// Always fatal for the call; there is nothing to retry.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A registered rule failed while executing.
    /// The engine aborts the validation call instead of skipping the rule.
    #[error("Rule '{rule}' failed")]
    RuleExecution {
        /// Name of the rule that failed
        rule: String,
        /// The error the rule returned
        #[source]
        source: Box<PipelineError>,
    },

    /// Raised by a rule implementation to signal it could not evaluate the record.
    #[error("Rule failed: {message}")]
    RuleFailed {
        /// Description of the failure
        message: String,
    },

    /// A configuration value was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Wraps an error returned by a rule with the rule's name.
    pub fn rule_execution(rule: impl Into<String>, source: PipelineError) -> Self {
        Self::RuleExecution {
            rule: rule.into(),
            source: Box::new(source),
        }
    }

    /// Returns true if this error was caused by an absent record.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_input_display() {
        let error = PipelineError::InvalidInput("historical series is absent".to_string());
        assert_eq!(
            format!("{}", error),
            "Invalid input: historical series is absent"
        );
        assert!(error.is_invalid_input());
    }

    #[test]
    fn test_rule_execution_keeps_source() {
        let error = PipelineError::rule_execution(
            "price_volatility",
            PipelineError::RuleFailed {
                message: "window overflow".to_string(),
            },
        );

        assert_eq!(format!("{}", error), "Rule 'price_volatility' failed");
        assert!(!error.is_invalid_input());

        let source = error.source().expect("source should be attached");
        assert_eq!(source.to_string(), "Rule failed: window overflow");
    }

    #[test]
    fn test_invalid_config_display() {
        let error = PipelineError::InvalidConfig("price_scale must be finite".to_string());
        assert_eq!(
            format!("{}", error),
            "Invalid configuration: price_scale must be finite"
        );
    }
}
