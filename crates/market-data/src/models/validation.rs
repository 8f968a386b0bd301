use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::Timestamp;

/// Policy weight attached to a rule.
///
/// Severity belongs to the rule that produced a violation, not to the
/// violation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    #[default]
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offending value attached to a violation, for diagnostics only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum ViolationValue {
    #[default]
    None,
    Integer(i64),
    Number(f64),
    Timestamp(Timestamp),
    Text(String),
    Map(BTreeMap<String, f64>),
}

impl ViolationValue {
    /// Build a map payload from `(key, value)` pairs.
    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        ViolationValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<f64> for ViolationValue {
    fn from(value: f64) -> Self {
        ViolationValue::Number(value)
    }
}

impl From<i64> for ViolationValue {
    fn from(value: i64) -> Self {
        ViolationValue::Integer(value)
    }
}

impl From<&str> for ViolationValue {
    fn from(value: &str) -> Self {
        ViolationValue::Text(value.to_string())
    }
}

impl From<String> for ViolationValue {
    fn from(value: String) -> Self {
        ViolationValue::Text(value)
    }
}

impl From<Timestamp> for ViolationValue {
    fn from(value: Timestamp) -> Self {
        ViolationValue::Timestamp(value)
    }
}

/// A single data-quality defect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// Path of the offending field (e.g. `data[3].volume`)
    pub field: String,

    /// Machine-readable code (see [`codes`](super::codes))
    pub code: String,

    /// Human-readable description
    pub message: String,

    /// Offending value
    #[serde(default)]
    pub value: ViolationValue,
}

impl ValidationViolation {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<ViolationValue>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
            value: value.into(),
        }
    }

    /// Violation without a diagnostic value.
    pub fn bare(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(field, code, message, ViolationValue::None)
    }
}

impl fmt::Display for ValidationViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.field, self.code, self.message)
    }
}

/// Outcome of validating one record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    /// An empty, passing result.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            violations: Vec::new(),
        }
    }

    /// Append a violation; any violation makes the result invalid.
    pub fn push(&mut self, violation: ValidationViolation) {
        self.is_valid = false;
        self.violations.push(violation);
    }

    /// Append all violations of another result, preserving order.
    pub fn extend(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.violations.extend(other.violations);
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.violations.iter().any(|v| v.code == code)
    }

    pub fn violations_with_code<'a>(
        &'a self,
        code: &'a str,
    ) -> impl Iterator<Item = &'a ValidationViolation> + 'a {
        self.violations.iter().filter(move |v| v.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Joined violation messages for logging.
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}
