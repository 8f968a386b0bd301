//! Market Data Quality Crate
//!
//! This crate normalizes and validates market data records before they are
//! stored or consumed downstream.
//!
//! # Overview
//!
//! The crate supports three record kinds:
//! - Historical series of OHLCV bars
//! - Real-time quotes
//! - Descriptive asset metadata
//!
//! Each record goes through two stages:
//! - Normalization: timezone, scaling, defaults and forward-fill of small gaps
//! - Validation: built-in structural checks plus pluggable rules
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  Provider data   |  (already decoded into records)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   Normalizer     |  (NormalizerConfig)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |    Validator     | --> | ValidationRule*  |  (registered in order)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! | ValidationResult |  (is_valid + ordered violations)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`HistoricalSeries`] / [`PricePoint`] - Ordered OHLCV bars
//! - [`RealTimeQuote`] - Current price snapshot
//! - [`AssetMetadata`] - Descriptive asset attributes
//! - [`Normalizer`] - Deterministic record normalization
//! - [`Validator`] - Structural checks and rule execution
//! - [`Pipeline`] - Normalize-then-validate composition
//! - [`ValidationRule`] - Extension point for new checks

pub mod errors;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod rules;
pub mod validator;

pub use errors::{PipelineError, Result};

// Re-export all public types from models
pub use models::{
    codes, AssetMetadata, AssetType, HistoricalSeries, Interval, MetadataField, PricePoint,
    RealTimeQuote, Severity, Timestamp, ValidationResult, ValidationViolation, ViolationValue,
};

// Re-export normalizer types
pub use normalizer::{InterpolationMethod, Normalizer, NormalizerConfig};

// Re-export rule types
pub use rules::{
    calculate_price_range, calculate_std_dev, MetadataConsistencyRule, PriceVolatilityRule,
    TimeIntervalRule, ValidationRule, VolatilityMetric, VolumeAnomalyRule,
};

// Re-export validator and pipeline types
pub use pipeline::{Pipeline, Processed};
pub use validator::{Validator, ValidatorConfig};
