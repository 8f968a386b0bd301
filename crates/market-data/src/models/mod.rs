//! Market data models
//!
//! This module contains the canonical records handed through the pipeline:
//! - `types` - Timestamp alias and violation codes
//! - `asset_type` - AssetType enum and its tag synonym table
//! - `interval` - Sampling granularity of historical series
//! - `series` - Historical series of OHLCV bars (HistoricalSeries, PricePoint)
//! - `quote` - Real-time quote (RealTimeQuote)
//! - `metadata` - Descriptive asset data (AssetMetadata, MetadataField)
//! - `validation` - Validation outcome types (ValidationResult, ValidationViolation, Severity)

mod asset_type;
mod interval;
mod metadata;
mod quote;
mod series;
mod types;
mod validation;

pub use asset_type::AssetType;
pub use interval::Interval;
pub use metadata::{AssetMetadata, MetadataField};
pub use quote::RealTimeQuote;
pub use series::{HistoricalSeries, PricePoint};
pub use types::{codes, Timestamp};
pub use validation::{Severity, ValidationResult, ValidationViolation, ViolationValue};
