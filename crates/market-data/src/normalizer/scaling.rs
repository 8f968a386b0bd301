//! Field-wise scaling helpers.
//!
//! A value of exactly zero means "missing" and is never scaled.
//! Non-finite results collapse to zero.

use chrono_tz::Tz;

use crate::models::Timestamp;

/// Scale one price field.
pub(crate) fn scale_price(value: f64, factor: f64) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    let scaled = value * factor;
    if scaled.is_finite() {
        scaled
    } else {
        0.0
    }
}

/// Scale a volume and truncate toward zero.
pub(crate) fn scale_volume(value: i64, factor: f64) -> i64 {
    if value == 0 {
        return 0;
    }
    let scaled = (value as f64 * factor).trunc();
    if !scaled.is_finite() || scaled >= i64::MAX as f64 || scaled <= i64::MIN as f64 {
        return 0;
    }
    scaled as i64
}

/// Re-express an instant in the target zone.
pub(crate) fn rezone(timestamp: Option<Timestamp>, tz: Tz) -> Option<Timestamp> {
    timestamp.map(|ts| ts.with_timezone(&tz).fixed_offset())
}
