use chrono::{DateTime, FixedOffset};

/// Zoned instant carried by every record.
///
/// The offset is the display zone only; comparisons and durations use the
/// underlying instant.
pub type Timestamp = DateTime<FixedOffset>;

/// Machine-readable violation codes.
pub mod codes {
    /// A required field is empty or absent.
    pub const REQUIRED: &str = "required";
    /// A numeric value is outside the configured thresholds.
    pub const RANGE: &str = "range";
    /// An OHLC or 24h high/low relationship does not hold.
    pub const LOGIC: &str = "logic";
    /// A real-time quote is older than the allowed data age.
    pub const STALE: &str = "stale";
    /// A point's timestamp precedes the previous point's.
    pub const TIME_REVERSAL: &str = "time_reversal";
    /// Two adjacent points are further apart than allowed.
    pub const TIME_GAP: &str = "time_gap";
    /// Price movement inside a window exceeds the allowed ratio.
    pub const HIGH_VOLATILITY: &str = "high_volatility";
    /// Volume exceeds a multiple of its trailing average.
    pub const VOLUME_ANOMALY: &str = "volume_anomaly";
    /// A field required for the record's asset type is empty.
    pub const REQUIRED_FOR_ASSET_TYPE: &str = "required_for_asset_type";
    /// The asset type tag could not be recognized.
    pub const UNKNOWN: &str = "unknown";
}
