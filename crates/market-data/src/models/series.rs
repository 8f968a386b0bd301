use serde::{Deserialize, Serialize};

use super::asset_type::AssetType;
use super::interval::Interval;
use super::types::Timestamp;

/// One OHLCV bar.
///
/// A price field of exactly zero means the provider did not supply it.
/// `low <= {open, close} <= high` is checked by validation, not enforced here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Bar timestamp; `None` when the provider did not supply one
    pub timestamp: Option<Timestamp>,

    pub open: f64,

    pub high: f64,

    pub low: f64,

    pub close: f64,

    /// Close adjusted for splits and dividends
    pub adj_close: f64,

    pub volume: i64,
}

impl PricePoint {
    /// Create a full OHLCV bar; adjusted close defaults to close.
    pub fn ohlcv(
        timestamp: Timestamp,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: i64,
    ) -> Self {
        Self {
            timestamp: Some(timestamp),
            open,
            high,
            low,
            close,
            adj_close: close,
            volume,
        }
    }

    /// Set the adjusted close.
    pub fn with_adj_close(mut self, adj_close: f64) -> Self {
        self.adj_close = adj_close;
        self
    }
}

/// Ordered series of bars for one symbol.
///
/// Points are expected in ascending timestamp order. The pipeline never
/// re-sorts them; ordering defects are reported by validation rules.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub symbol: String,

    /// Provider asset type tag (e.g. "stock", "Equities", "ETF")
    pub asset_type: String,

    pub interval: Interval,

    pub data: Vec<PricePoint>,
}

impl HistoricalSeries {
    pub fn new(
        symbol: impl Into<String>,
        asset_type: impl Into<String>,
        interval: Interval,
        data: Vec<PricePoint>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            asset_type: asset_type.into(),
            interval,
            data,
        }
    }

    /// Asset type resolved from the tag, if recognized.
    pub fn kind(&self) -> Option<AssetType> {
        AssetType::from_tag(&self.asset_type)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_ohlcv_defaults_adj_close_to_close() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap().fixed_offset();
        let point = PricePoint::ohlcv(ts, 100.0, 105.0, 95.0, 102.0, 1_000);

        assert_eq!(point.adj_close, 102.0);
        assert_eq!(point.with_adj_close(101.5).adj_close, 101.5);
    }

    #[test]
    fn test_series_kind_resolves_tag() {
        let series = HistoricalSeries::new("AAPL", "Equities", Interval::OneDay, Vec::new());
        assert_eq!(series.kind(), Some(AssetType::Stock));
        assert!(series.is_empty());
    }

    #[test]
    fn test_series_deserializes_from_json() {
        let json = r#"{
            "symbol": "SPY",
            "asset_type": "etf",
            "interval": "1d",
            "data": [
                {"timestamp": "2024-01-02T00:00:00Z", "open": 470.0, "high": 475.0,
                 "low": 468.0, "close": 472.0, "adj_close": 472.0, "volume": 1000}
            ]
        }"#;

        let series: HistoricalSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.interval, Interval::OneDay);
        assert!(series.data[0].timestamp.is_some());
    }
}
