use serde::{Deserialize, Serialize};

use super::asset_type::AssetType;
use super::types::Timestamp;

/// Real-time market quote
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RealTimeQuote {
    pub symbol: String,

    /// Provider asset type tag
    pub asset_type: String,

    /// Current/last traded price
    pub price: f64,

    /// Timestamp of the quote; `None` when the provider did not supply one
    pub timestamp: Option<Timestamp>,

    /// Absolute change since the previous close
    pub change: f64,

    /// Percent change since the previous close (never rescaled)
    pub change_percent: f64,

    pub volume: i64,

    pub market_cap: f64,

    #[serde(rename = "high24h")]
    pub high_24h: f64,

    #[serde(rename = "low24h")]
    pub low_24h: f64,
}

impl RealTimeQuote {
    /// Create a quote with minimal required fields
    pub fn new(
        symbol: impl Into<String>,
        asset_type: impl Into<String>,
        price: f64,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            asset_type: asset_type.into(),
            price,
            timestamp: Some(timestamp),
            ..Default::default()
        }
    }

    /// Set the 24h trading range
    pub fn with_range_24h(mut self, low: f64, high: f64) -> Self {
        self.low_24h = low;
        self.high_24h = high;
        self
    }

    /// Set the absolute and percent change
    pub fn with_change(mut self, change: f64, change_percent: f64) -> Self {
        self.change = change;
        self.change_percent = change_percent;
        self
    }

    pub fn with_volume(mut self, volume: i64) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = market_cap;
        self
    }

    /// Asset type resolved from the tag, if recognized.
    pub fn kind(&self) -> Option<AssetType> {
        AssetType::from_tag(&self.asset_type)
    }
}
