//! Deterministic normalization of provider records.
//!
//! The normalizer never rejects data; deciding fitness is validation's job.
//! Its only error is an absent input record.
//!
//! For historical series, in order:
//! 1. Re-express timestamps in the target zone (the instant is unchanged)
//! 2. Scale price and volume fields, leaving zero ("missing") fields at zero
//! 3. Replace non-finite scaled values with zero
//! 4. Keep input order (series are never re-sorted)
//! 5. Forward-fill missing values across small close-to-close gaps

mod config;
mod interpolation;
mod scaling;

pub use config::{InterpolationMethod, NormalizerConfig, DEFAULT_CURRENCY, DEFAULT_MAX_GAP_RATIO};
pub use interpolation::{forward_fill, gap_ratio, FillStats};

use log::debug;

use crate::errors::{PipelineError, Result};
use crate::models::{AssetMetadata, HistoricalSeries, MetadataField, PricePoint, RealTimeQuote};

use scaling::{rezone, scale_price, scale_volume};

/// Record normalizer.
///
/// Stateless per call: every method reads only its input and the
/// configuration, and returns a freshly allocated record.
#[derive(Clone, Debug, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Create a normalizer with default configuration.
    pub fn new() -> Self {
        Self {
            config: NormalizerConfig::default(),
        }
    }

    /// Create a normalizer with custom configuration.
    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Create a normalizer, rejecting unusable configuration values.
    pub fn try_with_config(config: NormalizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize a historical series.
    pub fn normalize_historical(
        &self,
        series: Option<&HistoricalSeries>,
    ) -> Result<HistoricalSeries> {
        let series = series.ok_or_else(|| {
            PipelineError::InvalidInput("historical series is absent".to_string())
        })?;

        let mut data: Vec<PricePoint> = series
            .data
            .iter()
            .map(|point| self.normalize_point(point))
            .collect();

        if self.config.interpolation.is_enabled() {
            let stats = forward_fill(&mut data, self.config.max_gap_ratio);
            debug!(
                "Normalized {} ({} points): {} fields filled, {} pairs skipped as large moves",
                series.symbol,
                data.len(),
                stats.filled_fields,
                stats.skipped_pairs
            );
        }

        Ok(HistoricalSeries {
            symbol: sanitize_text(&series.symbol),
            asset_type: series.asset_type.clone(),
            interval: series.interval,
            data,
        })
    }

    /// Normalize a real-time quote. Percent change is never rescaled.
    pub fn normalize_real_time(&self, quote: Option<&RealTimeQuote>) -> Result<RealTimeQuote> {
        let quote = quote
            .ok_or_else(|| PipelineError::InvalidInput("real-time quote is absent".to_string()))?;
        let scale = self.config.price_scale;

        Ok(RealTimeQuote {
            symbol: sanitize_text(&quote.symbol),
            asset_type: quote.asset_type.clone(),
            price: scale_price(quote.price, scale),
            timestamp: rezone(quote.timestamp, self.config.target_timezone),
            change: scale_price(quote.change, scale),
            change_percent: quote.change_percent,
            volume: scale_volume(quote.volume, self.config.volume_scale),
            market_cap: scale_price(quote.market_cap, scale),
            high_24h: scale_price(quote.high_24h, scale),
            low_24h: scale_price(quote.low_24h, scale),
        })
    }

    /// Normalize asset metadata.
    pub fn normalize_metadata(&self, metadata: Option<&AssetMetadata>) -> Result<AssetMetadata> {
        let metadata = metadata
            .ok_or_else(|| PipelineError::InvalidInput("asset metadata is absent".to_string()))?;

        let currency = if metadata.is_blank(MetadataField::Currency) {
            self.config.default_currency.clone()
        } else {
            sanitize_text(&metadata.currency)
        };

        Ok(AssetMetadata {
            symbol: sanitize_text(&metadata.symbol),
            asset_type: metadata.asset_type.clone(),
            name: sanitize_text(&metadata.name),
            exchange: sanitize_text(&metadata.exchange),
            currency,
            country: sanitize_text(&metadata.country),
            description: sanitize_text(&metadata.description),
            sector: sanitize_text(&metadata.sector),
            industry: sanitize_text(&metadata.industry),
            website: sanitize_text(&metadata.website),
            logo_url: sanitize_text(&metadata.logo_url),
            last_updated: rezone(metadata.last_updated, self.config.target_timezone),
        })
    }

    fn normalize_point(&self, point: &PricePoint) -> PricePoint {
        let scale = self.config.price_scale;
        PricePoint {
            timestamp: rezone(point.timestamp, self.config.target_timezone),
            open: scale_price(point.open, scale),
            high: scale_price(point.high, scale),
            low: scale_price(point.low, scale),
            close: scale_price(point.close, scale),
            adj_close: scale_price(point.adj_close, scale),
            volume: scale_volume(point.volume, self.config.volume_scale),
        }
    }
}

/// Hook for text cleanup. Currently passes text through unchanged.
fn sanitize_text(value: &str) -> String {
    value.to_string()
}
