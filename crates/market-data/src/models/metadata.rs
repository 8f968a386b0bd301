use std::fmt;

use serde::{Deserialize, Serialize};

use super::asset_type::AssetType;
use super::types::Timestamp;

/// Descriptive data about an asset
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub symbol: String,

    /// Provider asset type tag
    pub asset_type: String,

    /// Company/asset name
    pub name: String,

    /// Exchange name or MIC (e.g., "NASDAQ", "XNAS")
    pub exchange: String,

    /// Trading currency (ISO 4217)
    pub currency: String,

    /// Country of domicile
    pub country: String,

    pub description: String,

    /// Business sector (e.g., "Technology")
    pub sector: String,

    /// Industry within sector (e.g., "Consumer Electronics")
    pub industry: String,

    pub website: String,

    pub logo_url: String,

    /// When the provider last refreshed this record
    pub last_updated: Option<Timestamp>,
}

impl AssetMetadata {
    /// Create metadata with basic info
    pub fn new(
        symbol: impl Into<String>,
        asset_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            asset_type: asset_type.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the exchange
    pub fn exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = exchange.into();
        self
    }

    /// Set the currency
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the country
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Set the sector
    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    /// Set the industry
    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the last-updated timestamp
    pub fn last_updated(mut self, last_updated: Timestamp) -> Self {
        self.last_updated = Some(last_updated);
        self
    }

    /// Asset type resolved from the tag, if recognized.
    pub fn kind(&self) -> Option<AssetType> {
        AssetType::from_tag(&self.asset_type)
    }

    /// True when the named field is empty or whitespace only.
    pub fn is_blank(&self, field: MetadataField) -> bool {
        self.field(field).trim().is_empty()
    }

    /// Value of a named text field.
    pub fn field(&self, field: MetadataField) -> &str {
        match field {
            MetadataField::Symbol => &self.symbol,
            MetadataField::AssetType => &self.asset_type,
            MetadataField::Name => &self.name,
            MetadataField::Exchange => &self.exchange,
            MetadataField::Currency => &self.currency,
            MetadataField::Country => &self.country,
            MetadataField::Description => &self.description,
            MetadataField::Sector => &self.sector,
            MetadataField::Industry => &self.industry,
            MetadataField::Website => &self.website,
            MetadataField::LogoUrl => &self.logo_url,
        }
    }
}

/// Named text fields of [`AssetMetadata`], used by required-field tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    Symbol,
    AssetType,
    Name,
    Exchange,
    Currency,
    Country,
    Description,
    Sector,
    Industry,
    Website,
    LogoUrl,
}

impl MetadataField {
    /// Field path as reported in violations.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataField::Symbol => "symbol",
            MetadataField::AssetType => "asset_type",
            MetadataField::Name => "name",
            MetadataField::Exchange => "exchange",
            MetadataField::Currency => "currency",
            MetadataField::Country => "country",
            MetadataField::Description => "description",
            MetadataField::Sector => "sector",
            MetadataField::Industry => "industry",
            MetadataField::Website => "website",
            MetadataField::LogoUrl => "logo_url",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
