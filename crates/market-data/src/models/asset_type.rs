use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::errors::PipelineError;

/// Asset classification carried by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Stock,
    Bond,
    Etf,
    Crypto,
    Commodity,
    Future,
    Forex,
    Index,
    MutualFund,
}

// Keys are lowercase and trimmed; lookups normalize the tag the same way.
lazy_static! {
    static ref ASSET_TYPE_SYNONYMS: HashMap<&'static str, AssetType> = {
        let mut m = HashMap::new();
        for (tag, kind) in [
            ("stock", AssetType::Stock),
            ("stocks", AssetType::Stock),
            ("equity", AssetType::Stock),
            ("equities", AssetType::Stock),
            ("common stock", AssetType::Stock),
            ("share", AssetType::Stock),
            ("shares", AssetType::Stock),
            ("bond", AssetType::Bond),
            ("bonds", AssetType::Bond),
            ("fixed income", AssetType::Bond),
            ("etf", AssetType::Etf),
            ("etfs", AssetType::Etf),
            ("exchange-traded fund", AssetType::Etf),
            ("exchange traded fund", AssetType::Etf),
            ("crypto", AssetType::Crypto),
            ("cryptocurrency", AssetType::Crypto),
            ("digital asset", AssetType::Crypto),
            ("coin", AssetType::Crypto),
            ("token", AssetType::Crypto),
            ("commodity", AssetType::Commodity),
            ("commodities", AssetType::Commodity),
            ("future", AssetType::Future),
            ("futures", AssetType::Future),
            ("forex", AssetType::Forex),
            ("fx", AssetType::Forex),
            ("foreign exchange", AssetType::Forex),
            ("currency", AssetType::Forex),
            ("index", AssetType::Index),
            ("indices", AssetType::Index),
            ("indexes", AssetType::Index),
            ("mutual_fund", AssetType::MutualFund),
            ("mutual fund", AssetType::MutualFund),
            ("mutualfund", AssetType::MutualFund),
            ("fund", AssetType::MutualFund),
        ] {
            m.insert(tag, kind);
        }
        m
    };
}

impl AssetType {
    /// All asset types in declaration order.
    pub const ALL: [AssetType; 9] = [
        AssetType::Stock,
        AssetType::Bond,
        AssetType::Etf,
        AssetType::Crypto,
        AssetType::Commodity,
        AssetType::Future,
        AssetType::Forex,
        AssetType::Index,
        AssetType::MutualFund,
    ];

    /// Canonical tag, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "stock",
            AssetType::Bond => "bond",
            AssetType::Etf => "etf",
            AssetType::Crypto => "crypto",
            AssetType::Commodity => "commodity",
            AssetType::Future => "future",
            AssetType::Forex => "forex",
            AssetType::Index => "index",
            AssetType::MutualFund => "mutual_fund",
        }
    }

    /// Resolves a provider tag through the case-insensitive synonym table.
    ///
    /// Returns `None` for empty or unrecognized tags.
    pub fn from_tag(tag: &str) -> Option<AssetType> {
        let key = tag.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        ASSET_TYPE_SYNONYMS.get(key.as_str()).copied()
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetType::from_tag(s)
            .ok_or_else(|| PipelineError::InvalidInput(format!("unknown asset type: {}", s)))
    }
}
