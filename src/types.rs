//! Common types for the dashboard
//!
//! Shared data structures used across modules: asset classes, timeframes,
//! and the pass-through display payloads fetched from the analysis backend.

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Asset class recognized by the analysis backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Crypto,
    Stock,
    Commodity,
    Index,
    Forex,
}

impl AssetType {
    /// Path segment used by the backend's market-data routes
    pub fn as_str(self) -> &'static str {
        match self {
            AssetType::Crypto => "crypto",
            AssetType::Stock => "stock",
            AssetType::Commodity => "commodity",
            AssetType::Index => "index",
            AssetType::Forex => "forex",
        }
    }
}

impl std::str::FromStr for AssetType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crypto" => Ok(AssetType::Crypto),
            "stock" => Ok(AssetType::Stock),
            "commodity" => Ok(AssetType::Commodity),
            "index" => Ok(AssetType::Index),
            "forex" => Ok(AssetType::Forex),
            other => Err(DashboardError::Config(format!(
                "Unknown asset type: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Chart timeframe offered by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[default]
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "1d")]
    D1,
    #[serde(rename = "1w")]
    W1,
}

impl Timeframe {
    /// Query-string value used by the backend
    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "1d",
            Timeframe::W1 => "1w",
        }
    }
}

impl std::str::FromStr for Timeframe {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" => Ok(Timeframe::M1),
            "5m" => Ok(Timeframe::M5),
            "15m" => Ok(Timeframe::M15),
            "1h" => Ok(Timeframe::H1),
            "4h" => Ok(Timeframe::H4),
            "1d" => Ok(Timeframe::D1),
            "1w" => Ok(Timeframe::W1),
            other => Err(DashboardError::Config(format!(
                "Unknown timeframe: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trade direction called by the AI scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
    Neutral,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
            Direction::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// AI-validated trade setup from the backend's best-trades scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeSetup {
    pub symbol: String,
    pub direction: Direction,
    /// Confidence score 0-100
    pub confidence: f64,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl TradeSetup {
    /// Risk/reward ratio implied by the exit levels
    pub fn risk_reward(&self) -> Option<f64> {
        let risk = (self.entry - self.stop_loss).abs();
        let reward = (self.take_profit - self.entry).abs();
        (risk > 0.0).then(|| reward / risk)
    }
}

/// Live price snapshot from the backend's price endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceInfo {
    pub symbol: String,
    pub price: f64,
    #[serde(default)]
    pub change_24h: f64,
    #[serde(default)]
    pub volume_24h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_24h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_24h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_type_round_trip() {
        for asset in [
            AssetType::Crypto,
            AssetType::Stock,
            AssetType::Commodity,
            AssetType::Index,
            AssetType::Forex,
        ] {
            assert_eq!(asset.as_str().parse::<AssetType>().unwrap(), asset);
        }
        assert!("bond".parse::<AssetType>().is_err());
    }

    #[test]
    fn test_timeframe_round_trip() {
        for tf in [
            Timeframe::M1,
            Timeframe::M5,
            Timeframe::M15,
            Timeframe::H1,
            Timeframe::H4,
            Timeframe::D1,
            Timeframe::W1,
        ] {
            assert_eq!(tf.as_str().parse::<Timeframe>().unwrap(), tf);
        }
        assert_eq!(Timeframe::default(), Timeframe::H1);
    }

    #[test]
    fn test_direction_deserializes_uppercase() {
        let setup = serde_json::json!({
            "symbol": "BTC/USDT",
            "direction": "LONG",
            "confidence": 78.0,
            "entry": 50_000.0,
            "stop_loss": 49_000.0,
            "take_profit": 53_000.0
        });
        let setup: TradeSetup = serde_json::from_value(setup).unwrap();
        assert_eq!(setup.direction, Direction::Long);
    }

    #[test]
    fn test_risk_reward() {
        let setup = TradeSetup {
            symbol: "BTC/USDT".to_string(),
            direction: Direction::Long,
            confidence: 80.0,
            entry: 50_000.0,
            stop_loss: 49_000.0,
            take_profit: 53_000.0,
            reasoning: None,
            timestamp: None,
        };
        assert_eq!(setup.risk_reward(), Some(3.0));

        let flat = TradeSetup {
            stop_loss: 50_000.0,
            ..setup
        };
        assert_eq!(flat.risk_reward(), None);
    }
}
