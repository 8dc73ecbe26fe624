//! Analysis backend API client
//!
//! Thin typed wrappers over the backend REST API:
//! - raw market data (OHLCV payloads of loosely guaranteed shape)
//! - AI narrative text for the analysis panel
//! - best-trades scan results and live prices (pass-through display)
//!
//! Every request carries an `X-Request-Id` header so failures can be
//! correlated in the backend logs.

use serde::Deserialize;
use serde_json::Value;

use crate::candles::{self, CanonicalCandle, NormalizePolicy};
use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::narrative::{self, Block, RenderPolicy};
use crate::types::{AssetType, PriceInfo, Timeframe, TradeSetup};

/// Analysis backend API client
pub struct BackendClient {
    base_url: String,
    normalize_policy: NormalizePolicy,
    render_policy: RenderPolicy,
}

/// Wrapper some backend deployments put around the setups array
#[derive(Debug, Deserialize)]
struct SetupsResponse {
    setups: Vec<TradeSetup>,
}

impl BackendClient {
    /// Create a client against a backend base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            normalize_policy: NormalizePolicy::default(),
            render_policy: RenderPolicy::default(),
        }
    }

    /// Create a client with the pipeline policies from config
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            normalize_policy: config.normalize_policy(),
            render_policy: config.render_policy(),
        }
    }

    /// Fetch the raw market-data payload for a symbol, shape unverified
    pub async fn get_market_data(
        &self,
        asset: AssetType,
        symbol: &str,
        timeframe: Timeframe,
        limit: u32,
    ) -> Result<Value> {
        let path = format!(
            "/market-data/{}/{}?timeframe={}&limit={limit}",
            asset.as_str(),
            encode_symbol(symbol),
            timeframe.as_str(),
        );
        self.get(&path).await
    }

    /// Fetch and normalize the canonical candle series
    pub async fn get_candles(
        &self,
        asset: AssetType,
        symbol: &str,
        timeframe: Timeframe,
        limit: u32,
    ) -> Result<Vec<CanonicalCandle>> {
        let raw = self.get_market_data(asset, symbol, timeframe, limit).await?;
        candles::normalize_with(&raw, &self.normalize_policy)
    }

    /// Fetch the AI narrative text for a symbol
    pub async fn get_analysis(&self, symbol: &str, timeframe: Timeframe) -> Result<String> {
        let path = format!(
            "/ai-analysis/analyze?symbol={}&timeframe={}",
            encode_symbol(symbol),
            timeframe.as_str(),
        );
        let payload: Value = self.get(&path).await?;

        analysis_text(&payload)
            .map(str::to_string)
            .ok_or_else(|| DashboardError::Backend(format!("No analysis text for {symbol}")))
    }

    /// Fetch the AI narrative and render it into display blocks
    pub async fn get_analysis_blocks(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<Block>> {
        let text = self.get_analysis(symbol, timeframe).await?;
        Ok(narrative::render_with(&text, &self.render_policy))
    }

    /// Fetch the current best-trades scan
    pub async fn get_trade_setups(&self) -> Result<Vec<TradeSetup>> {
        let payload: Value = self.get("/best-trades/top").await?;
        parse_setups(payload)
    }

    /// Fetch a live price snapshot
    pub async fn get_price(&self, symbol: &str) -> Result<PriceInfo> {
        let path = format!("/market-data/price?symbol={}", encode_symbol(symbol));
        self.get(&path).await
    }

    /// Perform a GET request against the backend
    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let request_id = uuid::Uuid::new_v4().to_string();

        let response = reqwest::Client::new()
            .get(&url)
            .header("Content-Type", "application/json")
            .header("X-Request-Id", request_id.as_str())
            .send()
            .await?;

        Self::handle_response(response, &request_id).await
    }

    /// Handle a backend response, checking for errors
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
        request_id: &str,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            return Err(DashboardError::Backend(format!(
                "HTTP {status} (request {request_id}): {error_text}"
            )));
        }

        response.json().await.map_err(DashboardError::from)
    }
}

/// Extract the narrative string from an analysis response.
///
/// The backend answers with `analysis`; degraded deployments answer with a
/// plain `message` instead.
fn analysis_text(payload: &Value) -> Option<&str> {
    payload
        .get("analysis")
        .and_then(Value::as_str)
        .or_else(|| payload.get("message").and_then(Value::as_str))
}

/// Accept both a bare setups array and a `{"setups": [...]}` wrapper.
fn parse_setups(payload: Value) -> Result<Vec<TradeSetup>> {
    if payload.is_array() {
        return serde_json::from_value(payload).map_err(DashboardError::from);
    }
    let wrapped: SetupsResponse = serde_json::from_value(payload)?;
    Ok(wrapped.setups)
}

/// Pair symbols contain slashes; keep them from splitting the URL path
fn encode_symbol(symbol: &str) -> String {
    symbol.replace('/', "%2F")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_symbol() {
        assert_eq!(encode_symbol("BTC/USDT"), "BTC%2FUSDT");
        assert_eq!(encode_symbol("AAPL"), "AAPL");
    }

    #[test]
    fn test_analysis_text_prefers_analysis_field() {
        let payload = json!({"analysis": "## 📊 Overview", "message": "fallback"});
        assert_eq!(analysis_text(&payload), Some("## 📊 Overview"));

        let degraded = json!({"available": false, "message": "AI not configured"});
        assert_eq!(analysis_text(&degraded), Some("AI not configured"));

        assert_eq!(analysis_text(&json!({"available": false})), None);
    }

    #[test]
    fn test_parse_setups_accepts_both_shapes() {
        let setup = json!({
            "symbol": "BTC/USDT",
            "direction": "LONG",
            "confidence": 78.0,
            "entry": 50_000.0,
            "stop_loss": 49_000.0,
            "take_profit": 53_000.0
        });

        let bare = parse_setups(json!([setup])).unwrap();
        let wrapped = parse_setups(json!({"setups": [setup]})).unwrap();

        assert_eq!(bare.len(), 1);
        assert_eq!(wrapped.len(), 1);
        assert_eq!(bare[0].symbol, "BTC/USDT");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = BackendClient::new("http://localhost:8000/api/");
        assert_eq!(client.base_url, "http://localhost:8000/api");
    }
}
