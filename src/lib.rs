//! Dashboard Worker - Market Dashboard with AI Commentary
//!
//! A market dashboard running on Cloudflare Workers. All heavy lifting
//! (scanning, scoring, AI inference) happens in an external analysis
//! backend; this worker fetches from it, normalizes what comes back, and
//! serves the dashboard UI.
//!
//! # Architecture
//! - Main entry point handles HTTP requests and serves the dashboard page
//! - `candles` turns heterogeneous OHLCV payloads into the canonical
//!   series the chart consumes
//! - `narrative` turns the AI response text into a tree of display blocks
//! - `client` wraps the backend REST API
//!
//! # Features
//! - Candlestick chart fed by normalized market data
//! - AI commentary rendered as nested section cards
//! - Trade setups table from the backend's best-trades scan
//! - 30-second auto-refresh

// Clippy configuration for market-data patterns
#![allow(clippy::cast_possible_truncation)] // Epoch second casts are bounded
#![allow(clippy::cast_precision_loss)] // Float casts OK for display
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // Worker framework patterns

mod candles;
mod client;
mod config;
mod dashboard;
mod error;
mod narrative;
mod types;

use worker::{Context, Env, Request, Response, Router, console_log, event};

pub use candles::{CanonicalCandle, NormalizePolicy, normalize, normalize_with};
pub use client::BackendClient;
pub use config::Config;
pub use error::DashboardError;
pub use narrative::{Block, RenderPolicy, render, render_with};
pub use types::*;

/// Result type alias for worker operations
type WResult<T> = std::result::Result<T, worker::Error>;

/// Main Worker entry point
#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> WResult<Response> {
    console_error_panic_hook::set_once();

    let router = Router::new();

    router
        // Health check
        .get_async("/health", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };

            Response::from_json(&serde_json::json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "environment": config.environment,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }))
        })
        // Dashboard UI
        .get("/", |_req, _ctx| {
            Response::from_html(dashboard::dashboard_html())
        })
        .get("/dashboard", |_req, _ctx| {
            Response::from_html(dashboard::dashboard_html())
        })
        // Selector options for the dashboard
        .get_async("/api/config", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };

            Response::from_json(&serde_json::json!({
                "symbols": config.symbols,
                "default_timeframe": config.default_timeframe.as_str(),
                "candle_limit": config.candle_limit,
            }))
        })
        // Canonical candle series for the chart
        .get_async("/api/candles/:asset/:symbol", |req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };
            let client = BackendClient::from_config(&config);

            let Some(asset) = ctx.param("asset").and_then(|a| a.parse::<AssetType>().ok())
            else {
                return Response::from_json(&serde_json::json!({
                    "error": "Unknown asset type"
                }));
            };
            let Some(symbol) = ctx.param("symbol").map(|s| s.replace("%2F", "/")) else {
                return Response::from_json(&serde_json::json!({
                    "error": "Missing symbol"
                }));
            };

            let timeframe = query_param(&req, "timeframe")
                .and_then(|v| v.parse().ok())
                .unwrap_or(config.default_timeframe);
            let limit = query_param(&req, "limit")
                .and_then(|v| v.parse().ok())
                .unwrap_or(config.candle_limit);

            match client.get_candles(asset, &symbol, timeframe, limit).await {
                Ok(series) => Response::from_json(&serde_json::json!({
                    "symbol": symbol,
                    "timeframe": timeframe.as_str(),
                    "count": series.len(),
                    "candles": series,
                })),
                // Well-formed but empty: an empty state, not an error banner
                Err(DashboardError::NoData) => Response::from_json(&serde_json::json!({
                    "symbol": symbol,
                    "timeframe": timeframe.as_str(),
                    "count": 0,
                    "candles": [],
                    "empty": true,
                    "message": "No market data for this selection yet",
                })),
                Err(e) => {
                    console_log!("Candle fetch failed for {}: {}", symbol, e);
                    Response::from_json(&serde_json::json!({
                        "error": format!("{e}")
                    }))
                }
            }
        })
        // AI commentary as a display-block tree
        .get_async("/api/analysis/:symbol", |req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };
            let client = BackendClient::from_config(&config);

            let Some(symbol) = ctx.param("symbol").map(|s| s.replace("%2F", "/")) else {
                return Response::from_json(&serde_json::json!({
                    "error": "Missing symbol"
                }));
            };
            let timeframe = query_param(&req, "timeframe")
                .and_then(|v| v.parse().ok())
                .unwrap_or(config.default_timeframe);

            match client.get_analysis_blocks(&symbol, timeframe).await {
                Ok(blocks) => Response::from_json(&serde_json::json!({
                    "symbol": symbol,
                    "timeframe": timeframe.as_str(),
                    "blocks": blocks,
                })),
                Err(e) => {
                    console_log!("Analysis fetch failed for {}: {}", symbol, e);
                    Response::from_json(&serde_json::json!({
                        "error": format!("{e}")
                    }))
                }
            }
        })
        // Trade setups table
        .get_async("/api/setups", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };
            let client = BackendClient::from_config(&config);

            match client.get_trade_setups().await {
                Ok(setups) => {
                    let rows: Vec<_> = setups
                        .iter()
                        .map(|s| {
                            serde_json::json!({
                                "symbol": s.symbol,
                                "direction": s.direction.to_string(),
                                "confidence": format!("{:.0}%", s.confidence),
                                "entry": format!("{:.4}", s.entry),
                                "stop_loss": format!("{:.4}", s.stop_loss),
                                "take_profit": format!("{:.4}", s.take_profit),
                                "risk_reward": s.risk_reward()
                                    .map(|rr| format!("{rr:.1}R")),
                                "reasoning": s.reasoning,
                            })
                        })
                        .collect();
                    Response::from_json(&serde_json::json!({
                        "count": rows.len(),
                        "setups": rows,
                    }))
                }
                Err(e) => {
                    console_log!("Setups fetch failed: {}", e);
                    Response::from_json(&serde_json::json!({
                        "error": format!("{e}")
                    }))
                }
            }
        })
        // Live price + series summary for the header strip
        .get_async("/api/overview/:asset/:symbol", |req, ctx| async move {
            let Some(asset) = ctx.param("asset").and_then(|a| a.parse::<AssetType>().ok())
            else {
                return Response::from_json(&serde_json::json!({
                    "error": "Unknown asset type"
                }));
            };
            let Some(symbol) = ctx.param("symbol").map(|s| s.replace("%2F", "/")) else {
                return Response::from_json(&serde_json::json!({
                    "error": "Missing symbol"
                }));
            };
            let timeframe = query_param(&req, "timeframe").and_then(|v| v.parse().ok());

            match symbol_overview(&ctx.env, asset, &symbol, timeframe).await {
                Ok(result) => Response::from_json(&result),
                Err(e) => {
                    console_log!("Overview fetch failed for {}: {}", symbol, e);
                    Response::from_json(&serde_json::json!({
                        "error": format!("{e}")
                    }))
                }
            }
        })
        // Fallback
        .run(req, env)
        .await
}

/// Pull a query parameter from the request URL
fn query_param(req: &Request, name: &str) -> Option<String> {
    req.url().ok().and_then(|url| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    })
}

/// Build the overview payload: live price and a candle-series summary,
/// fetched concurrently.
async fn symbol_overview(
    env: &Env,
    asset: AssetType,
    symbol: &str,
    timeframe: Option<Timeframe>,
) -> std::result::Result<serde_json::Value, DashboardError> {
    let config = Config::from_env(env)?;
    let client = BackendClient::from_config(&config);
    let timeframe = timeframe.unwrap_or(config.default_timeframe);

    let (price, series) = futures::join!(
        client.get_price(symbol),
        client.get_candles(asset, symbol, timeframe, config.candle_limit),
    );

    // The overview degrades per-panel instead of failing whole
    let price = price.ok();
    let series = series.unwrap_or_default();
    let last_close = series.last().map(|c| c.close);

    Ok(serde_json::json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "symbol": symbol,
        "asset": asset.as_str(),
        "timeframe": timeframe.as_str(),
        "price": price,
        "last_close": last_close,
        "candle_count": series.len(),
    }))
}
