//! Configuration management for the dashboard worker

use worker::Env;

use crate::candles::NormalizePolicy;
use crate::error::{DashboardError, Result};
use crate::narrative::RenderPolicy;
use crate::types::Timeframe;

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    /// Log level
    pub log_level: String,

    /// Base URL of the analysis backend API
    pub backend_url: String,

    /// Chart defaults
    pub default_timeframe: Timeframe,
    pub candle_limit: u32,

    /// Symbols offered in the dashboard selector
    pub symbols: Vec<String>,

    /// Candle pipeline: collapse duplicate timestamps
    /// (off by default - upstream duplicates pass through)
    pub dedup_candles: bool,

    /// Narrative pipeline: surface headerless text at the root
    /// (off by default - headerless text stays invisible)
    pub keep_orphan_blocks: bool,
}

impl Config {
    /// Load configuration from Cloudflare environment variables
    pub fn from_env(env: &Env) -> Result<Self> {
        Ok(Self {
            environment: env
                .var("ENVIRONMENT")
                .map_or_else(|_| "production".to_string(), |v| v.to_string()),

            log_level: env
                .var("LOG_LEVEL")
                .map_or_else(|_| "info".to_string(), |v| v.to_string()),

            backend_url: env
                .var("BACKEND_URL")
                .map_or_else(|_| "http://localhost:8000/api".to_string(), |v| v.to_string()),

            default_timeframe: env
                .var("DEFAULT_TIMEFRAME")
                .map(|v| v.to_string().parse().unwrap_or_default())
                .unwrap_or_default(),

            candle_limit: env
                .var("CANDLE_LIMIT")
                .map(|v| v.to_string().parse().unwrap_or(300))
                .unwrap_or(300),

            symbols: env
                .var("SYMBOLS")
                .map(|v| v.to_string().split(',').map(String::from).collect())
                .unwrap_or_else(|_| {
                    vec![
                        "BTC/USDT".to_string(),
                        "ETH/USDT".to_string(),
                        "SOL/USDT".to_string(),
                    ]
                }),

            dedup_candles: env
                .var("DEDUP_CANDLES")
                .map(|v| v.to_string().to_lowercase() == "true")
                .unwrap_or(false),

            keep_orphan_blocks: env
                .var("KEEP_ORPHAN_BLOCKS")
                .map(|v| v.to_string().to_lowercase() == "true")
                .unwrap_or(false),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.backend_url.is_empty() {
            return Err(DashboardError::Config("BACKEND_URL must be set".into()));
        }
        if self.candle_limit == 0 {
            return Err(DashboardError::Config("candle_limit must be positive".into()));
        }
        if self.symbols.is_empty() {
            return Err(DashboardError::Config("At least one symbol required".into()));
        }
        Ok(())
    }

    /// Policy for the candle normalization pipeline
    pub fn normalize_policy(&self) -> NormalizePolicy {
        NormalizePolicy {
            dedup_times: self.dedup_candles,
        }
    }

    /// Policy for the structured-text rendering pipeline
    pub fn render_policy(&self) -> RenderPolicy {
        RenderPolicy {
            keep_orphan_blocks: self.keep_orphan_blocks,
        }
    }
}
