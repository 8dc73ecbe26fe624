//! Dashboard HTML template
//!
//! Contains the main page structure including:
//! - Header with asset/symbol/timeframe selectors
//! - Price overview card
//! - Candlestick chart surface
//! - AI commentary panel (filled from the block tree)
//! - Trade setups table

pub const TEMPLATE: &str = r#"
    <div class="container">
        <header>
            <div>
                <h1>📊 Market Dashboard</h1>
                <span class="refresh-time" id="refreshTime">Loading...</span>
            </div>
            <div class="header-controls">
                <select class="select" id="assetSelect">
                    <option value="crypto" selected>Crypto</option>
                    <option value="stock">Stocks</option>
                    <option value="commodity">Commodities</option>
                    <option value="index">Indices</option>
                    <option value="forex">Forex</option>
                </select>
                <select class="select" id="symbolSelect"></select>
                <select class="select" id="timeframeSelect">
                    <option value="1m">1m</option>
                    <option value="5m">5m</option>
                    <option value="15m">15m</option>
                    <option value="1h" selected>1h</option>
                    <option value="4h">4h</option>
                    <option value="1d">1d</option>
                    <option value="1w">1w</option>
                </select>
                <button class="btn btn-secondary" onclick="refreshAll()" id="refreshBtn">🔄 Refresh</button>
            </div>
        </header>

        <div class="error-banner hidden" id="errorBanner"></div>

        <div class="grid">
            <!-- Price Card -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title">💰 Last Price</span>
                </div>
                <div class="card-value" id="priceValue">$--</div>
                <div class="metrics">
                    <div class="metric">
                        <div class="metric-label">24h Change</div>
                        <div class="metric-value" id="change24h">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">24h Volume</div>
                        <div class="metric-value" id="volume24h">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Candles</div>
                        <div class="metric-value" id="candleCount">--</div>
                    </div>
                </div>
            </div>

            <!-- Chart -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">🕯️ Price Chart</span>
                </div>
                <div class="chart-surface" id="chart"></div>
                <div class="empty-state hidden" id="chartEmpty">No market data for this selection yet</div>
            </div>

            <!-- AI Commentary -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">🤖 AI Commentary</span>
                </div>
                <div class="analysis-panel" id="analysisPanel">
                    <div class="empty-state">Loading...</div>
                </div>
            </div>

            <!-- Trade Setups -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">🎯 Trade Setups</span>
                </div>
                <table class="setups-table">
                    <thead>
                        <tr>
                            <th>Symbol</th>
                            <th>Direction</th>
                            <th>Confidence</th>
                            <th>Entry</th>
                            <th>Stop</th>
                            <th>Target</th>
                            <th>R/R</th>
                        </tr>
                    </thead>
                    <tbody id="setupsBody">
                        <tr><td colspan="7" style="text-align: center; color: var(--text-dim);">Loading...</td></tr>
                    </tbody>
                </table>
            </div>
        </div>
    </div>
"#;
