//! Dashboard JavaScript
//!
//! Client-side logic for the market dashboard:
//! - API calls for candles, commentary, setups, and the overview strip
//! - Chart wiring (canonical series goes straight into setData)
//! - Block-tree walker that renders the AI commentary as nested cards
//! - Auto-refresh every 30 seconds

pub const SCRIPT: &str = r#"
// ============================================================================
// Configuration
// ============================================================================
const CONFIG = {
    refreshInterval: 30000,  // 30 seconds
    apiBase: ''
};

// ============================================================================
// State
// ============================================================================
let lastUpdate = null;
let chart = null;
let candleSeries = null;

// ============================================================================
// API Functions
// ============================================================================
async function fetchJSON(endpoint) {
    try {
        const res = await fetch(CONFIG.apiBase + endpoint);
        return await res.json();
    } catch (e) {
        console.error(`Error fetching ${endpoint}:`, e);
        return null;
    }
}

// ============================================================================
// Formatting Utilities
// ============================================================================
function formatUSD(value) {
    if (value == null || isNaN(value)) return '$--';
    return '$' + parseFloat(value).toLocaleString('en-US', { maximumFractionDigits: 2 });
}

function formatPercent(value) {
    if (value == null || isNaN(value)) return '--%';
    const sign = value >= 0 ? '+' : '';
    return sign + parseFloat(value).toFixed(2) + '%';
}

function formatVolume(value) {
    if (value == null || isNaN(value)) return '--';
    if (value >= 1e9) return (value / 1e9).toFixed(1) + 'B';
    if (value >= 1e6) return (value / 1e6).toFixed(1) + 'M';
    if (value >= 1e3) return (value / 1e3).toFixed(1) + 'K';
    return value.toFixed(0);
}

function changeClass(value) {
    if (value > 0) return 'positive';
    if (value < 0) return 'negative';
    return 'neutral';
}

function escapeHtml(text) {
    const div = document.createElement('div');
    div.textContent = text == null ? '' : text;
    return div.innerHTML;
}

// ============================================================================
// Selection
// ============================================================================
function currentSelection() {
    return {
        asset: document.getElementById('assetSelect').value,
        symbol: document.getElementById('symbolSelect').value,
        timeframe: document.getElementById('timeframeSelect').value
    };
}

async function populateSelectors() {
    const cfg = await fetchJSON('/api/config');
    const select = document.getElementById('symbolSelect');
    const symbols = (cfg && cfg.symbols) || ['BTC/USDT'];

    select.innerHTML = symbols
        .map(s => `<option value='${s}'>${s}</option>`)
        .join('');

    if (cfg && cfg.default_timeframe) {
        document.getElementById('timeframeSelect').value = cfg.default_timeframe;
    }
}

// ============================================================================
// Error Banner
// ============================================================================
function showError(message) {
    const banner = document.getElementById('errorBanner');
    banner.textContent = '⚠️ ' + message;
    banner.classList.remove('hidden');
}

function clearError() {
    document.getElementById('errorBanner').classList.add('hidden');
}

// ============================================================================
// Chart
// ============================================================================
function initChart() {
    const container = document.getElementById('chart');
    chart = LightweightCharts.createChart(container, {
        autoSize: true,
        layout: { background: { color: 'transparent' }, textColor: '#8b949e' },
        grid: {
            vertLines: { color: 'rgba(48, 54, 61, 0.5)' },
            horzLines: { color: 'rgba(48, 54, 61, 0.5)' }
        },
        timeScale: { timeVisible: true, borderColor: '#30363d' },
        rightPriceScale: { borderColor: '#30363d' }
    });
    candleSeries = chart.addCandlestickSeries({
        upColor: '#3fb950',
        downColor: '#f85149',
        borderVisible: false,
        wickUpColor: '#3fb950',
        wickDownColor: '#f85149'
    });
}

async function updateChart() {
    const { asset, symbol, timeframe } = currentSelection();
    const data = await fetchJSON(
        `/api/candles/${asset}/${encodeURIComponent(symbol)}?timeframe=${timeframe}`
    );
    const emptyState = document.getElementById('chartEmpty');

    if (!data || data.error) {
        showError(data && data.error ? data.error : 'Failed to load market data');
        return;
    }
    clearError();

    if (data.empty) {
        candleSeries.setData([]);
        emptyState.classList.remove('hidden');
    } else {
        emptyState.classList.add('hidden');
        // Canonical series: already time-ascending, in epoch seconds
        candleSeries.setData(data.candles);
        chart.timeScale().fitContent();
    }

    document.getElementById('candleCount').textContent = data.count;
}

// ============================================================================
// AI Commentary (block-tree walker)
// ============================================================================
function renderBlock(block) {
    switch (block.kind) {
        case 'section':
            return `<div class='section-card'>
                <div class='section-title'><span class='section-icon'>${block.icon}</span>${escapeHtml(block.title)}</div>
                ${block.children.map(renderBlock).join('')}
            </div>`;
        case 'subsection':
            return `<div class='subsection'>${escapeHtml(block.label)}</div>`;
        case 'sub_subsection':
            return `<div class='subsubsection'>${escapeHtml(block.label)}</div>`;
        case 'key_value':
            return `<div class='kv-row'><span class='kv-key'>${escapeHtml(block.key)}</span><span class='kv-value'>${escapeHtml(block.value)}</span></div>`;
        case 'bullet':
            return `<div class='bullet'>• ${escapeHtml(block.text)}</div>`;
        default:
            return `<p class='paragraph'>${escapeHtml(block.text)}</p>`;
    }
}

async function updateAnalysis() {
    const { symbol, timeframe } = currentSelection();
    const panel = document.getElementById('analysisPanel');
    const data = await fetchJSON(
        `/api/analysis/${encodeURIComponent(symbol)}?timeframe=${timeframe}`
    );

    if (!data || data.error) {
        panel.innerHTML = `<div class='empty-state'>Commentary unavailable</div>`;
        return;
    }

    if (!data.blocks || data.blocks.length === 0) {
        panel.innerHTML = `<div class='empty-state'>No commentary for this symbol yet</div>`;
        return;
    }

    panel.innerHTML = data.blocks.map(renderBlock).join('');
}

// ============================================================================
// Overview Strip
// ============================================================================
async function updateOverview() {
    const { asset, symbol, timeframe } = currentSelection();
    const data = await fetchJSON(
        `/api/overview/${asset}/${encodeURIComponent(symbol)}?timeframe=${timeframe}`
    );
    if (!data || data.error) return;

    const price = data.price || {};
    const value = price.price != null ? price.price : data.last_close;
    document.getElementById('priceValue').textContent = formatUSD(value);

    const change = document.getElementById('change24h');
    change.textContent = formatPercent(price.change_24h);
    change.className = 'metric-value ' + changeClass(price.change_24h);

    document.getElementById('volume24h').textContent = formatVolume(price.volume_24h);
}

// ============================================================================
// Trade Setups
// ============================================================================
async function updateSetups() {
    const tbody = document.getElementById('setupsBody');
    const data = await fetchJSON('/api/setups');

    if (!data || data.error) {
        tbody.innerHTML = `<tr><td colspan='7' style='text-align: center; color: var(--text-dim);'>Error loading</td></tr>`;
        return;
    }

    if (!data.setups || data.setups.length === 0) {
        tbody.innerHTML = `<tr><td colspan='7' style='text-align: center; color: var(--text-dim);'>No setups right now</td></tr>`;
        return;
    }

    tbody.innerHTML = data.setups.map(s => {
        const dirClass = s.direction === 'LONG' ? 'direction-long'
            : s.direction === 'SHORT' ? 'direction-short' : 'direction-neutral';
        return `<tr>
            <td><strong>${escapeHtml(s.symbol)}</strong></td>
            <td><span class='direction-badge ${dirClass}'>${s.direction}</span></td>
            <td>${s.confidence || '--'}</td>
            <td>${s.entry || '--'}</td>
            <td>${s.stop_loss || '--'}</td>
            <td>${s.take_profit || '--'}</td>
            <td>${s.risk_reward || '--'}</td>
        </tr>`;
    }).join('');
}

// ============================================================================
// Main Update Function
// ============================================================================
function updateTimestamp() {
    lastUpdate = new Date();
    document.getElementById('refreshTime').textContent = 'Updated: ' + lastUpdate.toLocaleTimeString();
}

async function updateDashboard() {
    await Promise.all([
        updateChart(),
        updateAnalysis(),
        updateOverview(),
        updateSetups()
    ]);
    updateTimestamp();
}

// ============================================================================
// Button Actions
// ============================================================================
async function refreshAll() {
    const btn = document.getElementById('refreshBtn');
    btn.disabled = true;
    btn.textContent = '⏳';

    await updateDashboard();

    btn.disabled = false;
    btn.textContent = '🔄 Refresh';
}

// ============================================================================
// Initialization
// ============================================================================
(async function init() {
    initChart();
    await populateSelectors();

    for (const id of ['assetSelect', 'symbolSelect', 'timeframeSelect']) {
        document.getElementById(id).addEventListener('change', updateDashboard);
    }

    updateDashboard();
    setInterval(updateDashboard, CONFIG.refreshInterval);
})();
"#;
