//! Dashboard CSS styles
//!
//! Contains all styling for the market dashboard UI.
//! Uses CSS custom properties (variables) for theming.

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root {
    --bg: #0d1117;
    --card: #161b22;
    --border: #30363d;
    --text: #c9d1d9;
    --text-dim: #8b949e;
    --green: #3fb950;
    --red: #f85149;
    --blue: #58a6ff;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    padding: 20px;
    min-height: 100vh;
}

.container { max-width: 1280px; margin: 0 auto; }

/* Header */
header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 24px;
    padding-bottom: 16px;
    border-bottom: 1px solid var(--border);
}

h1 { font-size: 24px; font-weight: 600; }

.header-controls {
    display: flex;
    align-items: center;
    gap: 12px;
}

.refresh-time { font-size: 12px; color: var(--text-dim); }

/* Selectors */
.select {
    background: var(--card);
    color: var(--text);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 8px 10px;
    font-size: 13px;
}

/* Buttons */
.btn {
    padding: 8px 16px;
    border-radius: 6px;
    border: none;
    font-size: 13px;
    font-weight: 500;
    cursor: pointer;
    transition: all 0.2s;
}

.btn:disabled { opacity: 0.6; cursor: not-allowed; }
.btn-secondary { background: var(--border); color: var(--text); }
.btn-secondary:hover:not(:disabled) { background: #3d444d; }

/* Error Banner */
.error-banner {
    background: rgba(248, 81, 73, 0.15);
    border: 1px solid var(--red);
    color: var(--red);
    border-radius: 8px;
    padding: 12px 16px;
    margin-bottom: 16px;
    font-size: 13px;
}

.hidden { display: none; }

/* Grid Layout */
.grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
    gap: 16px;
}

.wide { grid-column: 1 / -1; }

/* Cards */
.card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 12px;
    padding: 20px;
}

.card-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 16px;
}

.card-title {
    font-size: 14px;
    color: var(--text-dim);
    text-transform: uppercase;
    letter-spacing: 0.5px;
}

.card-value { font-size: 28px; font-weight: 700; }

/* Metrics Grid */
.metrics {
    display: flex;
    flex-wrap: wrap;
    gap: 16px;
    margin-top: 12px;
}

.metric { flex: 1; min-width: 100px; }
.metric-label { font-size: 11px; color: var(--text-dim); text-transform: uppercase; }
.metric-value { font-size: 18px; font-weight: 600; margin-top: 2px; }

/* Colors */
.positive { color: var(--green); }
.negative { color: var(--red); }
.neutral { color: var(--text-dim); }

/* Chart */
.chart-surface { height: 380px; }

.empty-state {
    text-align: center;
    color: var(--text-dim);
    padding: 24px;
    font-size: 13px;
}

/* AI Commentary Panel */
.analysis-panel {
    display: flex;
    flex-direction: column;
    gap: 12px;
}

.section-card {
    background: rgba(255, 255, 255, 0.03);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 14px 16px;
}

.section-title {
    font-size: 14px;
    font-weight: 600;
    margin-bottom: 10px;
    display: flex;
    align-items: center;
    gap: 8px;
}

.section-icon { font-size: 16px; }

.subsection {
    font-size: 13px;
    font-weight: 600;
    color: var(--blue);
    margin: 8px 0 4px;
}

.subsubsection {
    font-size: 12px;
    font-weight: 600;
    color: var(--text-dim);
    text-transform: uppercase;
    margin: 6px 0 2px;
}

.kv-row {
    display: flex;
    justify-content: space-between;
    padding: 4px 0;
    font-size: 13px;
    border-bottom: 1px solid rgba(48, 54, 61, 0.5);
}

.kv-row:last-child { border-bottom: none; }
.kv-key { color: var(--text-dim); }
.kv-value { font-weight: 500; }

.bullet { font-size: 13px; padding: 3px 0 3px 8px; }

.paragraph { font-size: 13px; color: var(--text); padding: 3px 0; }

/* Setups Table */
.setups-table { width: 100%; margin-top: 12px; }

.setups-table th,
.setups-table td {
    text-align: left;
    padding: 10px 8px;
    border-bottom: 1px solid var(--border);
}

.setups-table th {
    color: var(--text-dim);
    font-weight: 500;
    font-size: 12px;
    text-transform: uppercase;
}

.setups-table tr:last-child td { border-bottom: none; }

.direction-badge {
    font-size: 11px;
    padding: 3px 8px;
    border-radius: 4px;
    display: inline-block;
    font-weight: 600;
}

.direction-long { background: rgba(63, 185, 80, 0.2); color: var(--green); }
.direction-short { background: rgba(248, 81, 73, 0.2); color: var(--red); }
.direction-neutral { background: rgba(139, 148, 158, 0.2); color: var(--text-dim); }

/* Responsive */
@media (max-width: 600px) {
    .grid { grid-template-columns: 1fr; }
    header { flex-direction: column; gap: 12px; }
    .header-controls { flex-wrap: wrap; justify-content: center; }
}
";
