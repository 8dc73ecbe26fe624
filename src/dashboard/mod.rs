//! Dashboard module - Market dashboard web interface
//!
//! Provides a single-page dashboard for charting market data and reading
//! the AI commentary. Separated into HTML, CSS, and JS submodules for
//! maintainability.
//!
//! # Architecture
//! - `html.rs`: Page structure and layout
//! - `css.rs`: Styling with CSS custom properties
//! - `js.rs`: API calls, chart wiring, block-tree rendering
//!
//! # Features
//! - Candlestick chart fed by the canonical candle series
//! - AI commentary rendered as nested section cards
//! - Trade setups table from the best-trades scan
//! - 30-second auto-refresh

mod css;
mod html;
mod js;

/// Generate the complete dashboard HTML page
pub fn dashboard_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Market Dashboard</title>
    <script src="https://unpkg.com/lightweight-charts@4.1.3/dist/lightweight-charts.standalone.production.js"></script>
    <style>
{css}
    </style>
</head>
<body>
{html}
    <script>
{js}
    </script>
</body>
</html>"#,
        css = css::STYLES,
        html = html::TEMPLATE,
        js = js::SCRIPT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_assembles_all_parts() {
        let page = dashboard_html();
        assert!(page.contains("<style>"));
        assert!(page.contains("id=\"chart\""));
        assert!(page.contains("renderBlock"));
    }
}
