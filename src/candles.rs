//! Candle normalization pipeline
//!
//! Turns heterogeneous OHLCV payloads from the analysis backend into the
//! canonical series the chart consumes. Upstream sources disagree on shape:
//! - objects with named `open/high/low/close/volume` fields
//! - fixed-order tuple arrays `[timestampMs, o, h, l, c, v?]`
//! - either of the above wrapped under `data`, `candles`, or `ohlcv`
//!
//! The pipeline is pure: no I/O, no shared state, same input gives the
//! same output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DashboardError, Result};

/// Wrapper keys probed when the payload is not itself an array,
/// in precedence order. First array found wins.
pub const WRAPPER_KEYS: [&str; 3] = ["data", "candles", "ohlcv"];

/// Canonical OHLCV record consumed by the chart.
///
/// `time` is seconds since epoch (UTC) regardless of what the upstream
/// payload used. Serializes to exactly the object shape the candlestick
/// series' `setData` expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalCandle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Tuning knobs for [`normalize_with`].
///
/// Defaults preserve the observed upstream behavior: duplicate timestamps
/// pass through in stable order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizePolicy {
    /// Keep only the first record per timestamp after sorting
    pub dedup_times: bool,
}

/// Normalize a raw market-data payload with the default policy.
///
/// # Errors
/// - [`DashboardError::InvalidShape`] when no candle array can be discovered
/// - [`DashboardError::NoData`] when the array is present but empty
///
/// Records that fail numeric extraction are dropped silently. If every
/// record drops, the result is an empty `Ok` - callers must treat that
/// distinctly from the two fatal errors.
pub fn normalize(raw: &Value) -> Result<Vec<CanonicalCandle>> {
    normalize_with(raw, &NormalizePolicy::default())
}

/// Normalize a raw market-data payload under an explicit policy.
pub fn normalize_with(raw: &Value, policy: &NormalizePolicy) -> Result<Vec<CanonicalCandle>> {
    let records = unwrap_candle_array(raw)?;

    if records.is_empty() {
        return Err(DashboardError::NoData);
    }

    let mut candles: Vec<CanonicalCandle> = records.iter().filter_map(extract_record).collect();

    // Stable sort: duplicate timestamps keep their upstream order
    candles.sort_by_key(|c| c.time);

    if policy.dedup_times {
        candles.dedup_by_key(|c| c.time);
    }

    Ok(candles)
}

/// Locate the candle array inside the payload.
fn unwrap_candle_array(raw: &Value) -> Result<&Vec<Value>> {
    if let Value::Array(records) = raw {
        return Ok(records);
    }

    for key in WRAPPER_KEYS {
        if let Some(Value::Array(records)) = raw.get(key) {
            return Ok(records);
        }
    }

    Err(DashboardError::InvalidShape)
}

/// Extract one canonical record, or None if it cannot be salvaged.
///
/// Open/high/low/close must each coerce to a finite number or the record
/// is dropped; volume always resolves, defaulting to zero.
fn extract_record(record: &Value) -> Option<CanonicalCandle> {
    let time = resolve_time(record)?;

    let field = |name: &str, index: usize| {
        let value = if record.is_object() {
            record.get(name)
        } else {
            record.get(index)
        };
        value.and_then(finite_number)
    };

    Some(CanonicalCandle {
        time,
        open: field("open", 1)?,
        high: field("high", 2)?,
        low: field("low", 3)?,
        close: field("close", 4)?,
        volume: field("volume", 5).unwrap_or(0.0),
    })
}

/// Resolve the record timestamp to epoch seconds.
///
/// Precedence: named `timestamp` (epoch ms, numeric or string, or an
/// ISO-8601 date) beats named `time` (epoch seconds number, or ISO-8601
/// string) beats tuple index 0 (epoch ms).
fn resolve_time(record: &Value) -> Option<i64> {
    if let Some(ts) = record.get("timestamp") {
        if let Some(millis) = finite_number(ts) {
            return Some((millis / 1000.0) as i64);
        }
        return ts.as_str().and_then(parse_date_seconds);
    }

    if let Some(t) = record.get("time") {
        return match t {
            Value::Number(n) => n.as_f64().filter(|secs| secs.is_finite()).map(|secs| secs as i64),
            Value::String(s) => parse_date_seconds(s),
            _ => None,
        };
    }

    record
        .get(0)
        .and_then(finite_number)
        .map(|millis| (millis / 1000.0) as i64)
}

/// Coerce a JSON number or numeric string to a finite f64.
fn finite_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Parse an ISO-8601 date string to epoch seconds.
fn parse_date_seconds(text: &str) -> Option<i64> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp());
    }
    // Some backend sources omit the UTC offset; treat those as UTC
    chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // 1700000000 epoch seconds == 2023-11-14T22:13:20Z
    const EPOCH_SECS: i64 = 1_700_000_000;
    const EPOCH_MS: i64 = 1_700_000_000_000;

    fn tuple_record() -> Value {
        json!([EPOCH_MS, 10.0, 12.0, 9.0, 11.0, 500.0])
    }

    fn named_record() -> Value {
        json!({
            "timestamp": EPOCH_MS,
            "open": 10.0,
            "high": 12.0,
            "low": 9.0,
            "close": 11.0,
            "volume": 500.0
        })
    }

    fn expected() -> CanonicalCandle {
        CanonicalCandle {
            time: EPOCH_SECS,
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close: 11.0,
            volume: 500.0,
        }
    }

    #[test]
    fn test_tuple_array_shape() {
        let result = normalize(&json!([tuple_record()])).unwrap();
        assert_eq!(result, vec![expected()]);
    }

    #[test]
    fn test_named_object_shape() {
        let result = normalize(&json!([named_record()])).unwrap();
        assert_eq!(result, vec![expected()]);
    }

    #[test]
    fn test_named_object_iso_timestamp() {
        let record = json!({
            "timestamp": "2023-11-14T22:13:20Z",
            "open": 10.0, "high": 12.0, "low": 9.0, "close": 11.0, "volume": 500.0
        });
        let result = normalize(&json!([record])).unwrap();
        assert_eq!(result[0].time, EPOCH_SECS);
    }

    #[test]
    fn test_time_field_epoch_seconds() {
        let record = json!({
            "time": EPOCH_SECS,
            "open": 10.0, "high": 12.0, "low": 9.0, "close": 11.0
        });
        let result = normalize(&json!([record])).unwrap();
        assert_eq!(result[0].time, EPOCH_SECS);
    }

    #[test]
    fn test_time_field_iso_string() {
        let record = json!({
            "time": "2023-11-14T22:13:20Z",
            "open": 10.0, "high": 12.0, "low": 9.0, "close": 11.0
        });
        let result = normalize(&json!([record])).unwrap();
        assert_eq!(result[0].time, EPOCH_SECS);
    }

    #[test]
    fn test_wrapped_payloads() {
        let wrapped = [
            json!({"data": [tuple_record()]}),
            json!({"candles": [tuple_record()]}),
            json!({"ohlcv": [tuple_record()]}),
        ];
        for payload in &wrapped {
            let result = normalize(payload).unwrap();
            assert_eq!(result, vec![expected()]);
        }
    }

    #[test]
    fn test_wrapper_key_precedence() {
        // `data` wins over `candles` when both are present
        let payload = json!({
            "candles": [[EPOCH_MS, 1.0, 1.0, 1.0, 1.0]],
            "data": [tuple_record()]
        });
        let result = normalize(&payload).unwrap();
        assert_eq!(result, vec![expected()]);
    }

    #[test]
    fn test_timestamp_field_precedence() {
        // `timestamp` (ms) wins over `time` (seconds) when both are present
        let record = json!({
            "timestamp": EPOCH_MS,
            "time": 42,
            "open": 10.0, "high": 12.0, "low": 9.0, "close": 11.0
        });
        let result = normalize(&json!([record])).unwrap();
        assert_eq!(result[0].time, EPOCH_SECS);
    }

    #[test]
    fn test_invalid_shape() {
        assert!(matches!(
            normalize(&json!({})),
            Err(DashboardError::InvalidShape)
        ));
        assert!(matches!(
            normalize(&json!(42)),
            Err(DashboardError::InvalidShape)
        ));
        assert!(matches!(
            normalize(&json!({"rows": [[EPOCH_MS, 1, 2, 0, 1]]})),
            Err(DashboardError::InvalidShape)
        ));
    }

    #[test]
    fn test_no_data_is_distinct_from_invalid_shape() {
        assert!(matches!(normalize(&json!([])), Err(DashboardError::NoData)));
        assert!(matches!(
            normalize(&json!({"candles": []})),
            Err(DashboardError::NoData)
        ));
    }

    #[test]
    fn test_output_sorted_ascending() {
        let shuffled = json!([
            [EPOCH_MS + 120_000, 2.0, 3.0, 1.0, 2.5, 10.0],
            [EPOCH_MS, 1.0, 2.0, 0.5, 1.5, 10.0],
            [EPOCH_MS + 60_000, 1.5, 2.5, 1.0, 2.0, 10.0],
        ]);
        let ordered = json!([
            [EPOCH_MS, 1.0, 2.0, 0.5, 1.5, 10.0],
            [EPOCH_MS + 60_000, 1.5, 2.5, 1.0, 2.0, 10.0],
            [EPOCH_MS + 120_000, 2.0, 3.0, 1.0, 2.5, 10.0],
        ]);

        let from_shuffled = normalize(&shuffled).unwrap();
        let from_ordered = normalize(&ordered).unwrap();

        assert_eq!(from_shuffled, from_ordered);
        assert!(from_shuffled.windows(2).all(|w| w[0].time <= w[1].time));
    }

    #[test]
    fn test_invalid_close_drops_record_only() {
        let payload = json!([
            named_record(),
            {
                "timestamp": EPOCH_MS + 60_000,
                "open": 10.0, "high": 12.0, "low": 9.0, "close": "n/a", "volume": 1.0
            }
        ]);
        let result = normalize(&payload).unwrap();
        assert_eq!(result, vec![expected()]);
    }

    #[test]
    fn test_nan_string_is_not_finite() {
        let payload = json!([[EPOCH_MS, "10", "12", "9", "NaN", "500"]]);
        assert_eq!(normalize(&payload).unwrap(), vec![]);
    }

    #[test]
    fn test_all_records_dropped_is_empty_ok() {
        // Distinct from NoData: the array was non-empty but unsalvageable
        let payload = json!([{"timestamp": EPOCH_MS, "open": "x", "high": 1, "low": 1, "close": 1}]);
        assert_eq!(normalize(&payload).unwrap(), vec![]);
    }

    #[test]
    fn test_unresolvable_timestamp_drops_record() {
        let payload = json!([
            {"time": "not a date", "open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0},
            named_record()
        ]);
        let result = normalize(&payload).unwrap();
        assert_eq!(result, vec![expected()]);
    }

    #[test]
    fn test_volume_defaults_to_zero() {
        let no_volume_object = json!([{
            "timestamp": EPOCH_MS,
            "open": 10.0, "high": 12.0, "low": 9.0, "close": 11.0
        }]);
        let five_element_tuple = json!([[EPOCH_MS, 10.0, 12.0, 9.0, 11.0]]);

        assert_eq!(normalize(&no_volume_object).unwrap()[0].volume, 0.0);
        assert_eq!(normalize(&five_element_tuple).unwrap()[0].volume, 0.0);
    }

    #[test]
    fn test_numeric_strings_accepted() {
        // Several exchanges quote every field as a string
        let payload = json!([{
            "timestamp": EPOCH_MS.to_string(),
            "open": "10.0", "high": "12.0", "low": "9.0", "close": "11.0", "volume": "500"
        }]);
        let result = normalize(&payload).unwrap();
        assert_eq!(result, vec![expected()]);
    }

    #[test]
    fn test_duplicate_times_preserved_by_default() {
        let payload = json!([
            [EPOCH_MS, 1.0, 2.0, 0.5, 1.5, 1.0],
            [EPOCH_MS, 2.0, 3.0, 1.5, 2.5, 2.0],
        ]);
        let result = normalize(&payload).unwrap();
        assert_eq!(result.len(), 2);
        // Stable order: first upstream record stays first
        assert_eq!(result[0].open, 1.0);
        assert_eq!(result[1].open, 2.0);
    }

    #[test]
    fn test_dedup_policy_keeps_first_record() {
        let payload = json!([
            [EPOCH_MS, 1.0, 2.0, 0.5, 1.5, 1.0],
            [EPOCH_MS, 2.0, 3.0, 1.5, 2.5, 2.0],
        ]);
        let policy = NormalizePolicy { dedup_times: true };
        let result = normalize_with(&payload, &policy).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].open, 1.0);
    }

    #[test]
    fn test_ohlc_ordering_health_signal() {
        // Not enforced by the pipeline, but well-formed upstream data
        // should come out respecting low <= open/close <= high
        let result = normalize(&json!([tuple_record(), named_record()])).unwrap();
        for candle in result {
            assert!(candle.low <= candle.open.min(candle.close));
            assert!(candle.open.max(candle.close) <= candle.high);
            assert!(candle.volume >= 0.0);
        }
    }

    #[test]
    fn test_chart_series_shape() {
        let value = serde_json::to_value(expected()).unwrap();
        assert_eq!(value["time"], json!(EPOCH_SECS));
        assert_eq!(value["open"], json!(10.0));
        assert_eq!(value["close"], json!(11.0));
    }
}
