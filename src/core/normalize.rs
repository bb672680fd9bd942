//! Total, deterministic mapping from the raw upstream payload into the
//! stable envelope types. Malformed or missing fields degrade to `None`
//! (numerics) or an empty string (labels); nothing here can fail, so one
//! bad entry never aborts a whole response.

use serde_json::Value;

use crate::core::market::{GlobalSummary, NormalizedCoin};

/// Coerces a raw field into a finite number. The feed is known to ship
/// numbers as strings; anything unparseable or non-finite maps to `None`.
fn finite_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Coerces a raw field into display text. Non-string scalars keep their
/// JSON rendering so downstream symbol parsing degrades to "N/A" instead
/// of dropping the entry.
fn display_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

pub fn normalize_entry(raw: &Value) -> NormalizedCoin {
    NormalizedCoin {
        name: display_text(raw.get("Name")),
        label: display_text(raw.get("Label")),
        price: finite_number(raw.get("Price")),
        change24h: finite_number(raw.get("Change24h")),
        market_cap: finite_number(raw.get("MarketCap")),
        volume24h: finite_number(raw.get("Volume_24h")),
        image_url: non_empty_text(raw.get("ImageUrl")),
    }
}

pub fn normalize_global(raw: Option<&Value>) -> GlobalSummary {
    GlobalSummary {
        total_market_cap: raw.and_then(|g| finite_number(g.get("TotalMarketCap"))),
        total_24h_volume: raw.and_then(|g| finite_number(g.get("Total24hVolume"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_entry() {
        let raw = json!({
            "Name": "Bitcoin",
            "Label": "BTC/USD",
            "Price": 68123.45,
            "Change24h": "-1.25",
            "MarketCap": "1340000000000",
            "Volume_24h": 28000000000.0,
            "ImageUrl": "https://example.com/btc.png"
        });

        let coin = normalize_entry(&raw);
        assert_eq!(coin.name, "Bitcoin");
        assert_eq!(coin.label, "BTC/USD");
        assert_eq!(coin.price, Some(68123.45));
        assert_eq!(coin.change24h, Some(-1.25));
        assert_eq!(coin.market_cap, Some(1_340_000_000_000.0));
        assert_eq!(coin.volume24h, Some(28_000_000_000.0));
        assert_eq!(coin.image_url.as_deref(), Some("https://example.com/btc.png"));
    }

    #[test]
    fn test_malformed_numerics_map_to_none() {
        let raw = json!({
            "Name": "Junkcoin",
            "Label": "JNK/USD",
            "Price": "not a number",
            "Change24h": {},
            "Volume_24h": []
        });

        let coin = normalize_entry(&raw);
        assert_eq!(coin.price, None);
        assert_eq!(coin.change24h, None);
        assert_eq!(coin.market_cap, None);
        assert_eq!(coin.volume24h, None);
        assert_eq!(coin.image_url, None);
    }

    #[test]
    fn test_non_finite_strings_are_rejected() {
        // "NaN" and "inf" parse as f64 in Rust; they must not leak through.
        for bad in ["NaN", "inf", "-inf", "infinity"] {
            let raw = json!({ "Price": bad });
            assert_eq!(normalize_entry(&raw).price, None, "input: {bad}");
        }
    }

    #[test]
    fn test_numeric_strings_with_whitespace() {
        let raw = json!({ "Price": "  123.45 " });
        assert_eq!(normalize_entry(&raw).price, Some(123.45));
    }

    #[test]
    fn test_non_string_label_keeps_display_form() {
        let raw = json!({ "Label": 123 });
        assert_eq!(normalize_entry(&raw).label, "123");

        let raw = json!({ "Label": {"pair": "BTC/USD"} });
        assert_eq!(normalize_entry(&raw).label, "");
    }

    #[test]
    fn test_empty_entry() {
        let coin = normalize_entry(&json!({}));
        assert_eq!(coin.name, "");
        assert_eq!(coin.label, "");
        assert_eq!(coin.price, None);
    }

    #[test]
    fn test_global_defaults_to_none() {
        assert_eq!(normalize_global(None), GlobalSummary::default());
        assert_eq!(normalize_global(Some(&json!({}))), GlobalSummary::default());

        let partial = json!({ "TotalMarketCap": "2500000000000" });
        let summary = normalize_global(Some(&partial));
        assert_eq!(summary.total_market_cap, Some(2_500_000_000_000.0));
        assert_eq!(summary.total_24h_volume, None);
    }
}
