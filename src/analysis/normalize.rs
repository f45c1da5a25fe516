//! Permissive coercion of upstream numeric fields.
//!
//! The stats provider hands over numbers, percentage strings ("52.6%"),
//! thousands-separated counts ("1,234"), KDA ratios ("2.85:1"), or nothing at
//! all. None of these may fail a recommendation call, so every helper here
//! degrades to `None` / a neutral default instead of erroring.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Best-effort conversion of a JSON value to a finite `f64`.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_numeric_str(s),
        _ => None,
    }
}

fn parse_numeric_str(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '%' | ',' | '\u{00a0}' | '\u{202f}'))
        .collect();
    let cleaned = cleaned.trim();
    let cleaned = cleaned.strip_suffix(":1").unwrap_or(cleaned).trim();

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_f64))
}

/// Non-negative game count, fractions kept; absent, negative or garbage becomes 0.
pub fn lenient_games<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(coerce_f64)
        .filter(|v| *v >= 0.0)
        .unwrap_or(0.0))
}

/// Tier list rank. Negative or non-numeric ranks are treated as absent.
pub fn lenient_rank<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(coerce_f64)
        .filter(|v| *v >= 0.0)
        .map(|v| v.round().min(u32::MAX as f64) as u32))
}

pub fn lenient_optional_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(coerce_f64)
        .filter(|v| *v >= 0.0)
        .map(|v| v as u64))
}

pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    })
}

/// List of names; a non-array value becomes empty and non-string items are dropped.
pub fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_numbers_and_percent_strings() {
        assert_eq!(coerce_f64(&json!(52.6)), Some(52.6));
        assert_eq!(coerce_f64(&json!(7)), Some(7.0));
        assert_eq!(coerce_f64(&json!("52.6%")), Some(52.6));
        assert_eq!(coerce_f64(&json!(" 48.1 % ")), Some(48.1));
    }

    #[test]
    fn coerces_separators_and_kda_ratios() {
        assert_eq!(coerce_f64(&json!("1,234")), Some(1234.0));
        assert_eq!(coerce_f64(&json!("12\u{202f}345")), Some(12345.0));
        assert_eq!(coerce_f64(&json!("2.85:1")), Some(2.85));
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!(coerce_f64(&json!(null)), None);
        assert_eq!(coerce_f64(&json!(true)), None);
        assert_eq!(coerce_f64(&json!("n/a")), None);
        assert_eq!(coerce_f64(&json!("")), None);
        assert_eq!(coerce_f64(&json!([1, 2])), None);
        assert_eq!(coerce_f64(&json!("inf")), None);
    }

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "lenient_f64")]
        rate: Option<f64>,
        #[serde(default, deserialize_with = "lenient_games")]
        games: f64,
        #[serde(default, deserialize_with = "lenient_rank")]
        rank: Option<u32>,
        #[serde(default, deserialize_with = "lenient_string_list")]
        names: Vec<String>,
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let fields: Fields = serde_json::from_value(json!({})).unwrap();
        assert_eq!(fields.rate, None);
        assert_eq!(fields.games, 0.0);
        assert_eq!(fields.rank, None);
        assert!(fields.names.is_empty());
    }

    #[test]
    fn malformed_fields_never_fail_deserialization() {
        let fields: Fields = serde_json::from_value(json!({
            "rate": {"nested": 1},
            "games": -4,
            "rank": "unranked",
            "names": "Zed",
        }))
        .unwrap();
        assert_eq!(fields.rate, None);
        assert_eq!(fields.games, 0.0);
        assert_eq!(fields.rank, None);
        assert!(fields.names.is_empty());
    }

    #[test]
    fn fractional_games_are_kept() {
        let fields: Fields = serde_json::from_value(json!({"games": "10.5"})).unwrap();
        assert_eq!(fields.games, 10.5);
    }

    #[test]
    fn string_list_drops_non_strings() {
        let fields: Fields =
            serde_json::from_value(json!({"names": ["Zed", 3, null, " Yasuo ", ""]})).unwrap();
        assert_eq!(fields.names, vec!["Zed".to_string(), "Yasuo".to_string()]);
    }

    #[test]
    fn rank_and_games_accept_strings() {
        let fields: Fields =
            serde_json::from_value(json!({"rank": "3", "games": "1,020"})).unwrap();
        assert_eq!(fields.rank, Some(3));
        assert_eq!(fields.games, 1020.0);
    }
}
