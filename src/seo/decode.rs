use serde_json::Value;
use tracing::warn;

use super::types::{GeneratedCopy, KeywordInsight, KeywordStatus};

/// Normalize a workflow analysis response into canonical keyword records.
///
/// The workflow's envelope is not contractually fixed: the body may be the
/// keyword array itself or an object wrapping it under `data` or `json`.
/// This function is total — any other shape yields an empty list, and
/// elements without a usable `keyword` string are dropped (with a warning)
/// instead of propagating half-decoded records downstream.
pub fn decode_keyword_results(body: &Value) -> Vec<KeywordInsight> {
    let empty: &[Value] = &[];
    let items: &[Value] = match body {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("data")
            .or_else(|| map.get("json"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(empty),
        _ => empty,
    };

    items
        .iter()
        .filter_map(|item| {
            let decoded = decode_keyword(item);
            if decoded.is_none() {
                warn!("Dropping workflow result element without a keyword: {}", item);
            }
            decoded
        })
        .collect()
}

fn decode_keyword(value: &Value) -> Option<KeywordInsight> {
    let keyword = value.get("keyword")?.as_str()?.trim();
    if keyword.is_empty() {
        return None;
    }

    let status = value.get("status").map(decode_status).unwrap_or_default();
    let volumes_history = value
        .get("volumes_history")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(as_i64_lenient).collect())
        .unwrap_or_default();

    Some(KeywordInsight {
        keyword: keyword.to_string(),
        avg_volume: int_field(value, "avg_volume"),
        competition: float_field(value, "competition"),
        opportunity_score: float_field(value, "opportunity_score"),
        volumes_history,
        status,
    })
}

fn decode_status(value: &Value) -> KeywordStatus {
    KeywordStatus {
        trending: bool_field(value, "trending"),
        evergreen: bool_field(value, "evergreen"),
        promising: bool_field(value, "promising"),
    }
}

/// Extract the generated title/description from a content-writing
/// response: a one-element array is unwrapped, then the fields are read
/// from an `output` object when present, falling back to the top level.
pub fn decode_write_output(body: &Value) -> GeneratedCopy {
    let unwrapped = match body {
        Value::Array(items) if items.len() == 1 => &items[0],
        other => other,
    };
    let output = unwrapped.get("output").unwrap_or(unwrapped);

    GeneratedCopy {
        title: string_field(output, "title"),
        description: string_field(output, "description"),
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}

fn bool_field(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn float_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn int_field(value: &Value, key: &str) -> i64 {
    value.get(key).and_then(as_i64_lenient).unwrap_or(0)
}

fn as_i64_lenient(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_element() -> Value {
        json!({
            "keyword": "dog mom shirt",
            "avg_volume": 500,
            "competition": 0.3,
            "opportunity_score": 72,
            "volumes_history": [100, 200, 500],
            "status": {"trending": true, "evergreen": false, "promising": true}
        })
    }

    #[test]
    fn decodes_bare_array() {
        let results = decode_keyword_results(&json!([sample_element()]));
        assert_eq!(results.len(), 1);
        let kw = &results[0];
        assert_eq!(kw.keyword, "dog mom shirt");
        assert_eq!(kw.avg_volume, 500);
        assert_eq!(kw.competition, 0.3);
        assert_eq!(kw.opportunity_score, 72.0);
        assert_eq!(kw.volumes_history, vec![100, 200, 500]);
        assert!(kw.status.trending);
        assert!(!kw.status.evergreen);
        assert!(kw.status.promising);
    }

    #[test]
    fn wrapped_data_envelope_yields_identical_list() {
        let bare = decode_keyword_results(&json!([sample_element()]));
        let wrapped = decode_keyword_results(&json!({"data": [sample_element()]}));
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn json_envelope_is_recognized() {
        let results = decode_keyword_results(&json!({"json": [sample_element()]}));
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn unrecognized_shapes_decode_to_empty() {
        assert!(decode_keyword_results(&json!("oops")).is_empty());
        assert!(decode_keyword_results(&json!(42)).is_empty());
        assert!(decode_keyword_results(&json!({"results": []})).is_empty());
        assert!(decode_keyword_results(&Value::Null).is_empty());
    }

    #[test]
    fn elements_without_keyword_are_dropped() {
        let results = decode_keyword_results(&json!([
            sample_element(),
            {"avg_volume": 10},
            {"keyword": "   "},
        ]));
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn null_and_missing_fields_default() {
        let results = decode_keyword_results(&json!([{
            "keyword": "cat dad",
            "avg_volume": null,
            "competition": null
        }]));
        let kw = &results[0];
        assert_eq!(kw.avg_volume, 0);
        assert_eq!(kw.competition, 0.0);
        assert_eq!(kw.opportunity_score, 0.0);
        assert!(kw.volumes_history.is_empty());
        assert_eq!(kw.status, KeywordStatus::default());
    }

    #[test]
    fn fractional_volumes_are_rounded() {
        let results = decode_keyword_results(&json!([{
            "keyword": "plant mom",
            "avg_volume": 499.6,
            "volumes_history": [10.2, 19.8]
        }]));
        assert_eq!(results[0].avg_volume, 500);
        assert_eq!(results[0].volumes_history, vec![10, 20]);
    }

    #[test]
    fn write_output_direct_object() {
        let copy = decode_write_output(&json!({
            "output": {"title": "Dog Mom Tee", "description": "Soft cotton."}
        }));
        assert_eq!(copy.title.as_deref(), Some("Dog Mom Tee"));
        assert_eq!(copy.description.as_deref(), Some("Soft cotton."));
    }

    #[test]
    fn write_output_single_element_array_is_unwrapped() {
        let copy = decode_write_output(&json!([
            {"output": {"title": "Dog Mom Tee"}}
        ]));
        assert_eq!(copy.title.as_deref(), Some("Dog Mom Tee"));
        assert_eq!(copy.description, None);
    }

    #[test]
    fn write_output_top_level_fallback() {
        let copy = decode_write_output(&json!({"title": "Plain Title"}));
        assert_eq!(copy.title.as_deref(), Some("Plain Title"));
    }

    #[test]
    fn write_output_missing_fields() {
        assert_eq!(decode_write_output(&json!({})), GeneratedCopy::default());
        assert_eq!(decode_write_output(&json!([])), GeneratedCopy::default());
    }
}
