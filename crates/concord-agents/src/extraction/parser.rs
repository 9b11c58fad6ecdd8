//! Parse model output into claim texts

use serde_json::Value;
use tracing::warn;

/// Parse a model response into claim texts
///
/// Accepts a JSON object with a `claims` array, a bare JSON array, and either
/// wrapped in a markdown code fence or surrounded by prose. Array items may be
/// strings or objects with a `text` or `claim` field; other items are skipped.
pub fn parse_claims(response: &str) -> Result<Vec<String>, String> {
    let json_str = extract_json(response)?;
    let json: Value =
        serde_json::from_str(json_str).map_err(|e| format!("JSON parse error: {}", e))?;

    let items = match &json {
        Value::Array(items) => items,
        Value::Object(obj) => obj
            .get("claims")
            .and_then(Value::as_array)
            .ok_or_else(|| "Expected a \"claims\" array".to_string())?,
        _ => return Err("Expected a JSON object or array".to_string()),
    };

    let mut claims = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        match claim_text(item) {
            Some(text) => claims.push(text),
            None => warn!(index = idx, "Skipping claim item without text"),
        }
    }
    Ok(claims)
}

fn claim_text(item: &Value) -> Option<String> {
    let text = match item {
        Value::String(s) => s.as_str(),
        Value::Object(obj) => obj
            .get("text")
            .or_else(|| obj.get("claim"))
            .and_then(Value::as_str)?,
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Slice out the JSON payload, handling markdown fences and stray prose
fn extract_json(response: &str) -> Result<&str, String> {
    let trimmed = response.trim();
    let body = match trimmed.strip_prefix("```") {
        Some(fenced) => {
            // drop the info string (```json) and the closing fence
            let after_info = fenced.find('\n').map_or("", |i| &fenced[i + 1..]);
            after_info.rfind("```").map_or(after_info, |end| &after_info[..end])
        }
        None => trimmed,
    };

    let start = body
        .find(['{', '['])
        .ok_or_else(|| "No JSON found in response".to_string())?;
    let end = body
        .rfind(['}', ']'])
        .filter(|end| *end >= start)
        .ok_or_else(|| "Unterminated JSON in response".to_string())?;
    Ok(&body[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_with_claims() {
        let claims = parse_claims(r#"{"claims": ["X causes Y.", "Z is rare."]}"#).unwrap();
        assert_eq!(claims, vec!["X causes Y.", "Z is rare."]);
    }

    #[test]
    fn test_bare_array_in_fence() {
        let response = "```json\n[\"A is B.\", {\"text\": \"C is D.\"}, {\"claim\": \" E. \"}]\n```";
        assert_eq!(parse_claims(response).unwrap(), vec!["A is B.", "C is D.", "E."]);
    }

    #[test]
    fn test_prose_around_json() {
        let response = "Here are the claims:\n{\"claims\": [\"A.\"]}\nHope this helps!";
        assert_eq!(parse_claims(response).unwrap(), vec!["A."]);
    }

    #[test]
    fn test_unusable_items_are_skipped() {
        let claims = parse_claims(r#"[1, "", {"other": "x"}, "Kept."]"#).unwrap();
        assert_eq!(claims, vec!["Kept."]);
    }

    #[test]
    fn test_errors() {
        assert!(parse_claims("no json at all").is_err());
        assert!(parse_claims(r#"{"results": ["x"]}"#).is_err());
        assert!(parse_claims("{not json}").is_err());
        assert!(parse_claims("\"just a string\"").is_err());
    }
}
