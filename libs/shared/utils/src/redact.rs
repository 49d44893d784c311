use serde_json::Value;

pub const REDACTED: &str = "***REDACTED***";

const SENSITIVE_KEYS: [&str; 5] = ["password", "token", "secret", "apikey", "authorization"];

fn is_sensitive(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_KEYS.iter().any(|needle| key.contains(needle))
}

/// Returns a copy of `value` safe to log: any object key that looks like a
/// credential has its value replaced, at any depth.
pub fn redact_sensitive(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, inner)| {
                    let inner = if is_sensitive(key) {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact_sensitive(inner)
                    };
                    (key.clone(), inner)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_sensitive).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redacts_nested_credentials() {
        let input = json!({
            "customerName": "Joao Silva",
            "apiKey": "abc",
            "auth": {"accessToken": "xyz", "user": "joao"},
            "items": [{"clientSecret": "s"}]
        });

        let output = redact_sensitive(&input);

        assert_eq!(output["customerName"], "Joao Silva");
        assert_eq!(output["apiKey"], REDACTED);
        assert_eq!(output["auth"]["accessToken"], REDACTED);
        assert_eq!(output["auth"]["user"], "joao");
        assert_eq!(output["items"][0]["clientSecret"], REDACTED);
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(redact_sensitive(&json!(42)), json!(42));
        assert_eq!(redact_sensitive(&json!("token")), json!("token"));
    }
}
