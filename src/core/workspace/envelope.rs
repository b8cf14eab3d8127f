// The uniform `{success, message, ...data}` object every tool returns.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a delegate payload is folded into the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// Object payloads contribute their fields directly. Non-object payloads are dropped.
    Merge,
    /// The payload is stored whole under the given key.
    Key(&'static str),
}

/// Tool response. `data` fields are flattened next to `success` and `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Map::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Map::new(),
        }
    }

    /// Add one data field. `success` and `message` cannot be overridden.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Fold a delegate payload into the data fields.
    pub fn absorb(mut self, payload: Value, shape: PayloadShape) -> Self {
        match shape {
            PayloadShape::Key(key) => self.insert(key, payload),
            PayloadShape::Merge => {
                if let Value::Object(fields) = payload {
                    for (key, value) in fields {
                        self.insert(&key, value);
                    }
                }
            }
        }
        self
    }

    fn insert(&mut self, key: &str, value: Value) {
        if key == "success" || key == "message" {
            return;
        }
        self.data.insert(key.to_string(), value);
    }
}

/// Whether a delegate payload counts as a usable result.
///
/// `null`, `false`, the empty string and the empty object mean the delegate
/// had nothing to report. Arrays always count, so an empty listing still succeeds.
pub fn is_truthy(payload: &Value) -> bool {
    match payload {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Number(_) | Value::Array(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_flat() {
        let envelope = Envelope::success("Created presentation: Deck")
            .with("presentation_id", "P1")
            .with("slide_count", 0);

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "message": "Created presentation: Deck",
                "presentation_id": "P1",
                "slide_count": 0
            })
        );
    }

    #[test]
    fn test_reserved_keys_are_not_overridden() {
        let envelope = Envelope::failure("Failed to add slide")
            .absorb(json!({"success": true, "message": "x", "slide_id": "s1"}), PayloadShape::Merge);

        assert!(!envelope.success);
        assert_eq!(envelope.message, "Failed to add slide");
        assert_eq!(envelope.get("slide_id"), Some(&json!("s1")));
    }

    #[test]
    fn test_keyed_payload_keeps_arrays_whole() {
        let envelope = Envelope::success("Listed sheets")
            .absorb(json!([{"title": "Sheet1"}]), PayloadShape::Key("sheets"));
        assert_eq!(envelope.get("sheets"), Some(&json!([{"title": "Sheet1"}])));

        // A bare `true` has nothing to merge.
        let envelope = Envelope::success("Deleted").absorb(json!(true), PayloadShape::Merge);
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!({})));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!(0)));
        assert!(is_truthy(&json!({"id": "x"})));
    }
}
