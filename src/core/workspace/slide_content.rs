// Normalizes slide body text as it arrives from MCP clients.
//
// Clients frequently wrap JSON in markdown code fences or send escaped newlines
// (`\n` as two characters). The delegate receives structured JSON when the text
// parses, otherwise plain text with real line breaks.

use serde_json::Value;

const ESCAPED_NEWLINE: &str = "\\n";

pub fn normalize_slide_content(raw: &str) -> Value {
    let stripped = raw.trim_matches('`');

    match serde_json::from_str::<Value>(stripped) {
        Ok(Value::String(text)) => Value::String(text.replace(ESCAPED_NEWLINE, "\n")),
        Ok(parsed) => parsed,
        Err(_) => Value::String(stripped.replace(ESCAPED_NEWLINE, "\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escaped_newlines_become_line_breaks() {
        let content = normalize_slide_content("Line 1\\nLine 2");
        assert_eq!(content, json!("Line 1\nLine 2"));
    }

    #[test]
    fn test_fenced_json_is_parsed() {
        let content = normalize_slide_content("```[\"a\",\"b\"]```");
        assert_eq!(content, json!(["a", "b"]));

        let content = normalize_slide_content("`{\"bullets\": [1, 2]}`");
        assert_eq!(content, json!({"bullets": [1, 2]}));
    }

    #[test]
    fn test_json_string_gets_escapes_replaced() {
        // The JSON literal decodes `\\n` to a literal backslash-n, which is then replaced.
        let content = normalize_slide_content("\"first\\\\nsecond\"");
        assert_eq!(content, json!("first\nsecond"));
    }

    #[test]
    fn test_plain_prose_is_stable() {
        let once = normalize_slide_content("Quarterly results\nare in");
        assert_eq!(once, json!("Quarterly results\nare in"));

        let twice = normalize_slide_content(once.as_str().unwrap());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_inner_backticks_survive() {
        let content = normalize_slide_content("use `cargo` here");
        assert_eq!(content, json!("use `cargo` here"));
    }
}
