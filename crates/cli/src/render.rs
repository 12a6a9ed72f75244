use serde_json::{json, Value};

/// Printed on stdout when `--headless` is set
pub const HEADLESS_BANNER: &str = "[INFO] Headless mode enabled.";

/// Failure line for stderr: `{"error": "<message>"}`
pub fn render_error(err: &anyhow::Error) -> String {
    json!({ "error": err.to_string() }).to_string()
}

/// Pretty JSON, two-space indent, non-ASCII kept as is
pub fn render_json(results: &[Value]) -> String {
    serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
}

/// Numbered list: title and score, then the indented content and a blank line
pub fn render_text(results: &[Value]) -> String {
    let mut out = String::new();

    for (idx, result) in results.iter().enumerate() {
        let title = match result.get("metadata").and_then(|m| m.get("title")) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "No title".to_string(),
            Some(other) => other.to_string(),
        };
        let score = result.get("score").and_then(Value::as_f64).unwrap_or(0.0);
        let content = result.get("content").and_then(Value::as_str).unwrap_or("");

        out.push_str(&format!("{}. {} (score: {:.2})\n", idx + 1, title, score));
        out.push_str(&format!("   {}\n\n", content));
    }

    out
}
