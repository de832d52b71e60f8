//! Rendering of rich-text values.

use serde_json::Value;

/// Render a rich-text value as plain text.
///
/// Blocks are separated by newlines, line breaks become newlines and list
/// items each get a line of their own. Unknown node types contribute the
/// text of their children, so content added by newer editor versions still
/// renders.
#[must_use]
pub fn to_plain_text(value: &Value) -> String {
    let Some(blocks) = value
        .get("root")
        .and_then(|root| root.get("children"))
        .and_then(Value::as_array)
    else {
        return String::new();
    };

    let mut lines = Vec::new();
    for block in blocks {
        collect_block(block, &mut lines);
    }
    lines.join("\n")
}

fn collect_block(block: &Value, lines: &mut Vec<String>) {
    if node_type(block) == Some("list") {
        for item in children(block) {
            collect_block(item, lines);
        }
        return;
    }

    let mut line = String::new();
    for child in children(block) {
        collect_inline(child, &mut line);
    }
    lines.push(line);
}

fn collect_inline(node: &Value, out: &mut String) {
    match node_type(node) {
        Some("linebreak") => out.push('\n'),
        Some("tab") => out.push('\t'),
        _ => {
            if let Some(text) = node.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
            for child in children(node) {
                collect_inline(child, out);
            }
        }
    }
}

fn node_type(node: &Value) -> Option<&str> {
    node.get("type").and_then(Value::as_str)
}

fn children(node: &Value) -> &[Value] {
    node.get("children")
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// Escape text for inclusion in HTML.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
