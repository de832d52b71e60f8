//! Canonicalization of stored rich-text values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::nodes::Document;
use crate::render;

/// A rich-text value known to be in canonical shape.
///
/// The only way to obtain one is through [`normalize`], so a `RichText`
/// handed to the presentation layer is never null, never a bare string and
/// always carries a typed root.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RichText(Value);

impl RichText {
    /// The canonical empty document.
    #[must_use]
    pub fn empty() -> Self {
        Self(Document::empty().to_value())
    }

    /// Borrow the JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Plain-text rendering of the document.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        render::to_plain_text(&self.0)
    }
}

impl From<Document> for RichText {
    fn from(doc: Document) -> Self {
        Self(doc.to_value())
    }
}

impl From<RichText> for Value {
    fn from(text: RichText) -> Self {
        text.0
    }
}

impl<'de> Deserialize<'de> for RichText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(normalize)
    }
}

/// Bring any stored rich-text value into canonical shape.
///
/// - a string becomes one paragraph per non-blank line; a string without
///   non-blank lines becomes the empty document
/// - a value whose `root` is an object with a non-empty `type` is kept as is
/// - anything else (null, objects without a typed root, numbers, arrays)
///   becomes the empty document; its content is dropped
///
/// Normalizing an already normalized value returns it unchanged.
#[must_use]
pub fn normalize(value: Value) -> RichText {
    match value {
        Value::String(text) => from_plain_text(&text),
        value if has_typed_root(&value) => RichText(value),
        _ => RichText::empty(),
    }
}

/// Build a document from multi-line plain text, dropping blank lines.
#[must_use]
pub fn from_plain_text(text: &str) -> RichText {
    let lines = text.lines().filter(|line| !line.trim().is_empty());
    Document::from_lines(lines).into()
}

fn has_typed_root(value: &Value) -> bool {
    value
        .get("root")
        .and_then(Value::as_object)
        .and_then(|root| root.get("type"))
        .and_then(Value::as_str)
        .is_some_and(|kind| !kind.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{BlockNode, InlineNode};
    use serde_json::json;

    fn paragraphs(text: &RichText) -> Vec<BlockNode> {
        Document::from_value(text.as_value()).unwrap().root.children
    }

    #[test]
    fn test_multi_line_string_drops_blank_lines() {
        let text = normalize(json!("line one\nline two\n\nline three"));
        let blocks = paragraphs(&text);

        assert_eq!(blocks.len(), 3);
        for (block, expected) in blocks.iter().zip(["line one", "line two", "line three"]) {
            let children = block.inline_children();
            assert_eq!(children.len(), 1);
            let InlineNode::Text { text, format, .. } = &children[0] else {
                unreachable!("paragraphs hold text nodes");
            };
            assert_eq!(text, expected);
            assert!(format.is_plain());
        }
    }

    #[test]
    fn test_crlf_and_whitespace_lines() {
        let text = normalize(json!("first\r\n   \r\nsecond\n\t\n"));
        let blocks = paragraphs(&text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(text.to_plain_text(), "first\nsecond");
    }

    #[test]
    fn test_empty_inputs_produce_single_empty_paragraph() {
        for input in [Value::Null, json!(""), json!("  \n \n")] {
            let blocks = paragraphs(&normalize(input));
            assert_eq!(blocks.len(), 1);
            assert!(matches!(&blocks[0], BlockNode::Paragraph { children, .. } if children.is_empty()));
        }
    }

    #[test]
    fn test_malformed_objects_are_replaced_not_salvaged() {
        let empty = normalize(Value::Null);

        assert_eq!(normalize(json!({"foo": "bar"})), empty);
        assert_eq!(normalize(json!({"root": {"children": [{"text": "lost"}]}})), empty);
        assert_eq!(normalize(json!({"root": {"type": ""}})), empty);
        assert_eq!(normalize(json!({"root": "root"})), empty);
        assert_eq!(normalize(json!(42)), empty);
        assert_eq!(normalize(json!(["a", "b"])), empty);
    }

    #[test]
    fn test_typed_root_passes_through_untouched() {
        let stored = json!({
            "root": {
                "type": "root",
                "direction": "ltr",
                "children": [{"type": "custom-block", "payload": {"x": 1}}],
            }
        });

        assert_eq!(normalize(stored.clone()).into_value(), stored);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            Value::Null,
            json!(""),
            json!("a\nb"),
            json!({"foo": "bar"}),
            json!({"root": {"type": "root", "children": []}}),
            json!(true),
        ];

        for input in inputs {
            let once = normalize(input);
            let twice = normalize(once.clone().into_value());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_deserialize_normalizes() {
        #[derive(Deserialize)]
        struct Card {
            #[serde(default = "RichText::empty")]
            description: RichText,
        }

        let card: Card = serde_json::from_value(json!({"description": "one\ntwo"})).unwrap();
        assert_eq!(paragraphs(&card.description).len(), 2);

        let card: Card = serde_json::from_value(json!({})).unwrap();
        assert_eq!(card.description, RichText::empty());
    }
}
