//! Structured-document nodes.
//!
//! The canonical shape is a [`Document`] wrapping a root node, whose children
//! are [`BlockNode`]s, whose children are in turn [`InlineNode`]s. The JSON
//! produced by these types is what the editor on the admin side reads and
//! writes, so field names follow its camelCase wire format.

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type tag carried by every root node.
pub const ROOT_TYPE: &str = "root";

/// Node schema version written on every node.
pub const NODE_VERSION: u32 = 1;

const fn default_version() -> u32 {
    NODE_VERSION
}

fn default_mode() -> String {
    "normal".to_string()
}

/// A complete structured document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The root node.
    pub root: Root,
}

/// The root node of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
    /// Always [`ROOT_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Common element properties.
    #[serde(flatten)]
    pub props: ElementProps,
    /// Block children in display order.
    #[serde(default)]
    pub children: Vec<BlockNode>,
}

/// Properties shared by every element node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementProps {
    /// Alignment (`""`, `"left"`, `"center"`, ...).
    #[serde(default)]
    pub format: String,
    /// Indentation level.
    #[serde(default)]
    pub indent: u32,
    /// Node schema version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Text direction, when the editor recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

impl Default for ElementProps {
    fn default() -> Self {
        Self {
            format: String::new(),
            indent: 0,
            version: NODE_VERSION,
            direction: None,
        }
    }
}

/// Heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingTag {
    /// `h1`.
    H1,
    /// `h2`.
    H2,
    /// `h3`.
    H3,
    /// `h4`.
    H4,
    /// `h5`.
    H5,
    /// `h6`.
    H6,
}

/// Kind of list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    /// Unordered list.
    Bullet,
    /// Ordered list.
    Number,
    /// Checklist.
    Check,
}

/// Block-level nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockNode {
    /// A paragraph.
    Paragraph {
        #[serde(flatten)]
        props: ElementProps,
        #[serde(default)]
        children: Vec<InlineNode>,
    },
    /// A heading.
    Heading {
        tag: HeadingTag,
        #[serde(flatten)]
        props: ElementProps,
        #[serde(default)]
        children: Vec<InlineNode>,
    },
    /// A list whose children are list items.
    List {
        #[serde(rename = "listType")]
        list_type: ListType,
        #[serde(default = "default_version")]
        start: u32,
        tag: String,
        #[serde(flatten)]
        props: ElementProps,
        #[serde(default)]
        children: Vec<BlockNode>,
    },
    /// A single list item.
    #[serde(rename = "listitem")]
    ListItem {
        #[serde(default = "default_version")]
        value: u32,
        #[serde(flatten)]
        props: ElementProps,
        #[serde(default)]
        children: Vec<InlineNode>,
    },
}

impl BlockNode {
    /// A paragraph holding the given inline nodes.
    #[must_use]
    pub fn paragraph(children: Vec<InlineNode>) -> Self {
        Self::Paragraph {
            props: ElementProps::default(),
            children,
        }
    }

    /// Inline children of this block; lists have none of their own.
    #[must_use]
    pub fn inline_children(&self) -> &[InlineNode] {
        match self {
            Self::Paragraph { children, .. }
            | Self::Heading { children, .. }
            | Self::ListItem { children, .. } => children,
            Self::List { .. } => &[],
        }
    }
}

/// Target of a link node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkFields {
    /// Link target.
    #[serde(default)]
    pub url: String,
    /// Whether the link opens in a new tab.
    #[serde(default)]
    pub new_tab: bool,
}

/// Inline nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InlineNode {
    /// A run of text with a single format.
    Text {
        text: String,
        #[serde(default)]
        format: TextFormat,
        #[serde(default)]
        style: String,
        #[serde(default = "default_mode")]
        mode: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<u32>,
        #[serde(default = "default_version")]
        version: u32,
    },
    /// A soft line break inside a block.
    #[serde(rename = "linebreak")]
    LineBreak {
        #[serde(default = "default_version")]
        version: u32,
    },
    /// A link wrapping further inline nodes.
    Link {
        #[serde(default)]
        fields: LinkFields,
        #[serde(flatten)]
        props: ElementProps,
        #[serde(default)]
        children: Vec<InlineNode>,
    },
}

impl InlineNode {
    /// Unformatted text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            format: TextFormat::PLAIN,
            style: String::new(),
            mode: default_mode(),
            detail: None,
            version: NODE_VERSION,
        }
    }

    /// A line break.
    #[must_use]
    pub const fn line_break() -> Self {
        Self::LineBreak {
            version: NODE_VERSION,
        }
    }

    /// A link to `url` wrapping `children`.
    #[must_use]
    pub fn link(url: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Link {
            fields: LinkFields {
                url: url.into(),
                new_tab: false,
            },
            props: ElementProps::default(),
            children,
        }
    }
}

/// Bit flags describing the formatting of a text node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextFormat(u32);

impl TextFormat {
    /// No formatting.
    pub const PLAIN: Self = Self(0);
    /// Bold.
    pub const BOLD: Self = Self(1);
    /// Italic.
    pub const ITALIC: Self = Self(1 << 1);
    /// Struck through.
    pub const STRIKETHROUGH: Self = Self(1 << 2);
    /// Underlined.
    pub const UNDERLINE: Self = Self(1 << 3);
    /// Inline code.
    pub const CODE: Self = Self(1 << 4);
    /// Subscript.
    pub const SUBSCRIPT: Self = Self(1 << 5);
    /// Superscript.
    pub const SUPERSCRIPT: Self = Self(1 << 6);

    /// Raw flag bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no flag is set.
    #[must_use]
    pub const fn is_plain(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TextFormat {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TextFormat {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Document {
    /// A document with a single empty paragraph.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_blocks(vec![BlockNode::paragraph(Vec::new())])
    }

    /// A document with the given blocks.
    #[must_use]
    pub fn from_blocks(children: Vec<BlockNode>) -> Self {
        Self {
            root: Root {
                kind: ROOT_TYPE.to_string(),
                props: ElementProps::default(),
                children,
            },
        }
    }

    /// One unformatted paragraph per line. No lines gives [`Document::empty`].
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let blocks: Vec<BlockNode> = lines
            .into_iter()
            .map(|line| BlockNode::paragraph(vec![InlineNode::text(line)]))
            .collect();

        if blocks.is_empty() {
            Self::empty()
        } else {
            Self::from_blocks(blocks)
        }
    }

    /// Parse a stored value into the typed model.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    /// Convert to the JSON wire shape.
    #[must_use]
    pub fn to_value(&self) -> Value {
        // Derived serialization of plain structs with string keys cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_wire_shape() {
        assert_eq!(
            Document::empty().to_value(),
            json!({
                "root": {
                    "type": "root",
                    "format": "",
                    "indent": 0,
                    "version": 1,
                    "children": [{
                        "type": "paragraph",
                        "format": "",
                        "indent": 0,
                        "version": 1,
                        "children": [],
                    }],
                }
            })
        );
    }

    #[test]
    fn test_text_node_wire_shape() {
        let value = serde_json::to_value(InlineNode::text("hello")).unwrap();
        assert_eq!(
            value,
            json!({"type": "text", "text": "hello", "format": 0, "style": "", "mode": "normal", "version": 1})
        );
    }

    #[test]
    fn test_parse_editor_document() {
        let value = json!({
            "root": {
                "type": "root",
                "format": "",
                "indent": 0,
                "version": 1,
                "direction": "ltr",
                "children": [
                    {
                        "type": "heading",
                        "tag": "h2",
                        "format": "",
                        "indent": 0,
                        "version": 1,
                        "children": [{"type": "text", "text": "Title", "format": 1, "version": 1}],
                    },
                    {
                        "type": "list",
                        "listType": "bullet",
                        "start": 1,
                        "tag": "ul",
                        "format": "",
                        "indent": 0,
                        "version": 1,
                        "children": [{
                            "type": "listitem",
                            "value": 1,
                            "format": "",
                            "indent": 0,
                            "version": 1,
                            "children": [
                                {"type": "link", "fields": {"url": "/jobs"}, "format": "", "indent": 0, "version": 1,
                                 "children": [{"type": "text", "text": "Jobs", "format": 0, "version": 1}]},
                                {"type": "linebreak", "version": 1},
                            ],
                        }],
                    },
                ],
            }
        });

        let doc = Document::from_value(&value).unwrap();
        assert_eq!(doc.root.props.direction.as_deref(), Some("ltr"));
        assert_eq!(doc.root.children.len(), 2);

        let BlockNode::Heading { tag, children, .. } = &doc.root.children[0] else {
            unreachable!("first block is a heading");
        };
        assert_eq!(*tag, HeadingTag::H2);
        assert!(matches!(&children[0], InlineNode::Text { format, .. } if format.contains(TextFormat::BOLD)));

        let BlockNode::List { list_type, children, .. } = &doc.root.children[1] else {
            unreachable!("second block is a list");
        };
        assert_eq!(*list_type, ListType::Bullet);
        assert_eq!(children[0].inline_children().len(), 2);
    }

    #[test]
    fn test_link_without_fields_has_empty_target() {
        let node: InlineNode = serde_json::from_value(json!({
            "type": "link",
            "version": 1,
            "children": [{"type": "text", "text": "Home", "version": 1}],
        }))
        .unwrap();

        let InlineNode::Link { fields, children, .. } = node else {
            unreachable!("node is a link");
        };
        assert_eq!(fields, LinkFields::default());
        assert!(fields.url.is_empty());
        assert!(!fields.new_tab);
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn test_text_format_flags() {
        let mut format = TextFormat::BOLD | TextFormat::ITALIC;
        assert!(format.contains(TextFormat::BOLD));
        assert!(!format.contains(TextFormat::CODE));
        format |= TextFormat::CODE;
        assert_eq!(format.bits(), 0b1_0011);
        assert!(TextFormat::default().is_plain());
    }
}
