//! Structured rich-text documents.
//!
//! This crate provides the node model for the editor's document format and
//! the normalizer that every stored rich-text field goes through.
//!
//! # Features
//!
//! - **Model**: Typed nodes via [`Document`], [`BlockNode`] and [`InlineNode`]
//! - **Normalization**: Canonicalize stored values via [`normalize`]
//! - **Rendering**: Plain text via [`to_plain_text`]
//!
//! # Example
//!
//! ```
//! use obf_richtext::normalize;
//! use serde_json::json;
//!
//! let text = normalize(json!("Vision interviews of\nluminaries from\nvaried fields"));
//! assert_eq!(text.to_plain_text(), "Vision interviews of\nluminaries from\nvaried fields");
//! ```

#![allow(clippy::missing_const_for_fn)]

mod nodes;
mod normalize;
mod render;

pub use nodes::{
    BlockNode, Document, ElementProps, HeadingTag, InlineNode, LinkFields, ListType, NODE_VERSION,
    ROOT_TYPE, Root, TextFormat,
};
pub use normalize::{RichText, from_plain_text, normalize};
pub use render::{html_escape, to_plain_text};
