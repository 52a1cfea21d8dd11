#![deny(missing_docs)]
//! rst2gfm core: doctree model, traversal, parser seam, and anchor helpers.

/// Backtick delimiter selection for code output.
pub mod code_fence;
/// Document tree types.
pub mod doctree;
/// Core error types.
pub mod error;
/// Parser seam and the JSON doctree reader.
pub mod parse;
/// Anchor and reference-name normalization.
pub mod slug;
/// Enter/leave tree traversal.
pub mod walk;

pub use code_fence::{InlineCodeDelimiter, fence_for, inline_delimiter};
pub use doctree::{AttrValue, Attributes, Element, Node, NodeKind};
pub use error::{Rst2GfmError, SourceLocation};
pub use parse::{DocumentParser, JsonDoctreeParser, parse_doctree};
pub use slug::{make_anchor, normalize_refname};
pub use walk::{Visit, Visitor, walk};
