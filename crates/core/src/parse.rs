//! Parser seam: turning document source text into a doctree.
//!
//! reStructuredText parsing itself happens outside this workspace. Any
//! front end producing a [`Node`] tree can be plugged in through
//! [`DocumentParser`]; the bundled [`JsonDoctreeParser`] reads a doctree
//! serialized as JSON.

use crate::doctree::Node;
use crate::{Rst2GfmError, SourceLocation};

/// Produces a doctree from document source text.
pub trait DocumentParser {
    /// Parse `input` into the root node of a doctree.
    fn parse(&self, input: &str) -> Result<Node, Rst2GfmError>;
}

impl<F> DocumentParser for F
where
    F: Fn(&str) -> Result<Node, Rst2GfmError>,
{
    fn parse(&self, input: &str) -> Result<Node, Rst2GfmError> {
        (self)(input)
    }
}

/// Reads a doctree serialized as JSON.
///
/// Text leaves are JSON strings; elements are objects with a `tagname`, an
/// optional `attributes` object, and an optional `children` array.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDoctreeParser;

impl DocumentParser for JsonDoctreeParser {
    fn parse(&self, input: &str) -> Result<Node, Rst2GfmError> {
        parse_doctree(input)
    }
}

/// Parse a JSON doctree.
pub fn parse_doctree(input: &str) -> Result<Node, Rst2GfmError> {
    serde_json::from_str(input).map_err(|err| Rst2GfmError::Parse {
        message: err.to_string(),
        location: error_location(&err),
    })
}

fn error_location(err: &serde_json::Error) -> SourceLocation {
    // serde_json reports line 0 for errors without a position (e.g. EOF on empty input)
    SourceLocation::new(err.line().max(1), err.column().max(1))
}
