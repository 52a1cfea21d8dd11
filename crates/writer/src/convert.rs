//! Parse-then-translate entry points.

use crate::renderer::gfm::{Options, translate_with_options};
use rst2gfm_core::{DocumentParser, JsonDoctreeParser, Rst2GfmError};

/// Converts a JSON doctree to Markdown with default options.
///
/// # Examples
///
/// ```
/// let source = r#"{"tagname": "document", "children": [
///     {"tagname": "title", "children": ["Hello"]}
/// ]}"#;
/// assert_eq!(rst2gfm_writer::convert(source).unwrap(), "# Hello\n\n");
/// ```
pub fn convert(source: &str) -> Result<String, Rst2GfmError> {
    convert_with(&JsonDoctreeParser, source, &Options::default())
}

/// Parses `source` with `parser` and translates the resulting doctree.
pub fn convert_with<P>(parser: &P, source: &str, options: &Options) -> Result<String, Rst2GfmError>
where
    P: DocumentParser + ?Sized,
{
    let tree = parser.parse(source)?;
    translate_with_options(&tree, options)
}
