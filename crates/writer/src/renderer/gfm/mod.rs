//! Doctree to GitHub Flavored Markdown translator.
//!
//! The translator walks a doctree once, in document order, and emits
//! Markdown fragments from enter/leave callbacks. Constructs without a
//! direct Markdown form are synthesized with extra bookkeeping kept in the
//! [`Context`]: tables are buffered row by row, named references are
//! resolved against targets at the end of the walk, and id targets become
//! inline anchors.
//!
//! # Module Structure
//!
//! - `types` - List, table, and link-target types
//! - `context` - Translation state for one traversal
//! - `render` - Enter/leave callbacks per node kind
//! - `table` - Pipe-table emission

mod context;
mod render;
mod table;
mod types;

pub use context::Context;
pub use types::{CellState, LinkTarget, ListKind, PendingReference, TableKind, TableState};

use rst2gfm_core::{Node, Rst2GfmError, walk};

/// Translator options.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    /// Fail when a named reference has no matching target instead of
    /// silently dropping its definition line.
    #[serde(default)]
    pub strict_references: bool,
    /// Emit `<a id="..."></a>` markers for id targets.
    #[serde(default = "default_anchor_targets")]
    pub anchor_targets: bool,
}

fn default_anchor_targets() -> bool {
    true
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strict_references: false,
            anchor_targets: default_anchor_targets(),
        }
    }
}

impl Options {
    /// Loads options from a YAML document. Empty input yields the defaults.
    pub fn from_yaml_str(input: &str) -> Result<Self, Rst2GfmError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(input).map_err(|e| Rst2GfmError::Config(e.to_string()))
    }
}

/// Translates a doctree to Markdown with default (lenient) options.
pub fn translate(node: &Node) -> String {
    // Lenient translation has no failure path
    translate_with_options(node, &Options::default()).unwrap_or_default()
}

/// Translates a doctree to Markdown.
///
/// # Returns
///
/// * `Ok(String)` - The Markdown text
/// * `Err(Rst2GfmError::UnresolvedReference)` - Only with `strict_references`
pub fn translate_with_options(node: &Node, options: &Options) -> Result<String, Rst2GfmError> {
    let mut ctx = Context::new(options);
    walk(node, &mut ctx);
    ctx.finish()
}
