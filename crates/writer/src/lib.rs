#![deny(missing_docs)]
//! rst2gfm writer: doctree to GitHub Flavored Markdown translation.

/// Parallel conversion of many documents.
pub mod batch;
/// Parse-then-translate entry points.
pub mod convert;
/// Translator (enter/leave GFM renderer).
pub mod renderer;

pub use batch::{
    BatchInput, BatchOptions, BatchProcessingResult, BatchResult, BatchStats, convert_batch,
};
pub use convert::{convert, convert_with};
pub use renderer::gfm::{Context, Options, translate, translate_with_options};
