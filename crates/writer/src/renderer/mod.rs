#![allow(missing_docs)]
pub mod gfm;

pub use gfm::{Context, Options, translate, translate_with_options};
