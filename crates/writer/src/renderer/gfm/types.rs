//! Type definitions for the GFM translator.

use rst2gfm_core::Attributes;

/// Kind of list currently open on the list stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Bullet list (`- `).
    Bullet,
    /// Enumerated list (`1. `).
    Enumerated,
}

impl ListKind {
    /// Marker emitted before each item.
    ///
    /// Enumerated items always use `1.`; GFM renderers number them.
    pub fn marker(self) -> &'static str {
        match self {
            ListKind::Bullet => "- ",
            ListKind::Enumerated => "1. ",
        }
    }

    /// Indentation per nesting level, wide enough to align with the marker.
    pub fn indent_unit(self) -> &'static str {
        match self {
            ListKind::Bullet => "  ",
            ListKind::Enumerated => "   ",
        }
    }
}

/// Source flavor of a table, taken from its class hints.
///
/// Recorded for diagnostics only: GFM has a single table shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// `csv-table` directive.
    Csv,
    /// `list-table` directive.
    List,
    /// Grid table.
    Grid,
    /// Simple table (the fallback).
    Simple,
}

impl TableKind {
    /// Classifies a table from its `classes` attribute.
    pub fn classify(attributes: &Attributes) -> Self {
        if attributes.contains_class("csv-table") {
            TableKind::Csv
        } else if attributes.contains_class("list-table") {
            TableKind::List
        } else if attributes.contains_class("grid") {
            TableKind::Grid
        } else {
            TableKind::Simple
        }
    }
}

/// Text accumulated for the table entry being visited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellState {
    /// Literal text runs, in document order.
    pub runs: Vec<String>,
    /// Extra columns spanned (`morecols`).
    pub morecols: usize,
    /// Extra rows spanned (`morerows`). Not representable in GFM.
    pub morerows: usize,
}

impl CellState {
    /// Joined cell text with line breaks as `<br>` and outer whitespace trimmed.
    pub fn text(&self) -> String {
        self.runs.concat().replace('\n', "<br>").trim().to_string()
    }
}

/// Rows buffered for the table being visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    /// Table flavor.
    pub kind: TableKind,
    /// Whether the first row is a header row.
    pub has_header: bool,
    /// Caption taken from the table title.
    pub caption: Option<String>,
    /// Completed rows.
    pub rows: Vec<Vec<String>>,
    /// Row being filled.
    pub current_row: Vec<String>,
    /// Entry being filled, if any.
    pub cell: Option<CellState>,
}

impl TableState {
    /// Creates an empty table buffer for an element's attributes.
    pub fn new(attributes: &Attributes) -> Self {
        Self {
            kind: TableKind::classify(attributes),
            has_header: !attributes.contains_class("no-header"),
            caption: None,
            rows: Vec::new(),
            current_row: Vec::new(),
            cell: None,
        }
    }
}

/// How a reference points at its destination.
///
/// Attribute checks happen in priority order: `refuri`, `refid`, `refname`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// External URI.
    Uri(&'a str),
    /// In-document id, rendered as an anchor link.
    Internal(&'a str),
    /// Named reference resolved against targets at document end.
    Named(&'a str),
    /// No recognized destination.
    Unknown,
}

impl<'a> LinkTarget<'a> {
    /// Picks the destination of a reference from its attributes.
    pub fn from_attributes(attributes: &'a Attributes) -> Self {
        if let Some(uri) = attributes.get_str("refuri") {
            LinkTarget::Uri(uri)
        } else if let Some(id) = attributes.get_str("refid") {
            LinkTarget::Internal(id)
        } else if let Some(name) = attributes.get_str("refname") {
            LinkTarget::Named(name)
        } else {
            LinkTarget::Unknown
        }
    }
}

/// A named reference awaiting resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReference {
    /// Normalized link label.
    pub label: String,
    /// Original reference name, the key into the target map.
    pub name: String,
}
