//! Translation context for the GFM translator.

use super::Options;
use super::table::render_table;
use super::types::{CellState, ListKind, PendingReference, TableState};
use rst2gfm_core::Rst2GfmError;
use std::collections::HashMap;

/// Mutable state carried through one doctree traversal.
///
/// A context lives for exactly one document: it is created before the walk,
/// mutated by the enter/leave callbacks, and consumed by [`Context::finish`].
pub struct Context<'a> {
    /// Markdown emitted so far.
    output: String,

    /// Open lists, innermost last.
    lists: Vec<ListKind>,

    /// Current heading level; the next title gets `level + 1` hashes.
    section_level: usize,

    /// Open tables, innermost last.
    tables: Vec<TableState>,

    /// Fence of the literal block being emitted, if any.
    code_fence: Option<String>,

    /// Named references awaiting resolution at document end.
    pending_refs: Vec<PendingReference>,

    /// Target name to URI, filled as targets are visited.
    targets: HashMap<String, String>,

    options: &'a Options,
}

impl<'a> Context<'a> {
    /// Creates a fresh context.
    pub fn new(options: &'a Options) -> Self {
        Self {
            output: String::with_capacity(4096),
            lists: Vec::new(),
            section_level: 0,
            tables: Vec::new(),
            code_fence: None,
            pending_refs: Vec::new(),
            targets: HashMap::new(),
            options,
        }
    }

    /// Returns the translator options.
    pub fn options(&self) -> &Options {
        self.options
    }

    /// Writes Markdown syntax to the output.
    ///
    /// Inside a table entry only literal text is kept, so syntax is dropped
    /// rather than leaking into the document body.
    pub fn push_raw(&mut self, s: &str) {
        if !self.is_in_cell() {
            self.output.push_str(s);
        }
    }

    /// Writes inline decoration (`*`, `**`, backticks), suppressed in code blocks.
    pub fn push_markup(&mut self, s: &str) {
        if !self.is_in_code_block() {
            self.push_raw(s);
        }
    }

    /// Writes literal text to the open table entry, or to the output.
    pub fn push_text(&mut self, s: &str) {
        match self.tables.last_mut().and_then(|table| table.cell.as_mut()) {
            Some(cell) => cell.runs.push(s.to_string()),
            None => self.output.push_str(s),
        }
    }

    // Sections

    /// Current heading level.
    pub fn section_level(&self) -> usize {
        self.section_level
    }

    /// Enters a section (or a subtitle, which also consumes a level).
    pub fn enter_section(&mut self) {
        self.section_level += 1;
    }

    /// Leaves a section.
    pub fn exit_section(&mut self) {
        self.section_level = self.section_level.saturating_sub(1);
    }

    // Lists

    /// Pushes a list onto the list stack.
    pub fn enter_list(&mut self, kind: ListKind) {
        self.lists.push(kind);
    }

    /// Pops the innermost list.
    pub fn exit_list(&mut self) -> Option<ListKind> {
        self.lists.pop()
    }

    /// Innermost open list.
    pub fn current_list(&self) -> Option<ListKind> {
        self.lists.last().copied()
    }

    /// Number of open lists.
    pub fn list_depth(&self) -> usize {
        self.lists.len()
    }

    /// Indentation for an item of the innermost list: one indent unit per
    /// enclosing list, so nested content lines up with each parent marker.
    pub fn list_indent(&self) -> String {
        let enclosing = self.lists.len().saturating_sub(1);
        self.lists[..enclosing]
            .iter()
            .map(|kind| kind.indent_unit())
            .collect()
    }

    // Code blocks

    /// Enters code mode with the fence that will close the block.
    pub fn enter_code_block(&mut self, fence: String) {
        self.code_fence = Some(fence);
    }

    /// Leaves code mode, returning the closing fence.
    pub fn exit_code_block(&mut self) -> Option<String> {
        self.code_fence.take()
    }

    /// Returns true while a literal block is being emitted.
    pub fn is_in_code_block(&self) -> bool {
        self.code_fence.is_some()
    }

    // Tables

    /// Returns true if any table is open.
    pub fn is_in_table(&self) -> bool {
        !self.tables.is_empty()
    }

    /// Returns true if the innermost table has an open entry.
    pub fn is_in_cell(&self) -> bool {
        self.tables.last().is_some_and(|table| table.cell.is_some())
    }

    /// Starts buffering a table.
    pub fn start_table(&mut self, table: TableState) {
        log::trace!(
            "table: kind={:?} header={}",
            table.kind,
            table.has_header
        );
        self.tables.push(table);
    }

    /// Records the caption of the innermost table.
    pub fn set_caption(&mut self, caption: String) {
        if let Some(table) = self.tables.last_mut() {
            table.caption = Some(caption);
        }
    }

    /// Starts a new row in the innermost table.
    pub fn start_row(&mut self) {
        if let Some(table) = self.tables.last_mut() {
            table.current_row.clear();
        }
    }

    /// Completes the current row of the innermost table.
    pub fn finish_row(&mut self) {
        if let Some(table) = self.tables.last_mut() {
            let row = std::mem::take(&mut table.current_row);
            table.rows.push(row);
        }
    }

    /// Opens an entry in the innermost table. Outside a table this is a no-op
    /// and the entry's text flows straight to the output.
    pub fn start_cell(&mut self, morecols: usize, morerows: usize) {
        if let Some(table) = self.tables.last_mut() {
            table.cell = Some(CellState {
                runs: Vec::new(),
                morecols,
                morerows,
            });
        }
    }

    /// Closes the open entry, appending its text and one empty cell per
    /// spanned extra column to the current row.
    pub fn finish_cell(&mut self) {
        let Some(table) = self.tables.last_mut() else {
            return;
        };
        let Some(cell) = table.cell.take() else {
            return;
        };

        if cell.morerows > 0 {
            log::debug!(
                "row span of {} ignored: GFM tables cannot span rows",
                cell.morerows
            );
        }

        table.current_row.push(cell.text());
        table
            .current_row
            .extend(std::iter::repeat_n(String::new(), cell.morecols));
    }

    /// Stops buffering the innermost table and emits it.
    ///
    /// A table nested in an open entry cannot be emitted as syntax, so its
    /// text is folded into that entry instead: cells separated by spaces,
    /// rows by line breaks.
    pub fn finish_table(&mut self) {
        let Some(table) = self.tables.pop() else {
            return;
        };

        match self.tables.last_mut().and_then(|parent| parent.cell.as_mut()) {
            Some(cell) => {
                log::debug!("flattening table nested in a table entry");
                let text = table
                    .caption
                    .iter()
                    .cloned()
                    .chain(table.rows.iter().map(|row| {
                        row.iter()
                            .filter(|cell| !cell.is_empty())
                            .cloned()
                            .collect::<Vec<_>>()
                            .join(" ")
                    }))
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n");
                if text.is_empty() {
                    return;
                }
                if cell
                    .runs
                    .last()
                    .is_some_and(|run| !run.ends_with(char::is_whitespace))
                {
                    cell.runs.push(" ".to_string());
                }
                cell.runs.push(text);
            }
            None => {
                if let Some(markdown) = render_table(table) {
                    self.push_raw(&markdown);
                }
            }
        }
    }

    // References

    /// Records a hyperlink target's URI under its original name.
    pub fn register_target(&mut self, name: &str, uri: &str) {
        self.targets.insert(name.to_string(), uri.to_string());
    }

    /// Queues a named reference for resolution at document end.
    pub fn queue_reference(&mut self, label: String, name: String) {
        self.pending_refs.push(PendingReference { label, name });
    }

    /// Consumes the context, appending reference definitions, and returns
    /// the Markdown text.
    ///
    /// References whose target never appeared are dropped, or reported as
    /// [`Rst2GfmError::UnresolvedReference`] with `strict_references`.
    pub fn finish(mut self) -> Result<String, Rst2GfmError> {
        if self.pending_refs.is_empty() {
            return Ok(self.output);
        }

        self.output.push_str("\n\n");

        let mut emitted: Vec<&str> = Vec::new();
        for pending in &self.pending_refs {
            if emitted.contains(&pending.label.as_str()) {
                continue;
            }
            match self.targets.get(&pending.name) {
                Some(uri) => {
                    self.output
                        .push_str(&format!("[{}]: {}\n", pending.label, uri));
                    emitted.push(&pending.label);
                }
                None if self.options.strict_references => {
                    return Err(Rst2GfmError::UnresolvedReference {
                        name: pending.name.clone(),
                    });
                }
                None => {
                    log::debug!("dropping unresolved reference `{}`", pending.name);
                }
            }
        }

        Ok(self.output)
    }
}
