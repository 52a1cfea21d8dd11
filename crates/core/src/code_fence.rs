//! Backtick delimiter selection for emitted code.
//!
//! Fenced blocks and inline code spans must use a backtick run that the
//! enclosed text cannot terminate early.

/// Minimum length of a fenced code block marker.
pub const MIN_FENCE_LENGTH: usize = 3;

/// Returns the fence marker (a run of backticks) for a block of code.
///
/// Three backticks unless some line of `content` could itself act as a
/// closing fence, in which case the marker is one longer than the longest
/// such run.
pub fn fence_for(content: &str) -> String {
    let longest = content
        .lines()
        .filter_map(|line| {
            let (visual_indent, byte_offset) = leading_whitespace_info(line);
            // CommonMark: a closing fence may be indented by 0-3 spaces
            if visual_indent > 3 {
                return None;
            }
            let run = backtick_run_length(&line[byte_offset..]);
            (run >= MIN_FENCE_LENGTH).then_some(run)
        })
        .max()
        .unwrap_or(0);

    "`".repeat(MIN_FENCE_LENGTH.max(longest + 1))
}

/// Delimiter for an inline code span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineCodeDelimiter {
    /// Backtick run used on both sides.
    pub marker: String,
    /// Whether a space must separate the marker from the content.
    pub padded: bool,
}

impl InlineCodeDelimiter {
    /// Text emitted before the span content.
    pub fn opening(&self) -> String {
        if self.padded {
            format!("{} ", self.marker)
        } else {
            self.marker.clone()
        }
    }

    /// Text emitted after the span content.
    pub fn closing(&self) -> String {
        if self.padded {
            format!(" {}", self.marker)
        } else {
            self.marker.clone()
        }
    }
}

/// Chooses the inline code delimiter for `text`.
///
/// A single backtick for ordinary text. When `text` contains backticks the
/// marker is one longer than the longest run inside it, and it is padded
/// with spaces if the text starts or ends with a backtick.
pub fn inline_delimiter(text: &str) -> InlineCodeDelimiter {
    let longest = longest_backtick_run(text);
    if longest == 0 {
        return InlineCodeDelimiter {
            marker: "`".to_string(),
            padded: false,
        };
    }

    InlineCodeDelimiter {
        marker: "`".repeat(longest + 1),
        padded: text.starts_with('`') || text.ends_with('`'),
    }
}

/// Returns (visual_columns, byte_offset) for leading whitespace.
/// Visual columns expand tabs to 4-column boundaries per CommonMark.
fn leading_whitespace_info(line: &str) -> (usize, usize) {
    let mut col = 0;
    let mut bytes = 0;
    for b in line.bytes() {
        match b {
            b' ' => {
                col += 1;
                bytes += 1;
            }
            b'\t' => {
                col += 4 - (col % 4); // Tab expands to next 4-column boundary
                bytes += 1;
            }
            _ => break,
        }
    }
    (col, bytes)
}

fn backtick_run_length(text: &str) -> usize {
    text.bytes().take_while(|b| *b == b'`').count()
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for b in text.bytes() {
        if b == b'`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
