use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Create a source location with file information
    pub fn with_file(file: String, line: usize, column: usize) -> Self {
        Self {
            file: Some(file),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors that can occur while converting a document.
#[derive(Debug, Error)]
pub enum Rst2GfmError {
    /// IO error while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The document source could not be turned into a doctree.
    #[error("Parse error at {location}: {message}")]
    Parse {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// Translator configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(String),
    /// A named reference never met a matching target (strict mode only).
    #[error("Unresolved reference: {name}")]
    UnresolvedReference {
        /// Original reference name
        name: String,
    },
}

impl Rst2GfmError {
    /// Create a parse error with location
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Parse {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }

    /// Attach a file path to a parse error's location. Other variants pass through.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        match self {
            Self::Parse { message, location } => Self::Parse {
                message,
                location: SourceLocation::with_file(file.into(), location.line, location.column),
            },
            other => other,
        }
    }
}
