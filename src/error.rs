//! Error handling types for tree construction, rendering and replay
//!
//! Construction and rendering errors are structural: they describe a malformed
//! sequence of builder calls, never a bad content value. Replay errors carry
//! the line and column of the offending token where available.

use std::{error::Error, fmt};
use thiserror::Error;

/// Main error type for all markup operations
#[derive(Debug)]
pub struct MarkupError {
    /// The specific kind of error
    kind: MarkupErrorKind,
    /// Location in replayed code where the error occurred
    location: Option<Location>,
    /// Source error that caused this error
    source: Option<Box<dyn Error + Send + Sync>>,
    /// Additional context for the error
    context: Option<String>,
}

/// Represents a location in replayed code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn create_error(&self, kind: MarkupErrorKind, context: &str) -> MarkupError {
        MarkupError::new(kind)
            .with_location(self.line, self.column)
            .with_context(context)
    }
}

/// Top-level error categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupErrorKind {
    IO(IOError),
    Lexical(LexicalError),
    Name(NameError),
    Scope(ScopeError),
    Security(SecurityError),
    Structure(StructureError),
    Syntax(SyntaxError),
}

/// Tree shape violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// A node breaks the container-or-leaf rule or has a broken link
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
    /// Inner text given to a declaration tag such as `!DOCTYPE`
    #[error("Tag '{0}' starting with '!' cannot hold inner content")]
    InvalidTagUsage(String),
}

/// Cursor state machine violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// Scope entered while the cursor has no children
    #[error("No child node to enter")]
    NoActiveChild,
    /// Scope entered on a node that cannot hold children
    #[error("Only an element without inner text can be entered, got {0}")]
    NotScopable(String),
    /// Scope exited past the root
    #[error("Scope exited more times than it was entered")]
    UnbalancedScope,
    /// Render requested while scopes are still open
    #[error("Document still has {0} open scope(s)")]
    UnclosedScope(usize),
}

/// Name codec failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// The name cannot round-trip through the safe-name mapping
    #[error("Bad attribute name: '{0}'")]
    BadAttributeName(String),
}

/// Lexical analysis errors in replayed code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexicalError {
    /// Invalid escape sequence in a string
    #[error("Invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    /// Invalid `\u{...}` escape
    #[error("Invalid Unicode escape sequence")]
    InvalidUnicode,
    /// Character that starts no token
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// Reached end of input inside a token
    #[error("Unexpected end of input")]
    UnexpectedEOF,
    /// String literal without closing quote
    #[error("Unterminated string literal")]
    UnterminatedString,
}

/// Syntax errors in replayed code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// Token found where another was required
    #[error("Expected {expected}, found {found}")]
    Expected { expected: String, found: String },
    /// Method other than `tag`, `raw` or `comment`
    #[error("Unknown method 'doc.{0}'")]
    UnknownMethod(String),
    /// Positional or keyword argument not accepted by the method
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Same attribute given twice
    #[error("Duplicate attribute '{0}'")]
    DuplicateAttribute(String),
}

/// Replay resource limits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecurityError {
    /// Exceeded maximum depth of nesting
    #[error("Maximum nesting depth exceeded")]
    MaxDepthExceeded,
    /// Exceeded maximum input size
    #[error("Maximum input size exceeded")]
    MaxSizeExceeded,
    /// Exceeded maximum string length
    #[error("Maximum string length exceeded")]
    MaxStringLengthExceeded,
}

/// IO operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IOError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),
    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    /// Error reading from a file
    #[error("Read error: {0}")]
    ReadError(String),
    /// Error writing to a file
    #[error("Write error: {0}")]
    WriteError(String),
}

impl MarkupError {
    pub fn new(kind: MarkupErrorKind) -> Self {
        Self {
            kind,
            location: None,
            source: None,
            context: None,
        }
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.location = Some(Location { line, column });
        self
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn kind(&self) -> &MarkupErrorKind {
        &self.kind
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for MarkupErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IO(err) => err.fmt(f),
            Self::Lexical(err) => err.fmt(f),
            Self::Name(err) => err.fmt(f),
            Self::Scope(err) => err.fmt(f),
            Self::Security(err) => err.fmt(f),
            Self::Structure(err) => err.fmt(f),
            Self::Syntax(err) => err.fmt(f),
        }
    }
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "at line {}, column {}: {}", loc.line, loc.column, self.kind)?;
        } else {
            write!(f, "Error: {}", self.kind)?;
        }

        if let Some(ctx) = &self.context {
            write!(f, "\nContext: {}", ctx)?;
        }

        if let Some(source) = &self.source {
            write!(f, "\nCaused by: {}", source)?;
        }

        Ok(())
    }
}

impl Error for MarkupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err.as_ref() as &(dyn Error + 'static))
    }
}

impl From<StructureError> for MarkupError {
    fn from(err: StructureError) -> Self {
        Self::new(MarkupErrorKind::Structure(err))
    }
}

impl From<ScopeError> for MarkupError {
    fn from(err: ScopeError) -> Self {
        Self::new(MarkupErrorKind::Scope(err))
    }
}

impl From<NameError> for MarkupError {
    fn from(err: NameError) -> Self {
        Self::new(MarkupErrorKind::Name(err))
    }
}

impl From<SecurityError> for MarkupError {
    fn from(err: SecurityError) -> Self {
        Self::new(MarkupErrorKind::Security(err))
    }
}

impl From<IOError> for MarkupError {
    fn from(err: IOError) -> Self {
        Self::new(MarkupErrorKind::IO(err))
    }
}

pub type Result<T> = std::result::Result<T, MarkupError>;
