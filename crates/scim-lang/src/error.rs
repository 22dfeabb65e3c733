use std::fmt;

// ---------------------------------------------------------------------------
// Lexing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    UnterminatedString,
    UnexpectedCharacter,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => write!(f, "unterminated string literal"),
            Self::UnexpectedCharacter => write!(f, "unexpected character"),
        }
    }
}

/// A filter string could not be split into tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at offset {offset}: {fragment:?}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte offset of the fragment within the filter string.
    pub offset: usize,
    pub fragment: String,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A token sequence does not form a valid filter expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at token {position} (offset {offset}){}", found_suffix(.found))]
pub struct ParseError {
    pub message: String,
    /// Index of the offending token; equals the token count at end of input.
    pub position: usize,
    /// Byte offset in the source string.
    pub offset: usize,
    /// Text of the offending token, `None` at end of input.
    pub found: Option<String>,
}

fn found_suffix(found: &Option<String>) -> String {
    match found {
        Some(text) => format!(", found {text:?}"),
        None => ", found end of input".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathErrorKind {
    EmptyComponent,
    InvalidComponent,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("empty component in path {path:?}")]
    Empty { path: String },
    #[error("invalid component in path: {component}")]
    Invalid { component: String },
}

impl PathError {
    pub fn kind(&self) -> PathErrorKind {
        match self {
            Self::Empty { .. } => PathErrorKind::EmptyComponent,
            Self::Invalid { .. } => PathErrorKind::InvalidComponent,
        }
    }
}

/// Any failure raised while turning path or filter text into segments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LangError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("path error: {0}")]
    Path(#[from] PathError),
}
