use winnow::combinator::alt;
use winnow::prelude::*;

use crate::error::{LexError, LexErrorKind};
use crate::parse_utils::{is_number_literal, paren, quoted_string_raw, word, ws_skip};

/// Lexical category of a filter token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Attribute path, e.g. `name.familyName` or a URN-qualified name.
    Path,
    /// Comparison operator (`eq`, `ne`, `co`, `sw`, `ew`, `gt`, `ge`, `lt`, `le`, `pr`).
    Operator,
    /// `and`, `or`, `not`.
    Logical,
    /// Quoted string, number, `true`, `false` or `null`.
    Literal,
    /// `(` or `)`.
    Punctuation,
}

/// A single lexical unit of a filter string.
///
/// Keyword values are normalized to lower case; string literals keep their
/// surrounding quotes and escapes so the parser can tell `"true"` from `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    value: String,
    kind: TokenKind,
    offset: usize,
}

impl Token {
    pub fn new(value: impl Into<String>, kind: TokenKind, offset: usize) -> Self {
        Self {
            value: value.into(),
            kind,
            offset,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Byte offset of the token in the source string.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn end_offset(&self) -> usize {
        self.offset + self.value.len()
    }

    pub(crate) fn is(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value == value
    }
}

const OPERATORS: [&str; 10] = ["eq", "ne", "co", "sw", "ew", "gt", "ge", "lt", "le", "pr"];
const LOGICALS: [&str; 3] = ["and", "or", "not"];
const KEYWORD_LITERALS: [&str; 3] = ["true", "false", "null"];

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Split a filter string into an ordered token sequence.
pub fn tokenize_filter(filter: &str) -> Result<Vec<Token>, LexError> {
    let mut input = filter;
    let mut tokens = Vec::new();

    loop {
        let _ = ws_skip.parse_next(&mut input);
        if input.is_empty() {
            break;
        }
        let offset = filter.len() - input.len();
        let next = alt((
            quoted_string_raw.map(|raw: &str| (TokenKind::Literal, raw.to_string())),
            paren.map(|c: char| (TokenKind::Punctuation, c.to_string())),
            word.map(classify_word),
        ))
        .parse_next(&mut input);

        match next {
            Ok((kind, value)) => tokens.push(Token::new(value, kind, offset)),
            Err(_) => return Err(lex_error(filter, offset)),
        }
    }

    Ok(tokens)
}

fn classify_word(word: &str) -> (TokenKind, String) {
    let lower = word.to_ascii_lowercase();
    if OPERATORS.contains(&lower.as_str()) {
        (TokenKind::Operator, lower)
    } else if LOGICALS.contains(&lower.as_str()) {
        (TokenKind::Logical, lower)
    } else if KEYWORD_LITERALS.contains(&lower.as_str()) {
        (TokenKind::Literal, lower)
    } else if is_number_literal(word) {
        (TokenKind::Literal, word.to_string())
    } else {
        (TokenKind::Path, word.to_string())
    }
}

fn lex_error(filter: &str, offset: usize) -> LexError {
    let rest = &filter[offset..];
    if rest.starts_with('"') {
        LexError {
            kind: LexErrorKind::UnterminatedString,
            offset,
            fragment: rest.to_string(),
        }
    } else {
        let fragment = rest.chars().next().map(String::from).unwrap_or_default();
        LexError {
            kind: LexErrorKind::UnexpectedCharacter,
            offset,
            fragment,
        }
    }
}
