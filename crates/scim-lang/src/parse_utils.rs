use winnow::ascii::multispace0;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{literal, one_of, take_while};

// ---------------------------------------------------------------------------
// Whitespace
// ---------------------------------------------------------------------------

pub fn ws_skip(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

// ---------------------------------------------------------------------------
// Words (attribute paths, keywords, bare literals)
// ---------------------------------------------------------------------------

/// Characters allowed in an unquoted word: attribute names, URN prefixes
/// (`urn:ietf:params:scim:schemas:core:2.0:User`), sub-attribute dots,
/// `$ref`, and numeric literals including sign and exponent.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '$' | '.' | ':' | '+')
}

pub fn word<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., is_word_char).parse_next(input)
}

pub fn paren(input: &mut &str) -> ModalResult<char> {
    one_of(['(', ')']).parse_next(input)
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// Match a double-quoted string and return it verbatim, quotes and escape
/// sequences included. A backslash always consumes the following character.
///
/// An opening quote without a matching close is a hard (`Cut`) failure.
pub fn quoted_string_raw<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    let start: &'a str = input;
    literal("\"").parse_next(input)?;
    let body: &'a str = input;
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => {
                let len = 1 + i + 1;
                *input = &start[len..];
                return Ok(&start[..len]);
            }
            _ => {}
        }
    }
    Err(ErrMode::Cut(ContextError::new()))
}

/// Decode a raw quoted literal produced by [`quoted_string_raw`] using JSON
/// string escape rules.
pub fn decode_string_literal(raw: &str) -> Option<String> {
    serde_json::from_str::<String>(raw).ok()
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// A word is numeric when it starts like a number and parses as one.
pub fn is_number_literal(word: &str) -> bool {
    let mut chars = word.chars();
    let starts_numeric = match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    };
    starts_numeric && word.parse::<f64>().is_ok()
}

// ---------------------------------------------------------------------------
// Attribute names
// ---------------------------------------------------------------------------

/// `ATTRNAME = ALPHA *(nameChar)`; `$ref` is accepted as a sub-attribute name.
pub fn is_attr_name(name: &str) -> bool {
    if name == "$ref" {
        return true;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
