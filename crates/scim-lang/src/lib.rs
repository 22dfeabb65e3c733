pub mod ast;
mod error;
mod filter_parser;
pub mod parse_utils;
mod path;
mod token;

pub use error::{LangError, LexError, LexErrorKind, ParseError, PathError, PathErrorKind};
pub use filter_parser::parse_filter;
pub use path::{PathSegment, PathSegments, tokenize_path};
pub use token::{Token, TokenKind, tokenize_filter};

/// Lex and parse a filter string in one step.
pub fn parse_filter_str(filter: &str) -> Result<ast::Expr, LangError> {
    let tokens = tokenize_filter(filter)?;
    Ok(parse_filter(&tokens)?)
}
