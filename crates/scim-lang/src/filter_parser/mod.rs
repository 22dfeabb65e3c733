use crate::ast::{AttrPath, CompareOp, Expr, Literal, LogicalOp};
use crate::error::ParseError;
use crate::parse_utils::decode_string_literal;
use crate::token::{Token, TokenKind};

#[cfg(test)]
mod tests;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Parse a token sequence produced by [`tokenize_filter`](crate::tokenize_filter)
/// into a single expression tree.
///
/// Precedence, tightest first: `not`, `and`, `or`. Parentheses override it and
/// are kept in the tree as [`Expr::Group`].
pub fn parse_filter(tokens: &[Token]) -> Result<Expr, ParseError> {
    let mut parser = FilterParser { tokens, pos: 0 };
    if tokens.is_empty() {
        return Err(parser.error_here("empty filter"));
    }
    let expr = parser.or_expr()?;
    if parser.pos < tokens.len() {
        return Err(parser.error_here("unexpected trailing token"));
    }
    Ok(expr)
}

// ---------------------------------------------------------------------------
// Parser state
// ---------------------------------------------------------------------------

struct FilterParser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> FilterParser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind, value: &str) -> bool {
        self.peek().is_some_and(|t| t.is(kind, value))
    }

    fn eat(&mut self, kind: TokenKind, value: &str) -> bool {
        if self.check(kind, value) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, position: usize, message: impl Into<String>) -> ParseError {
        match self.tokens.get(position) {
            Some(token) => ParseError {
                message: message.into(),
                position,
                offset: token.offset(),
                found: Some(token.value().to_string()),
            },
            None => ParseError {
                message: message.into(),
                position: self.tokens.len(),
                offset: self.tokens.last().map_or(0, Token::end_offset),
                found: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Precedence levels (lowest to highest)
// ---------------------------------------------------------------------------

impl FilterParser<'_> {
    /// `or_expr = and_expr { "or" and_expr }`
    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.and_expr()?;
        while self.eat(TokenKind::Logical, "or") {
            let right = self.and_expr()?;
            left = Expr::Logical {
                op: LogicalOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// `and_expr = term { "and" term }`
    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.term()?;
        while self.eat(TokenKind::Logical, "and") {
            let right = self.term()?;
            left = Expr::Logical {
                op: LogicalOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// `term = "not" term | primary`
    fn term(&mut self) -> Result<Expr, ParseError> {
        if self.eat(TokenKind::Logical, "not") {
            let inner = self.term()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.primary()
    }

    /// `primary = "(" or_expr ")" | comparison`
    fn primary(&mut self) -> Result<Expr, ParseError> {
        if self.eat(TokenKind::Punctuation, "(") {
            let open = self.pos - 1;
            let inner = self.or_expr()?;
            if !self.eat(TokenKind::Punctuation, ")") {
                return Err(match self.peek() {
                    Some(_) => self.error_here("expected ')'"),
                    None => self.error_at(open, "unbalanced '('"),
                });
            }
            return Ok(Expr::Group(Box::new(inner)));
        }
        self.comparison()
    }

    /// `comparison = path operator [literal]`
    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let attr = match self.peek() {
            Some(token) if token.kind() == TokenKind::Path => {
                let attr = AttrPath::parse(token.value())
                    .ok_or_else(|| self.error_here("invalid attribute path"))?;
                self.pos += 1;
                attr
            }
            Some(_) => return Err(self.error_here("expected attribute path")),
            None => return Err(self.error_here("missing comparison")),
        };

        let op = match self.peek() {
            Some(token) if token.kind() == TokenKind::Operator => {
                // Operator tokens are always one of the known keywords.
                let op = CompareOp::from_keyword(token.value())
                    .ok_or_else(|| self.error_here("unknown operator"))?;
                self.pos += 1;
                op
            }
            _ => return Err(self.error_here("expected comparison operator")),
        };

        if op.is_unary() {
            return Ok(Expr::Compare {
                op,
                attr,
                value: None,
            });
        }

        let value = match self.peek() {
            Some(token) if token.kind() == TokenKind::Literal => {
                let literal =
                    decode_literal(token).ok_or_else(|| self.error_here("malformed literal"))?;
                self.advance();
                literal
            }
            _ => {
                return Err(self.error_here(format!("missing operand for '{}'", op.as_str())));
            }
        };

        Ok(Expr::Compare {
            op,
            attr,
            value: Some(value),
        })
    }
}

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

fn decode_literal(token: &Token) -> Option<Literal> {
    let text = token.value();
    match text {
        "true" => Some(Literal::Bool(true)),
        "false" => Some(Literal::Bool(false)),
        "null" => Some(Literal::Null),
        _ if text.starts_with('"') => decode_string_literal(text).map(Literal::String),
        _ if text.contains(['.', 'e', 'E']) => text.parse().ok().map(Literal::Decimal),
        _ => match text.parse::<i64>() {
            Ok(n) => Some(Literal::Integer(n)),
            Err(_) => text.parse().ok().map(Literal::Decimal),
        },
    }
}
