use std::fmt;

use crate::parse_utils::is_attr_name;

// ---------------------------------------------------------------------------
// Attribute references
// ---------------------------------------------------------------------------

/// Attribute operand of a comparison, e.g. `name.familyName` or
/// `urn:ietf:params:scim:schemas:core:2.0:User:userName`.
///
/// Always names at least the top-level attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttrPath {
    uri: Option<String>,
    attribute: String,
    sub_attributes: Vec<String>,
}

impl AttrPath {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            uri: None,
            attribute: attribute.into(),
            sub_attributes: Vec::new(),
        }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_sub_attribute(mut self, name: impl Into<String>) -> Self {
        self.sub_attributes.push(name.into());
        self
    }

    /// Parse the text of a path token. Returns `None` when any dotted name is
    /// not a valid attribute name.
    pub fn parse(raw: &str) -> Option<Self> {
        let (uri, rest) = match raw.rfind(':') {
            Some(idx) => (Some(&raw[..idx]), &raw[idx + 1..]),
            None => (None, raw),
        };
        if uri.is_some_and(str::is_empty) {
            return None;
        }
        let mut names = rest.split('.');
        let attribute = names.next().filter(|n| is_attr_name(n))?;
        let sub_attributes: Vec<String> = names
            .map(|n| is_attr_name(n).then(|| n.to_string()))
            .collect::<Option<_>>()?;
        Some(Self {
            uri: uri.map(String::from),
            attribute: attribute.to_string(),
            sub_attributes,
        })
    }

    /// Schema URN prefix, without the trailing `:`.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// The top-level attribute name.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn sub_attributes(&self) -> &[String] {
        &self.sub_attributes
    }

    /// Attribute name followed by sub-attribute names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.attribute.as_str())
            .chain(self.sub_attributes.iter().map(String::as_str))
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(uri) = &self.uri {
            write!(f, "{uri}:")?;
        }
        write!(f, "{}", self.attribute)?;
        for name in &self.sub_attributes {
            write!(f, ".{name}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Co,
    Sw,
    Ew,
    Gt,
    Ge,
    Lt,
    Le,
    /// Presence; takes no literal.
    Pr,
}

impl CompareOp {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let op = match keyword {
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "co" => Self::Co,
            "sw" => Self::Sw,
            "ew" => Self::Ew,
            "gt" => Self::Gt,
            "ge" => Self::Ge,
            "lt" => Self::Lt,
            "le" => Self::Le,
            "pr" => Self::Pr,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Co => "co",
            Self::Sw => "sw",
            Self::Ew => "ew",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Pr => "pr",
        }
    }

    pub fn is_unary(&self) -> bool {
        matches!(self, Self::Pr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Integer(i64),
    Decimal(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", serde_json::Value::from(s.as_str())),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// Filter expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `attr op literal`, or `attr pr` with `value == None`.
    Compare {
        op: CompareOp,
        attr: AttrPath,
        value: Option<Literal>,
    },
    /// `left and right` / `left or right`.
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `not expr`.
    Not(Box<Expr>),
    /// Parenthesized sub-expression.
    Group(Box<Expr>),
}

impl Expr {
    /// Strip any number of enclosing groups.
    pub fn ungrouped(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Group(inner) = expr {
            expr = inner;
        }
        expr
    }

    /// Every attribute referenced by the expression, left to right.
    pub fn attributes(&self) -> Vec<&AttrPath> {
        let mut out = Vec::new();
        self.collect_attributes(&mut out);
        out
    }

    fn collect_attributes<'a>(&'a self, out: &mut Vec<&'a AttrPath>) {
        match self {
            Expr::Compare { attr, .. } => out.push(attr),
            Expr::Logical { left, right, .. } => {
                left.collect_attributes(out);
                right.collect_attributes(out);
            }
            Expr::Not(inner) | Expr::Group(inner) => inner.collect_attributes(out),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Compare {
                op,
                attr,
                value: Some(value),
            } => write!(f, "{attr} {} {value}", op.as_str()),
            Expr::Compare {
                op,
                attr,
                value: None,
            } => write!(f, "{attr} {}", op.as_str()),
            Expr::Logical { op, left, right } => write!(f, "{left} {} {right}", op.as_str()),
            Expr::Not(inner) => write!(f, "not {inner}"),
            Expr::Group(inner) => write!(f, "({inner})"),
        }
    }
}
