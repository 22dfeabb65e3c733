use std::collections::VecDeque;

use crate::ast::Expr;
use crate::error::{LangError, PathError};
use crate::filter_parser::parse_filter;
use crate::token::tokenize_filter;

#[cfg(test)]
mod tests;

/// One unit of an attribute path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Plain attribute or sub-attribute name.
    Attribute(String),
    /// Filter scoping the elements of the preceding multi-valued attribute.
    Filter(Expr),
}

impl PathSegment {
    pub fn as_attribute(&self) -> Option<&str> {
        match self {
            Self::Attribute(name) => Some(name),
            Self::Filter(_) => None,
        }
    }

    pub fn as_filter(&self) -> Option<&Expr> {
        match self {
            Self::Attribute(_) => None,
            Self::Filter(expr) => Some(expr),
        }
    }
}

/// Ordered, append-only sequence of path segments, consumed front to back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathSegments {
    segments: VecDeque<PathSegment>,
}

impl PathSegments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offer(&mut self, segment: PathSegment) {
        self.segments.push_back(segment);
    }

    pub fn poll(&mut self) -> Option<PathSegment> {
        self.segments.pop_front()
    }

    pub fn peek(&self) -> Option<&PathSegment> {
        self.segments.front()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Names of the plain segments, skipping filters.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(PathSegment::as_attribute)
    }
}

impl IntoIterator for PathSegments {
    type Item = PathSegment;
    type IntoIter = std::collections::vec_deque::IntoIter<PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Split a dotted attribute path such as
/// `emails[type eq "work" and primary eq true].value` into segments.
///
/// A bracketed component contributes its attribute name followed by the
/// parsed filter. Dots inside brackets do not split components, and brackets
/// inside a quoted filter value do not close the filter.
pub fn tokenize_path(path: &str) -> Result<PathSegments, LangError> {
    let mut segments = PathSegments::new();

    for component in split_components(path) {
        if component.is_empty() {
            return Err(PathError::Empty {
                path: path.to_string(),
            }
            .into());
        }

        match classify(component) {
            Component::Simple => {
                segments.offer(PathSegment::Attribute(component.to_string()));
            }
            Component::Filtered { name, filter } => {
                segments.offer(PathSegment::Attribute(name.to_string()));
                let tokens = tokenize_filter(filter)?;
                let expr = parse_filter(&tokens)?;
                segments.offer(PathSegment::Filter(expr));
            }
            Component::Invalid => {
                return Err(PathError::Invalid {
                    component: component.to_string(),
                }
                .into());
            }
        }
    }

    Ok(segments)
}

// ---------------------------------------------------------------------------
// Component handling
// ---------------------------------------------------------------------------

enum Component<'a> {
    Simple,
    Filtered { name: &'a str, filter: &'a str },
    Invalid,
}

/// Offsets of the `.`, `[` and `]` that shape a path. Characters inside a
/// quoted string within brackets are skipped, honouring `\"` escapes. A quote
/// left open is not treated as a string, so the filter lexer reports it.
fn structural_chars(text: &str) -> Vec<(usize, char)> {
    match scan_structure(text, true) {
        (marks, true) => marks,
        (_, false) => scan_structure(text, false).0,
    }
}

/// Returns the marks and whether every quote was closed.
fn scan_structure(text: &str, quotes: bool) -> (Vec<(usize, char)>, bool) {
    let mut marks = Vec::new();
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quote = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' if quotes && depth > 0 => in_quote = true,
            '[' => {
                depth += 1;
                marks.push((i, c));
            }
            ']' => {
                depth = depth.saturating_sub(1);
                marks.push((i, c));
            }
            '.' => marks.push((i, c)),
            _ => {}
        }
    }
    (marks, !in_quote)
}

/// Split on `.` outside of `[...]`.
fn split_components(path: &str) -> Vec<&str> {
    let mut components = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in structural_chars(path) {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                components.push(&path[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    components.push(&path[start..]);
    components
}

fn classify(component: &str) -> Component<'_> {
    let marks = structural_chars(component);
    let opens: Vec<usize> = marks.iter().filter(|m| m.1 == '[').map(|m| m.0).collect();
    let closes: Vec<usize> = marks.iter().filter(|m| m.1 == ']').map(|m| m.0).collect();
    let (open, close) = match (opens.as_slice(), closes.as_slice()) {
        ([], []) => return Component::Simple,
        ([open], [close]) => (*open, *close),
        _ => return Component::Invalid,
    };
    if open > 0 && open + 1 < close && close == component.len() - 1 {
        Component::Filtered {
            name: &component[..open],
            filter: &component[open + 1..close],
        }
    } else {
        Component::Invalid
    }
}
