use std::collections::HashMap;
use std::fmt;
use std::io;

/// HTTP methods the parameter parsers distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Other(String),
}

impl HttpMethod {
    pub fn parse(method: &str) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
            Self::Put => f.write_str("PUT"),
            Self::Patch => f.write_str("PATCH"),
            Self::Delete => f.write_str("DELETE"),
            Self::Other(m) => f.write_str(m),
        }
    }
}

/// Transport-agnostic view of an incoming request.
///
/// Missing parameters read as `None`; an empty value is reported as given.
pub trait RequestSource {
    fn method(&self) -> HttpMethod;
    fn query_param(&self, name: &str) -> Option<&str>;
    fn url_param(&self, name: &str) -> Option<&str>;
    fn body(&self) -> io::Result<Vec<u8>>;
}

/// Owned request assembled from already-decoded parts.
#[derive(Debug, Clone)]
pub struct RequestParts {
    method: HttpMethod,
    query: HashMap<String, String>,
    url_params: HashMap<String, String>,
    body: Vec<u8>,
}

impl RequestParts {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            query: HashMap::new(),
            url_params: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_url_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.url_params.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

impl RequestSource for RequestParts {
    fn method(&self) -> HttpMethod {
        self.method.clone()
    }

    fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    fn url_param(&self, name: &str) -> Option<&str> {
        self.url_params.get(name).map(String::as_str)
    }

    fn body(&self) -> io::Result<Vec<u8>> {
        Ok(self.body.clone())
    }
}
