use scim_lang::ast::Expr;
use scim_resource::{ScimReason, ScimResult};
use serde::Deserialize;

use crate::context::{Processor, RequestContext};
use crate::engine::{ResourceKind, ScimEngine};
use crate::error::scim_error;
use crate::request::{HttpMethod, RequestSource};

pub const SEARCH_URN: &str = "urn:ietf:params:scim:api:messages:2.0:SearchRequest";

/// Filter applied when a query carries none: every resource has an id.
const MATCH_ALL_FILTER: &str = "id pr";

// ---------------------------------------------------------------------------
// SearchRequest (raw parameters)
// ---------------------------------------------------------------------------

/// Query parameters as received, before defaults and validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub schemas: Vec<String>,
    pub attributes: Vec<String>,
    pub excluded_attributes: Vec<String>,
    pub filter: String,
    pub sort_by: String,
    pub sort_order: String,
    pub start_index: i64,
    pub count: Option<i64>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            schemas: Vec::new(),
            attributes: Vec::new(),
            excluded_attributes: Vec::new(),
            filter: String::new(),
            sort_by: String::new(),
            sort_order: String::new(),
            start_index: 1,
            count: None,
        }
    }
}

impl SearchRequest {
    /// Read parameters from the URL query of a GET request.
    pub fn from_query(req: &dyn RequestSource) -> ScimResult<Self> {
        let param = |name: &str| req.query_param(name).unwrap_or_default();

        let start_index = match param("startIndex") {
            "" => 1,
            raw => raw.trim().parse().map_err(|_| {
                scim_error(
                    ScimReason::InvalidValue,
                    "startIndex param must be a 1-based integer",
                )
            })?,
        };
        let count = match param("count") {
            "" => None,
            raw => Some(raw.trim().parse().map_err(|_| {
                scim_error(
                    ScimReason::InvalidValue,
                    "count param must be a non-negative integer",
                )
            })?),
        };

        Ok(Self {
            schemas: vec![SEARCH_URN.to_string()],
            attributes: split_list(param("attributes")),
            excluded_attributes: split_list(param("excludedAttributes")),
            filter: param("filter").to_string(),
            sort_by: param("sortBy").to_string(),
            sort_order: param("sortOrder").to_string(),
            start_index,
            count,
        })
    }

    /// Decode a POSTed SearchRequest message.
    pub fn from_body(body: &[u8]) -> ScimResult<Self> {
        serde_json::from_slice(body).map_err(|e| {
            scim_error(
                ScimReason::InvalidSyntax,
                format!("failed to deserialize request body: {e}"),
            )
        })
    }

    /// Check the message URN and sort order, then apply defaults and clamp
    /// paging. `filter` is not compiled here.
    pub fn normalize(mut self, items_per_page: usize) -> ScimResult<Self> {
        if self.schemas.len() != 1 || self.schemas[0] != SEARCH_URN {
            return Err(scim_error(
                ScimReason::InvalidSyntax,
                format!("search request must have urn '{SEARCH_URN}'"),
            ));
        }
        if !matches!(self.sort_order.as_str(), "" | "ascending" | "descending") {
            return Err(scim_error(
                ScimReason::InvalidValue,
                "sortOrder param should have value [ascending] or [descending]",
            ));
        }
        if self.filter.trim().is_empty() {
            self.filter = MATCH_ALL_FILTER.to_string();
        }
        self.start_index = self.start_index.max(1);
        let count = self
            .count
            .unwrap_or_else(|| i64::try_from(items_per_page).unwrap_or(i64::MAX));
        self.count = Some(count.max(0));
        Ok(self)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// QueryParams (resolved)
// ---------------------------------------------------------------------------

/// Validated query ready for a storage backend.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub inclusion: Vec<String>,
    pub exclusion: Vec<String>,
    pub filter: Expr,
    pub sort_by: Option<String>,
    pub ascending: bool,
    /// 1-based index of the first result.
    pub page_start: usize,
    pub page_size: usize,
}

impl QueryParams {
    /// Normalize `request` and compile its filter through `engine`.
    pub fn resolve(engine: &ScimEngine, request: SearchRequest) -> ScimResult<Self> {
        let request = request.normalize(engine.service().items_per_page)?;
        let filter = engine.compile_filter(&request.filter)?;
        Ok(Self {
            inclusion: request.attributes,
            exclusion: request.excluded_attributes,
            filter,
            sort_by: Some(request.sort_by).filter(|s| !s.is_empty()),
            ascending: request.sort_order != "descending",
            page_start: usize::try_from(request.start_index).unwrap_or(usize::MAX),
            page_size: request
                .count
                .and_then(|c| usize::try_from(c).ok())
                .unwrap_or_default(),
        })
    }
}

// ---------------------------------------------------------------------------
// SearchParamParser
// ---------------------------------------------------------------------------

/// Fills `schema` and `query` on the context from a query request.
pub struct SearchParamParser<'e> {
    engine: &'e ScimEngine,
    kind: ResourceKind,
}

impl<'e> SearchParamParser<'e> {
    pub fn new(engine: &'e ScimEngine, kind: ResourceKind) -> Self {
        Self { engine, kind }
    }
}

impl Processor for SearchParamParser<'_> {
    fn process(&self, ctx: &mut RequestContext<'_>) -> ScimResult<()> {
        let req = ctx.request();
        ctx.schema = Some(self.engine.schema_for(self.kind)?);

        let request = match req.method() {
            HttpMethod::Get => SearchRequest::from_query(req)?,
            HttpMethod::Post => {
                let body = req.body().map_err(|e| {
                    scim_error(
                        ScimReason::ServerError,
                        format!("failed to read request body: {e}"),
                    )
                })?;
                SearchRequest::from_body(&body)?
            }
            other => {
                return Err(scim_error(
                    ScimReason::NotImplemented,
                    format!("resource query by http method {other} is not supported"),
                ));
            }
        };

        let query = QueryParams::resolve(self.engine, request)?;
        scim_debug!(req, kind = ?self.kind, filter = %query.filter,
            start = query.page_start, count = query.page_size, "query parameters parsed");
        ctx.query = Some(query);
        Ok(())
    }
}
