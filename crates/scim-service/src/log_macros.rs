/// Domain-aware logging macros.
///
/// Each macro injects a `domain` field so callers never repeat the string
/// literal. Domains in use: `sys` (bootstrap), `conf` (configuration and
/// schemas), `req` (request parameter parsing), `val` (validation).
///
/// ```ignore
/// scim_info!(sys, schemas = 3, "schema repository loaded");
/// scim_debug!(req, filter = %raw, "filter compiled");
/// ```

#[doc(hidden)]
macro_rules! scim_log {
    ($level:ident, $domain:ident, $($field:tt)*) => {
        tracing::$level!(domain = stringify!($domain), $($field)*)
    };
}

#[allow(unused_macros)]
macro_rules! scim_error {
    ($domain:ident, $($rest:tt)*) => {
        scim_log!(error, $domain, $($rest)*)
    };
}

macro_rules! scim_warn {
    ($domain:ident, $($rest:tt)*) => {
        scim_log!(warn, $domain, $($rest)*)
    };
}

macro_rules! scim_info {
    ($domain:ident, $($rest:tt)*) => {
        scim_log!(info, $domain, $($rest)*)
    };
}

macro_rules! scim_debug {
    ($domain:ident, $($rest:tt)*) => {
        scim_log!(debug, $domain, $($rest)*)
    };
}

#[allow(unused_macros)]
macro_rules! scim_trace {
    ($domain:ident, $($rest:tt)*) => {
        scim_log!(trace, $domain, $($rest)*)
    };
}
