use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::error::RouteError;

/// Base used to check that a pattern is a path and nothing else
const VALIDATION_BASE: &str = "http://example.com";
const VALIDATION_HOST: &str = "example.com";

/// One `/`-delimited component of a route pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Must equal the request segment exactly
    Literal(Arc<str>),
    /// Matches any single request segment, captured under the given name
    Param(Arc<str>),
}

impl Segment {
    /// Classify one raw pattern segment.
    ///
    /// Only segments that both start with `{` and end with `}` are parameters;
    /// everything else, including the empty segment, is literal.
    pub(crate) fn parse(pattern: &str, raw: &str) -> Result<Self, RouteError> {
        if raw.len() >= 2 && raw.starts_with('{') && raw.ends_with('}') {
            let name = &raw[1..raw.len() - 1];
            if name.is_empty() {
                return Err(RouteError::invalid(pattern, "parameter name is empty"));
            }
            if name.contains(['{', '}']) {
                return Err(RouteError::invalid(
                    pattern,
                    format!("parameter \"{}\" is malformed", raw),
                ));
            }
            return Ok(Segment::Param(Arc::from(name)));
        }
        Ok(Segment::Literal(Arc::from(raw)))
    }

    #[must_use]
    pub fn is_param(&self) -> bool {
        matches!(self, Segment::Param(_))
    }

    /// Parameter name, if this is a parameter segment
    #[must_use]
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Param(name) => Some(&**name),
            Segment::Literal(_) => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Param(name) => write!(f, "{{{}}}", name),
        }
    }
}

/// Drop everything from the first `?` onward
pub(crate) fn strip_query(path: &str) -> &str {
    match path.find('?') {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Split a path on `/`, discarding the empty element before the leading slash
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    let mut parts = path.split('/');
    parts.next();
    parts
}

/// Check that `pattern` is a bare path: leading `/`, no scheme, no host.
pub(crate) fn validate_pattern(pattern: &str) -> Result<(), RouteError> {
    if pattern.is_empty() {
        return Err(RouteError::invalid(pattern, "route is empty"));
    }
    if !pattern.starts_with('/') {
        return Err(RouteError::invalid(pattern, "route must start with '/'"));
    }
    if pattern
        .chars()
        .any(|c| c.is_ascii_whitespace() || c.is_control())
    {
        return Err(RouteError::invalid(
            pattern,
            "route contains whitespace or control characters",
        ));
    }

    let candidate = format!("{}{}", VALIDATION_BASE, pattern);
    let url = Url::parse(&candidate)
        .map_err(|e| RouteError::invalid(pattern, format!("not a valid path: {}", e)))?;
    if url.host_str() != Some(VALIDATION_HOST) {
        return Err(RouteError::invalid(pattern, "route must not contain a host"));
    }
    if url.fragment().is_some() {
        return Err(RouteError::invalid(pattern, "route must not contain a fragment"));
    }
    if url.path().is_empty() {
        return Err(RouteError::invalid(pattern, "route has no path"));
    }
    Ok(())
}
