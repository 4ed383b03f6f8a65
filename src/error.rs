use std::fmt;

/// Routing error
///
/// Construction-time variants (`RouteInvalid`, `ControllerNotFound`,
/// `RouteConflict`) mean the route configuration itself is wrong and the
/// application should refuse to start. Request-time variants (`UnknownMethod`,
/// `RouteNotFound`) are ordinary per-request outcomes, typically mapped to
/// 405/404 responses by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The route pattern is empty, not a path, or carries a malformed parameter
    RouteInvalid {
        /// The pattern as supplied by the caller
        pattern: String,
        /// What is wrong with it
        reason: String,
    },
    /// The controller factory does not know the referenced controller
    ControllerNotFound {
        /// The controller reference
        controller: String,
    },
    /// Two routes of the same method end on the same trie node
    RouteConflict {
        /// Method shared by both routes
        method: String,
        /// Pattern already registered at the node
        existing: String,
        /// Pattern that tried to register at the same node
        conflicting: String,
    },
    /// No routes are registered for the request method
    UnknownMethod {
        /// The request method as received
        method: String,
    },
    /// No route matches the request path
    RouteNotFound {
        /// Normalized request method
        method: String,
        /// The request path
        path: String,
    },
    /// A path handed to `extract_parameters` does not have the route's shape
    PathMismatch {
        /// Route pattern
        pattern: String,
        /// The offending path
        path: String,
        /// Segment count of the route
        expected: usize,
        /// Segment count of the path
        actual: usize,
    },
}

impl RouteError {
    /// Whether this error is raised while building routes rather than while
    /// serving a request.
    #[must_use]
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            RouteError::RouteInvalid { .. }
                | RouteError::ControllerNotFound { .. }
                | RouteError::RouteConflict { .. }
        )
    }

    pub(crate) fn invalid(pattern: &str, reason: impl Into<String>) -> Self {
        RouteError::RouteInvalid {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::RouteInvalid { pattern, reason } => {
                write!(f, "Route \"{}\" is not valid: {}", pattern, reason)
            }
            RouteError::ControllerNotFound { controller } => {
                write!(f, "Controller \"{}\" not found", controller)
            }
            RouteError::RouteConflict {
                method,
                existing,
                conflicting,
            } => {
                write!(
                    f,
                    "There is a route conflict for {}: {} and {}",
                    method, conflicting, existing
                )
            }
            RouteError::UnknownMethod { method } => {
                write!(f, "Unknown request method: {}", method)
            }
            RouteError::RouteNotFound { method, path } => {
                write!(f, "Could not handle {} {}", method, path)
            }
            RouteError::PathMismatch {
                pattern,
                path,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Path \"{}\" does not fit route \"{}\": expected {} segments, got {}",
                    path, pattern, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for RouteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_names_both_patterns() {
        let err = RouteError::RouteConflict {
            method: "GET".to_string(),
            existing: "/post/{id}".to_string(),
            conflicting: "/post/{login}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/post/{id}"));
        assert!(msg.contains("/post/{login}"));
        assert!(err.is_construction());
    }

    #[test]
    fn test_request_errors_are_not_construction_errors() {
        let err = RouteError::RouteNotFound {
            method: "GET".to_string(),
            path: "/page/not/found".to_string(),
        };
        assert!(!err.is_construction());
        assert_eq!(err.to_string(), "Could not handle GET /page/not/found");
        assert!(!RouteError::UnknownMethod {
            method: "DELETE".to_string()
        }
        .is_construction());
    }
}
