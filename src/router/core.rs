//! Router core module - hot path for request routing.
//!
//! `Router::handle` allocates nothing on success: the path is split lazily
//! and walked against the method's trie.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::trie::MethodTrie;
use crate::error::RouteError;
use crate::route::{split_path, strip_query, RouteDefinition};
use crate::runtime_config::RuntimeConfig;

/// Number of routes included in the startup summary log line
const SUMMARY_ROUTES: usize = 10;

/// Router holding one segment trie per HTTP method
///
/// Built once from the full route list; immutable afterwards, so a single
/// instance can be shared across threads (`Arc<Router>`) and queried
/// concurrently without locking.
#[derive(Debug)]
pub struct Router {
    tries: HashMap<Method, MethodTrie>,
    slow_match: Duration,
}

impl Router {
    /// Build a router from route definitions.
    ///
    /// # Errors
    ///
    /// [`RouteError::RouteConflict`] when two routes of the same method have the
    /// same segment shape; the whole set is rejected.
    pub fn new<I>(routes: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        Self::with_config(routes, RuntimeConfig::default())
    }

    /// Build a router using explicit runtime settings
    pub fn with_config<I>(routes: I, config: RuntimeConfig) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        let mut tries: HashMap<Method, MethodTrie> = HashMap::new();
        let mut summary: Vec<String> = Vec::with_capacity(SUMMARY_ROUTES);

        for route in routes {
            if summary.len() < SUMMARY_ROUTES {
                summary.push(format!("{} {}", route.method(), route.pattern()));
            }
            let trie = tries.entry(route.method().clone()).or_default();
            if let Err(err) = trie.insert(Arc::new(route)) {
                warn!(error = %err, "Route conflict, routing table rejected");
                return Err(err);
            }
        }

        let per_method: Vec<String> = tries
            .iter()
            .map(|(method, trie)| format!("{}={}", method, trie.len()))
            .collect();
        info!(
            routes_count = tries.values().map(MethodTrie::len).sum::<usize>(),
            methods = ?per_method,
            routes_summary = ?summary,
            routing_algorithm = "segment_trie",
            "Routing table loaded"
        );

        Ok(Self {
            tries,
            slow_match: Duration::from_micros(config.slow_match_us),
        })
    }

    /// Match a request method and path to a route.
    ///
    /// The method is compared case-insensitively. Anything after `?` in the
    /// path is ignored. At every depth an exact literal segment wins over a
    /// parameter.
    ///
    /// # Errors
    ///
    /// - [`RouteError::UnknownMethod`] when no route uses the method
    /// - [`RouteError::RouteNotFound`] when no route matches the path
    pub fn handle(&self, method: &str, path: &str) -> Result<Arc<RouteDefinition>, RouteError> {
        let trie = match normalize_method(method).and_then(|m| self.tries.get(&m)) {
            Some(trie) => trie,
            None => {
                debug!(method = %method, path = %path, "Unknown request method");
                return Err(RouteError::UnknownMethod {
                    method: method.to_ascii_uppercase(),
                });
            }
        };

        debug!(method = %method, path = %path, "Route match attempt");
        let match_start = Instant::now();
        let found = trie.lookup(split_path(strip_query(path)));
        let match_duration = match_start.elapsed();

        match found {
            Some(route) => {
                if match_duration > self.slow_match {
                    warn!(
                        method = %method,
                        path = %path,
                        route_pattern = %route.pattern(),
                        duration_us = match_duration.as_micros(),
                        "Slow route matching detected"
                    );
                } else {
                    debug!(
                        method = %method,
                        path = %path,
                        route_pattern = %route.pattern(),
                        controller = %route.controller_name(),
                        duration_us = match_duration.as_micros(),
                        "Route matched"
                    );
                }
                Ok(Arc::clone(route))
            }
            None => {
                debug!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "No route matched"
                );
                Err(RouteError::RouteNotFound {
                    method: method.to_ascii_uppercase(),
                    path: path.to_string(),
                })
            }
        }
    }

    /// Methods with at least one route
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.tries.keys()
    }

    /// Every route, grouped by method (methods in alphabetical order)
    #[must_use]
    pub fn routes(&self) -> Vec<Arc<RouteDefinition>> {
        let mut methods: Vec<&Method> = self.tries.keys().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
            .into_iter()
            .filter_map(|m| self.tries.get(m))
            .flat_map(MethodTrie::routes)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tries.values().map(MethodTrie::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Log every registered route at `info` level
    pub fn dump_routes(&self) {
        info!(count = self.len(), "Registered routes");
        for route in self.routes() {
            info!(
                method = %route.method(),
                route_pattern = %route.pattern(),
                controller = %route.controller_name(),
                "Route"
            );
        }
    }
}

/// Upper-case and parse a request method; `None` if it is not a valid token
fn normalize_method(method: &str) -> Option<Method> {
    if method.bytes().any(|b| b.is_ascii_lowercase()) {
        Method::from_bytes(method.to_ascii_uppercase().as_bytes()).ok()
    } else {
        Method::from_bytes(method.as_bytes()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Controller, ControllerFactory, ControllerRegistry};
    use std::sync::Mutex;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Records the level of every event
    struct LevelRecorder(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for LevelRecorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    #[test]
    fn test_lookup_misses_log_below_warn() {
        let mut registry = ControllerRegistry::new();
        registry.register("c", |_| Ok(Box::new(()) as Controller));
        let factory: Arc<dyn ControllerFactory> = Arc::new(registry);
        let router = Router::new([RouteDefinition::get("/post/{id}", "c")
            .build(&factory)
            .unwrap()])
        .unwrap();

        let levels = Arc::new(Mutex::new(Vec::new()));
        let subscriber =
            tracing_subscriber::registry().with(LevelRecorder(Arc::clone(&levels)));
        tracing::subscriber::with_default(subscriber, || {
            assert!(router.handle("GET", "/page/not/found").is_err());
            assert!(router.handle("DELETE", "/post/1").is_err());
        });

        let levels = levels.lock().unwrap();
        assert!(!levels.is_empty());
        assert!(levels.iter().all(|level| *level == Level::DEBUG));
    }

    #[test]
    fn test_normalize_method() {
        assert_eq!(normalize_method("get"), Some(Method::GET));
        assert_eq!(normalize_method("Put"), Some(Method::PUT));
        assert_eq!(normalize_method("DELETE"), Some(Method::DELETE));
        assert_eq!(normalize_method("PURGE").map(|m| m.to_string()), Some("PURGE".to_string()));
        assert_eq!(normalize_method(""), None);
        assert_eq!(normalize_method("BAD METHOD"), None);
    }
}
