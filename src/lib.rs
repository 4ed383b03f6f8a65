//! # routetrie
//!
//! **routetrie** maps an HTTP method and a request path to a route definition
//! using one segment trie per method. Route patterns are plain paths with
//! `{name}` placeholders:
//!
//! ```text
//! GET  /post/all      -> posts.list
//! GET  /post/{id}     -> posts.show
//! PUT  /post          -> posts.create
//! ```
//!
//! ## Architecture
//!
//! - **[`route`]** - Route patterns, segments, parameter extraction and transforms
//! - **[`router`]** - Per-method tries, conflict detection and request matching
//! - **[`controller`]** - Controller factories referenced by name from routes
//! - **[`table`]** - Declarative route tables in YAML, JSON or TOML
//! - **[`hot_reload`]** - Rebuild and swap the router when its table changes
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`runtime_config`]** - Environment-driven runtime settings
//! - **[`cli`]** - The `routetrie` command
//!
//! ## Matching
//!
//! Routes are validated and inserted into their method's trie when the
//! [`Router`] is built. Two routes of one method with the same shape (same
//! literals at the same depths, parameters anywhere, names ignored) are a
//! [`RouteError::RouteConflict`] and the whole set is rejected.
//!
//! At request time the path is walked one segment at a time. An exact literal
//! always wins over a parameter at the same depth, and a choice once made is
//! never revisited.
//!
//! ## Quick Start
//!
//! ```rust
//! use routetrie::{Controller, ControllerFactory, ControllerRegistry, RouteDefinition, Router};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register("posts", |_deps| Ok(Box::new("posts controller") as Controller));
//! let factory: Arc<dyn ControllerFactory> = Arc::new(registry);
//!
//! let router = Router::new([
//!     RouteDefinition::get("/post/all", "posts").build(&factory)?,
//!     RouteDefinition::get("/post/{id}", "posts")
//!         .transform("id", |raw: &str| Ok(json!(raw.parse::<i64>()?)))
//!         .build(&factory)?,
//! ])?;
//!
//! let route = router.handle("get", "/post/4")?;
//! assert_eq!(route.pattern(), "/post/{id}");
//! assert_eq!(route.extract_parameters("/post/4")?.get("id"), Some(&json!(4)));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Logging
//!
//! The library emits `tracing` events only. Binaries install a subscriber
//! with [`logging::init_logging`], configured through `ROUTETRIE_LOG_*`
//! environment variables.

pub mod cli;
pub mod controller;
mod echo;
pub mod error;
pub mod hot_reload;
pub mod logging;
pub mod route;
pub mod router;
pub mod runtime_config;
pub mod table;

pub use controller::{Controller, ControllerFactory, ControllerRegistry};
pub use echo::{EchoController, EchoControllers};
pub use error::RouteError;
pub use route::{Parameters, RouteBuilder, RouteDefinition, Segment, Transform, TransformRegistry};
pub use router::{MethodTrie, Router, SharedRouter};
pub use table::{load_router, RouteTable};
