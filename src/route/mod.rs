//! # Route Module
//!
//! A [`RouteDefinition`] is the parsed form of one route pattern such as
//! `/user/{id}/posts`: the HTTP method it answers, its ordered segments, the
//! positions of its `{name}` parameters, optional per-parameter transforms and
//! the controller it dispatches to.
//!
//! ## Patterns
//!
//! - Must be a bare path starting with `/` (no scheme, no host)
//! - Anything from the first `?` onward is dropped
//! - A segment written `{name}` is a parameter; every other segment is literal
//! - `/` is a single empty literal segment, so the root route is an ordinary route
//!
//! ## Example
//!
//! ```rust
//! use routetrie::controller::{Controller, ControllerFactory, ControllerRegistry};
//! use routetrie::RouteDefinition;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register("users", |_| Ok(Box::new(()) as Controller));
//! let factory: Arc<dyn ControllerFactory> = Arc::new(registry);
//!
//! let route = RouteDefinition::get("/user/{id}/{lang}", "users")
//!     .transform("id", |raw: &str| Ok(json!(raw.parse::<i64>()?)))
//!     .build(&factory)
//!     .unwrap();
//!
//! let params = route.extract_parameters("/user/4/pl").unwrap();
//! assert_eq!(params.get("id"), Some(&json!(4)));
//! assert_eq!(params.get("lang"), Some(&json!("pl")));
//! ```

mod definition;
mod params;
mod segment;

pub use definition::{RouteBuilder, RouteDefinition, Segments};
pub use params::{ParamVec, Parameters, Transform, TransformRegistry, MAX_INLINE_PARAMS};
pub use segment::Segment;

pub(crate) use segment::{split_path, strip_query};
