//! # Router Module
//!
//! Matches a request method and path to a [`crate::RouteDefinition`].
//!
//! ## Architecture
//!
//! Each HTTP method owns a [`MethodTrie`]: an arena of nodes where every edge
//! is either an exact literal segment or the single parameter wildcard of its
//! parent. A route terminates at the node reached by walking its segments.
//!
//! - **Build**: routes are inserted one by one; a route terminating at an
//!   already occupied node is a conflict and rejects the whole set.
//! - **Match**: the request path is split lazily on `/`; at each depth the
//!   exact literal child is preferred, otherwise the parameter child is taken.
//!   There is no backtracking.
//!
//! Parameter names do not shape the trie, so `/post/{id}` and `/post/{login}`
//! land on the same node and conflict.
//!
//! ## Sharing
//!
//! [`Router`] is immutable once built and can be queried from many threads
//! through an `Arc`. [`SharedRouter`] adds atomic replacement for hot reload.
//!
//! ## Performance
//!
//! Lookup cost is O(k) in the number of path segments, independent of the
//! number of routes, and a successful match does not allocate.

mod core;
mod shared;
mod trie;


pub use core::Router;
pub use shared::SharedRouter;
pub use trie::MethodTrie;
