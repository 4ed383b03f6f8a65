//! # CLI Module
//!
//! Command-line access to route tables.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Build the router and list every route:
//!
//! ```bash
//! routetrie check --routes routes.yaml
//! ```
//!
//! ### `match`
//!
//! Match one request and print the route, controller and parameters as JSON:
//!
//! ```bash
//! routetrie match --routes routes.yaml GET /post/4
//! ```
//!
//! ### `watch`
//!
//! Rebuild the router whenever the table changes, logging each reload:
//!
//! ```bash
//! ROUTETRIE_LOG_FORMAT=pretty routetrie watch --routes routes.yaml
//! ```
//!
//! Controllers referenced by the table are served by
//! [`crate::echo::EchoControllers`], which echo their name and dependencies.

mod commands;


pub use commands::{echo_factory, match_request, route_listing, run_cli, Cli, Commands};
