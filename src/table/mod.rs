//! # Route Table Module
//!
//! Routes can be declared in a file instead of code. YAML, JSON and TOML are
//! accepted, chosen by file extension:
//!
//! ```yaml
//! controllers: [posts, root]
//! routes:
//!   - method: GET
//!     path: /
//!     controller: root
//!   - method: GET
//!     path: /post/{id}
//!     controller: posts
//!     dependencies: ["db"]
//!     params: { id: int }
//! ```
//!
//! `params` maps a parameter name to a transform registered in a
//! [`crate::TransformRegistry`] (`string`, `int`, `float` and `bool` are built in).

mod build;
mod load;
mod types;

pub use build::load_router;
pub use load::Format;
pub use types::{RouteEntry, RouteTable};
