//! # Controller Module
//!
//! Routes carry an opaque controller reference (a name) plus a list of
//! dependency values. Turning that pair into a live object is the job of a
//! [`ControllerFactory`] supplied by the application; the router itself never
//! constructs anything.
//!
//! ```rust
//! use routetrie::controller::{Controller, ControllerRegistry};
//!
//! struct Greeter(String);
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register("greeter", |deps| {
//!     let name = deps.first().and_then(|v| v.as_str()).unwrap_or("world");
//!     Ok(Box::new(Greeter(name.to_string())) as Controller)
//! });
//! assert!(registry.len() == 1);
//! ```

use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// A constructed controller instance. Callers downcast to their concrete type.
pub type Controller = Box<dyn Any + Send>;

type Constructor = Box<dyn Fn(&[Value]) -> anyhow::Result<Controller> + Send + Sync>;

/// Capability that builds controllers from a reference and its dependencies
pub trait ControllerFactory: Send + Sync {
    /// Whether `name` refers to a controller this factory can build
    fn contains(&self, name: &str) -> bool;

    /// Build a new controller instance.
    ///
    /// Errors are returned to the caller of [`crate::RouteDefinition::controller`]
    /// as-is.
    fn create(&self, name: &str, dependencies: &[Value]) -> anyhow::Result<Controller>;
}

/// Name-keyed registry of controller constructors
#[derive(Default)]
pub struct ControllerRegistry {
    constructors: HashMap<String, Constructor>,
}

impl ControllerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under `name`, replacing any previous one
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&[Value]) -> anyhow::Result<Controller> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Box::new(constructor));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.constructors.keys().collect();
        names.sort();
        f.debug_struct("ControllerRegistry")
            .field("controllers", &names)
            .finish()
    }
}

impl ControllerFactory for ControllerRegistry {
    fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    fn create(&self, name: &str, dependencies: &[Value]) -> anyhow::Result<Controller> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| crate::RouteError::ControllerNotFound {
                controller: name.to_string(),
            })?;
        constructor(dependencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FullName {
        first: String,
        last: String,
    }

    fn registry() -> ControllerRegistry {
        let mut registry = ControllerRegistry::new();
        registry.register("full_name", |deps| {
            let part = |i: usize| {
                deps.get(i)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| anyhow::anyhow!("missing dependency {}", i))
            };
            Ok(Box::new(FullName {
                first: part(0)?,
                last: part(1)?,
            }) as Controller)
        });
        registry
    }

    #[test]
    fn test_registry_builds_with_dependencies() {
        let registry = registry();
        assert!(registry.contains("full_name"));
        assert!(!registry.contains("missing"));

        let controller = registry
            .create("full_name", &[Value::from("John"), Value::from("Week")])
            .unwrap();
        let full = controller.downcast::<FullName>().unwrap();
        assert_eq!(format!("{} {}", full.first, full.last), "John Week");
    }

    #[test]
    fn test_registry_forwards_constructor_errors() {
        let err = registry().create("full_name", &[]).err().unwrap();
        assert_eq!(err.to_string(), "missing dependency 0");
    }

    #[test]
    fn test_registry_unknown_controller() {
        let err = registry().create("nope", &[]).err().unwrap();
        assert_eq!(
            err.downcast_ref::<crate::RouteError>(),
            Some(&crate::RouteError::ControllerNotFound {
                controller: "nope".to_string()
            })
        );
    }
}
