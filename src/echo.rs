use crate::controller::{Controller, ControllerFactory};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeSet;

/// Controller built by [`EchoControllers`]: remembers what it was built from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EchoController {
    pub name: String,
    pub dependencies: Vec<Value>,
}

impl EchoController {
    /// JSON description of the controller, used by the CLI
    #[must_use]
    pub fn describe(&self) -> Value {
        json!({
            "controller": self.name,
            "dependencies": self.dependencies,
        })
    }
}

/// Factory that knows a fixed set of controller names and builds an
/// [`EchoController`] for each of them
#[derive(Debug, Clone, Default)]
pub struct EchoControllers {
    names: BTreeSet<String>,
}

impl EchoControllers {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl ControllerFactory for EchoControllers {
    fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn create(&self, name: &str, dependencies: &[Value]) -> anyhow::Result<Controller> {
        if !self.contains(name) {
            return Err(crate::RouteError::ControllerNotFound {
                controller: name.to_string(),
            }
            .into());
        }
        Ok(Box::new(EchoController {
            name: name.to_string(),
            dependencies: dependencies.to_vec(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_controller_carries_dependencies() {
        let factory = EchoControllers::new(["posts"]);
        let controller = factory
            .create("posts", &[json!("db"), json!(3)])
            .unwrap()
            .downcast::<EchoController>()
            .unwrap();
        assert_eq!(
            controller.describe(),
            json!({"controller": "posts", "dependencies": ["db", 3]})
        );
        assert!(factory.create("users", &[]).is_err());
    }
}
