use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Declarative route table, as read from a YAML, JSON or TOML file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouteTable {
    /// Controller names known to the application.
    ///
    /// Only read by [`RouteTable::controller_names`]; building routes resolves
    /// controllers through the factory passed in, whatever this lists.
    #[serde(default)]
    pub controllers: Vec<String>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// One route of a [`RouteTable`]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    /// HTTP method, any case
    pub method: String,
    /// Route pattern, e.g. `/post/{id}`
    pub path: String,
    /// Controller reference
    pub controller: String,
    /// Values forwarded to the controller factory
    #[serde(default)]
    pub dependencies: Vec<Value>,
    /// Parameter name -> transform name (see [`crate::TransformRegistry`])
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl RouteTable {
    /// Declared controllers, or every controller the routes reference when
    /// `controllers` is empty (sorted, without duplicates)
    #[must_use]
    pub fn controller_names(&self) -> Vec<String> {
        if !self.controllers.is_empty() {
            return self.controllers.clone();
        }
        let mut names: Vec<String> = self.routes.iter().map(|r| r.controller.clone()).collect();
        names.sort();
        names.dedup();
        names
    }
}
