use anyhow::{anyhow, Context};
use http::Method;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::types::{RouteEntry, RouteTable};
use crate::controller::ControllerFactory;
use crate::route::{RouteDefinition, TransformRegistry};
use crate::router::Router;
use crate::runtime_config::RuntimeConfig;

impl RouteTable {
    /// Turn every entry into a validated [`RouteDefinition`].
    ///
    /// Errors carry the entry's position, method and path as context; the
    /// underlying [`crate::RouteError`] stays reachable with `downcast_ref`.
    pub fn build_routes(
        &self,
        factory: &Arc<dyn ControllerFactory>,
        transforms: &TransformRegistry,
    ) -> anyhow::Result<Vec<RouteDefinition>> {
        self.routes
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                build_entry(entry, factory, transforms).with_context(|| {
                    format!("route #{} ({} {})", index + 1, entry.method, entry.path)
                })
            })
            .collect()
    }
}

fn build_entry(
    entry: &RouteEntry,
    factory: &Arc<dyn ControllerFactory>,
    transforms: &TransformRegistry,
) -> anyhow::Result<RouteDefinition> {
    let method = Method::from_bytes(entry.method.to_ascii_uppercase().as_bytes())
        .map_err(|_| anyhow!("invalid method \"{}\"", entry.method))?;

    let mut builder = RouteDefinition::builder(method, entry.path.as_str(), entry.controller.as_str())
        .dependencies(entry.dependencies.clone());
    for (param, transform_name) in &entry.params {
        let transform = transforms
            .get(transform_name)
            .ok_or_else(|| anyhow!("unknown transform \"{}\" for parameter \"{}\"", transform_name, param))?;
        builder = builder.shared_transform(param.as_str(), transform);
    }

    let route = builder.build(factory)?;
    if let Some(unused) = entry
        .params
        .keys()
        .find(|name| !route.parameter_names().any(|declared| declared == name.as_str()))
    {
        return Err(anyhow!(
            "parameter \"{}\" has a transform but is not declared in {}",
            unused,
            route.pattern()
        ));
    }
    Ok(route)
}

impl RouteTable {
    /// Build every route and assemble them into a [`Router`]
    pub fn build_router(
        &self,
        factory: &Arc<dyn ControllerFactory>,
        transforms: &TransformRegistry,
    ) -> anyhow::Result<Router> {
        let routes = self.build_routes(factory, transforms)?;
        Ok(Router::with_config(routes, RuntimeConfig::from_env())?)
    }
}

/// Load a route table file and build a [`Router`] from it
pub fn load_router(
    path: impl AsRef<Path>,
    factory: &Arc<dyn ControllerFactory>,
    transforms: &TransformRegistry,
) -> anyhow::Result<Router> {
    let path = path.as_ref();
    let table = RouteTable::from_path(path)?;
    let router = table
        .build_router(factory, transforms)
        .with_context(|| format!("failed to build router from {}", path.display()))?;
    info!(path = %path.display(), routes = router.len(), "Route table loaded");
    Ok(router)
}
