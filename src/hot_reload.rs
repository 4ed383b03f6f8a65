//! # Hot Reload Module
//!
//! Watches a route table file and publishes a freshly built [`Router`] into a
//! [`SharedRouter`] whenever the file changes.
//!
//! ## Reload Process
//!
//! 1. **Detection** - Filesystem watcher reports a modify or create event
//! 2. **Parse** - The table is re-read and every route re-validated
//! 3. **Build** - A complete new router is built (conflicts reject it)
//! 4. **Swap** - The new router replaces the old one atomically
//!
//! ## Error Handling
//!
//! If the new table fails to parse, validate or build, the error is logged
//! and the previous router keeps serving requests.
//!
//! Controllers may change between reloads, so the caller supplies a closure
//! that builds the [`ControllerFactory`] from each freshly parsed table.
//!
//! ```rust,ignore
//! use routetrie::{hot_reload::watch_routes, EchoControllers, SharedRouter, TransformRegistry};
//!
//! let shared = SharedRouter::new(router);
//! let _watcher = watch_routes(
//!     "routes.yaml",
//!     shared.clone(),
//!     |table| Arc::new(EchoControllers::new(table.controller_names())),
//!     TransformRegistry::new(),
//! )?;
//! // keep `_watcher` alive for as long as reloads are wanted
//! ```

use anyhow::Context;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use crate::controller::ControllerFactory;
use crate::route::TransformRegistry;
use crate::router::SharedRouter;
use crate::table::RouteTable;

/// Rebuild the router from `path` and publish it.
///
/// `make_factory` is called with the newly parsed table. On failure the
/// current router is left in place and the error returned.
pub fn reload_routes<F>(
    path: &Path,
    shared: &SharedRouter,
    make_factory: &F,
    transforms: &TransformRegistry,
) -> anyhow::Result<()>
where
    F: Fn(&RouteTable) -> Arc<dyn ControllerFactory>,
{
    let table = RouteTable::from_path(path)?;
    let factory = make_factory(&table);
    let router = table
        .build_router(&factory, transforms)
        .with_context(|| format!("failed to build router from {}", path.display()))?;
    info!(path = %path.display(), routes = router.len(), "hot-reload: applying route updates");
    shared.replace(router);
    Ok(())
}

/// Watch a route table file and rebuild the [`SharedRouter`] when it changes.
///
/// The returned watcher must be kept alive; dropping it stops the reloads.
pub fn watch_routes<P, F>(
    path: P,
    shared: SharedRouter,
    make_factory: F,
    transforms: TransformRegistry,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: Fn(&RouteTable) -> Arc<dyn ControllerFactory> + Send + 'static,
{
    let path: PathBuf = path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    if let Err(e) = reload_routes(&watch_path, &shared, &make_factory, &transforms) {
                        let chain = format!("{:#}", e);
                        error!(
                            path = %watch_path.display(),
                            error = %chain,
                            "hot-reload: keeping previous router"
                        );
                    }
                }
            }
            Err(e) => error!(error = %e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
