use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::controller::ControllerFactory;
use crate::echo::{EchoController, EchoControllers};
use crate::hot_reload::watch_routes;
use crate::route::TransformRegistry;
use crate::router::{Router, SharedRouter};
use crate::table::RouteTable;

/// Command-line interface for routetrie
#[derive(Parser)]
#[command(name = "routetrie")]
#[command(about = "Inspect and exercise route tables", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build the router from a route table and list its routes
    Check {
        /// Path to the route table (YAML, JSON or TOML)
        #[arg(short, long, env = "ROUTETRIE_ROUTES")]
        routes: PathBuf,
    },
    /// Match one request against a route table and print the result as JSON
    Match {
        /// Path to the route table (YAML, JSON or TOML)
        #[arg(short, long, env = "ROUTETRIE_ROUTES")]
        routes: PathBuf,

        /// Request method, any case
        method: String,

        /// Request path, e.g. /post/4
        path: String,
    },
    /// Keep a router hot-reloaded from a route table until interrupted
    Watch {
        /// Path to the route table (YAML, JSON or TOML)
        #[arg(short, long, env = "ROUTETRIE_ROUTES")]
        routes: PathBuf,
    },
}

/// Echo controllers for every controller the table names
#[must_use]
pub fn echo_factory(table: &RouteTable) -> Arc<dyn ControllerFactory> {
    Arc::new(EchoControllers::new(table.controller_names()))
}

fn build_router(path: &Path) -> anyhow::Result<Router> {
    let table = RouteTable::from_path(path)?;
    table
        .build_router(&echo_factory(&table), &TransformRegistry::new())
        .with_context(|| format!("failed to build router from {}", path.display()))
}

/// One line per route: `METHOD pattern -> controller`
#[must_use]
pub fn route_listing(router: &Router) -> Vec<String> {
    router
        .routes()
        .iter()
        .map(|r| format!("{} {} -> {}", r.method(), r.pattern(), r.controller_name()))
        .collect()
}

/// Match a request and describe the outcome as JSON
///
/// # Errors
///
/// Lookup failures, transform failures and controller construction failures.
pub fn match_request(router: &Router, method: &str, path: &str) -> anyhow::Result<Value> {
    let route = router.handle(method, path)?;
    let params = route
        .extract_parameters(path)
        .with_context(|| format!("failed to extract parameters for {}", route.pattern()))?;
    let controller = route.controller()?;
    let controller = match controller.downcast_ref::<EchoController>() {
        Some(echo) => echo.describe(),
        None => json!({ "controller": route.controller_name() }),
    };
    Ok(json!({
        "method": route.method().as_str(),
        "pattern": route.pattern(),
        "controller": controller,
        "params": params,
    }))
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The route table cannot be read, parsed or validated
/// - Two routes conflict
/// - The requested route cannot be matched
/// - The file watcher cannot be set up
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Check { routes } => {
            let router = build_router(routes)?;
            for line in route_listing(&router) {
                println!("{line}");
            }
            println!("{} routes OK", router.len());
            Ok(())
        }
        Commands::Match {
            routes,
            method,
            path,
        } => {
            let router = build_router(routes)?;
            let outcome = match_request(&router, method, path)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
        Commands::Watch { routes } => {
            let router = build_router(routes)?;
            router.dump_routes();
            let shared = SharedRouter::new(router);
            // factory is rebuilt per reload so newly named controllers resolve
            let _watcher = watch_routes(routes, shared, echo_factory, TransformRegistry::new())
                .with_context(|| format!("failed to watch {}", routes.display()))?;
            info!(path = %routes.display(), "Watching route table");
            loop {
                std::thread::park();
            }
        }
    }
}
