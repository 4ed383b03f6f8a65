use routetrie::{RouteDefinition, RouteError, Router, SharedRouter};
use serde_json::json;
use std::sync::Arc;
use std::thread;

mod common;
use common::controllers::factory;

fn blog_router() -> Router {
    let factory = factory();
    Router::new([
        RouteDefinition::get("/", "blog").build(&factory).unwrap(),
        RouteDefinition::get("/post/all", "blog").build(&factory).unwrap(),
        RouteDefinition::get("/post/{id}", "blog")
            .transform("id", |raw: &str| Ok(json!(raw.parse::<i64>()?)))
            .build(&factory)
            .unwrap(),
        RouteDefinition::put("/post", "blog").build(&factory).unwrap(),
        RouteDefinition::get("/user/{name}/posts/{id}", "blog")
            .build(&factory)
            .unwrap(),
    ])
    .unwrap()
}

#[test]
fn test_handle_then_extract() {
    let router = blog_router();
    let path = "/post/42?ref=home";
    let route = router.handle("get", path).unwrap();
    assert_eq!(route.pattern(), "/post/{id}");
    assert_eq!(route.extract_parameters(path).unwrap().to_json(), json!({"id": 42}));
}

#[test]
fn test_put_and_get_are_distinct() {
    let router = blog_router();
    let put = router.handle("PUT", "/post").unwrap();
    assert_eq!(put.method(), &http::Method::PUT);
    assert!(router.handle("GET", "/post").is_err());
}

#[test]
fn test_conflict_message() {
    let factory = factory();
    let err = Router::new([
        RouteDefinition::get("/post/{id}", "blog").build(&factory).unwrap(),
        RouteDefinition::get("/post/{login}", "blog").build(&factory).unwrap(),
    ])
    .unwrap_err();
    assert!(err.is_construction());
    assert_eq!(
        err.to_string(),
        "There is a route conflict for GET: /post/{login} and /post/{id}"
    );
}

#[test]
fn test_lookup_errors_are_not_construction() {
    let router = blog_router();
    let unknown = router.handle("DELETE", "/x").unwrap_err();
    assert_eq!(unknown.to_string(), "Unknown request method: DELETE");
    assert!(!unknown.is_construction());

    let missing = router.handle("GET", "/page/not/found").unwrap_err();
    assert!(matches!(missing, RouteError::RouteNotFound { .. }));
    assert!(!missing.is_construction());
}

#[test]
fn test_router_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Router>();
    assert_send_sync::<SharedRouter>();
}

#[test]
fn test_concurrent_handle() {
    let router = Arc::new(blog_router());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                for i in 0..500 {
                    let path = format!("/user/u{t}/posts/{i}");
                    let route = router.handle("GET", &path).unwrap();
                    let params = route.extract_parameters(&path).unwrap();
                    assert_eq!(params.get("name"), Some(&json!(format!("u{t}"))));
                    assert_eq!(params.get("id"), Some(&json!(i.to_string())));
                    assert_eq!(router.handle("GET", "/post/all").unwrap().pattern(), "/post/all");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_shared_router_replace() {
    let factory = factory();
    let shared = SharedRouter::new(blog_router());
    let before = shared.load();
    assert!(before.handle("GET", "/post/all").is_ok());

    let next = Router::new([RouteDefinition::get("/about", "blog").build(&factory).unwrap()]).unwrap();
    let previous = shared.replace(next);

    assert_eq!(previous.len(), 5);
    assert!(shared.load().handle("GET", "/about").is_ok());
    assert!(shared.load().handle("GET", "/post/all").is_err());
    // snapshots taken before the swap keep working
    assert!(before.handle("GET", "/post/all").is_ok());
}
