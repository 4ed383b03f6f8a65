//! Per-method segment trie
//!
//! All nodes of one trie live in a single `Vec`; children are referenced by
//! index. Each node has:
//! - an optional terminal route
//! - literal children keyed by the exact segment text
//! - at most one parameter child, shared by every route that has a
//!   parameter at that depth (parameter names are not part of the key)
//!
//! Lookup prefers the literal child at every depth and falls back to the
//! parameter child. It never backtracks: once a literal child is taken, a
//! dead end below it is a miss even if the parameter branch would have matched.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RouteError;
use crate::route::{RouteDefinition, Segment};

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Default)]
struct TrieNode {
    route: Option<Arc<RouteDefinition>>,
    literals: HashMap<Arc<str>, NodeId>,
    param: Option<NodeId>,
}

/// Segment trie for the routes of a single HTTP method
#[derive(Debug)]
pub struct MethodTrie {
    nodes: Vec<TrieNode>,
    routes: usize,
}

impl Default for MethodTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodTrie {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            routes: 0,
        }
    }

    fn push_node(&mut self) -> NodeId {
        self.nodes.push(TrieNode::default());
        self.nodes.len() - 1
    }

    fn literal_child(&mut self, node: NodeId, text: &Arc<str>) -> NodeId {
        if let Some(&child) = self.nodes[node].literals.get(text) {
            return child;
        }
        let child = self.push_node();
        self.nodes[node].literals.insert(Arc::clone(text), child);
        child
    }

    fn param_child(&mut self, node: NodeId) -> NodeId {
        if let Some(child) = self.nodes[node].param {
            return child;
        }
        let child = self.push_node();
        self.nodes[node].param = Some(child);
        child
    }

    /// Insert a route, descending one node per segment.
    ///
    /// # Errors
    ///
    /// [`RouteError::RouteConflict`] when another route already terminates at
    /// the same node, i.e. both routes have the same literal/parameter shape.
    pub fn insert(&mut self, route: Arc<RouteDefinition>) -> Result<(), RouteError> {
        let mut node = ROOT;
        for segment in route.segments() {
            node = match segment {
                Segment::Literal(text) => self.literal_child(node, text),
                Segment::Param(_) => self.param_child(node),
            };
        }

        if let Some(existing) = &self.nodes[node].route {
            return Err(RouteError::RouteConflict {
                method: route.method().to_string(),
                existing: existing.pattern().to_string(),
                conflicting: route.pattern().to_string(),
            });
        }
        self.nodes[node].route = Some(route);
        self.routes += 1;
        Ok(())
    }

    /// Walk the trie with the segments of a request path.
    ///
    /// Returns `None` when a segment has neither a literal nor a parameter
    /// child, or when the final node has no route.
    pub fn lookup<'a, I>(&self, segments: I) -> Option<&Arc<RouteDefinition>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = &self.nodes[ROOT];
        for segment in segments {
            let next = node.literals.get(segment).copied().or(node.param)?;
            node = &self.nodes[next];
        }
        node.route.as_ref()
    }

    /// Number of routes stored
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes == 0
    }

    /// All stored routes, literal branches before parameter branches
    pub fn routes(&self) -> Vec<Arc<RouteDefinition>> {
        let mut out = Vec::with_capacity(self.routes);
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if let Some(route) = &node.route {
                out.push(Arc::clone(route));
            }
            if let Some(param) = node.param {
                stack.push(param);
            }
            let mut literals: Vec<(&Arc<str>, &NodeId)> = node.literals.iter().collect();
            literals.sort_by(|a, b| b.0.cmp(a.0));
            stack.extend(literals.into_iter().map(|(_, &child)| child));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Controller, ControllerFactory, ControllerRegistry};

    fn route(pattern: &str) -> Arc<RouteDefinition> {
        let mut registry = ControllerRegistry::new();
        registry.register("c", |_| Ok(Box::new(()) as Controller));
        let factory: Arc<dyn ControllerFactory> = Arc::new(registry);
        Arc::new(RouteDefinition::get(pattern, "c").build(&factory).unwrap())
    }

    fn find<'t>(trie: &'t MethodTrie, path: &'static str) -> Option<&'t str> {
        trie.lookup(crate::route::split_path(path))
            .map(|r| r.pattern())
    }

    #[test]
    fn test_shared_param_node() {
        let mut trie = MethodTrie::new();
        trie.insert(route("/users/{id}/posts")).unwrap();
        trie.insert(route("/users/{user_id}/comments")).unwrap();
        // root, users, {param}, posts, comments
        assert_eq!(trie.nodes.len(), 5);
        assert_eq!(find(&trie, "/users/1/posts"), Some("/users/{id}/posts"));
        assert_eq!(
            find(&trie, "/users/1/comments"),
            Some("/users/{user_id}/comments")
        );
    }

    #[test]
    fn test_conflict_on_same_shape() {
        let mut trie = MethodTrie::new();
        trie.insert(route("/post/{id}")).unwrap();
        let err = trie.insert(route("/post/{login}")).unwrap_err();
        assert_eq!(
            err,
            RouteError::RouteConflict {
                method: "GET".to_string(),
                existing: "/post/{id}".to_string(),
                conflicting: "/post/{login}".to_string(),
            }
        );
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_no_backtracking_into_param_branch() {
        let mut trie = MethodTrie::new();
        trie.insert(route("/post/all")).unwrap();
        trie.insert(route("/post/{id}/edit")).unwrap();
        assert_eq!(find(&trie, "/post/7/edit"), Some("/post/{id}/edit"));
        // literal "all" wins at depth 2 and has no "edit" child
        assert_eq!(find(&trie, "/post/all/edit"), None);
    }

    #[test]
    fn test_intermediate_node_without_route() {
        let mut trie = MethodTrie::new();
        trie.insert(route("/a/b/c")).unwrap();
        assert_eq!(find(&trie, "/a/b"), None);
        assert_eq!(find(&trie, "/a/b/c"), Some("/a/b/c"));
        assert_eq!(find(&trie, "/a/b/c/d"), None);
    }

    #[test]
    fn test_routes_listing_order() {
        let mut trie = MethodTrie::new();
        trie.insert(route("/post/{id}")).unwrap();
        trie.insert(route("/post")).unwrap();
        trie.insert(route("/post/all")).unwrap();
        trie.insert(route("/")).unwrap();
        let listed: Vec<String> = trie
            .routes()
            .iter()
            .map(|r| r.pattern().to_string())
            .collect();
        assert_eq!(listed, vec!["/", "/post", "/post/all", "/post/{id}"]);
    }
}
