use http::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::params::{identity, Parameters, Transform};
use super::segment::{split_path, strip_query, validate_pattern, Segment};
use crate::controller::{Controller, ControllerFactory};
use crate::error::RouteError;

/// A parsed, validated route pattern bound to one HTTP method and a controller
///
/// Built once through [`RouteBuilder`] and read-only afterwards.
pub struct RouteDefinition {
    method: Method,
    pattern: String,
    segments: Vec<Segment>,
    /// segment index -> parameter name, in declaration order
    parameter_positions: Vec<(usize, Arc<str>)>,
    transforms: HashMap<String, Transform>,
    controller: String,
    dependencies: Vec<Value>,
    factory: Arc<dyn ControllerFactory>,
}

/// Ordered traversal over the segments of a [`RouteDefinition`]
pub type Segments<'a> = std::slice::Iter<'a, Segment>;

impl RouteDefinition {
    /// Start building a route for an explicit method
    pub fn builder(
        method: Method,
        pattern: impl Into<String>,
        controller: impl Into<String>,
    ) -> RouteBuilder {
        RouteBuilder {
            method,
            pattern: pattern.into(),
            controller: controller.into(),
            dependencies: Vec::new(),
            transforms: HashMap::new(),
        }
    }

    pub fn get(pattern: impl Into<String>, controller: impl Into<String>) -> RouteBuilder {
        Self::builder(Method::GET, pattern, controller)
    }

    pub fn post(pattern: impl Into<String>, controller: impl Into<String>) -> RouteBuilder {
        Self::builder(Method::POST, pattern, controller)
    }

    pub fn put(pattern: impl Into<String>, controller: impl Into<String>) -> RouteBuilder {
        Self::builder(Method::PUT, pattern, controller)
    }

    pub fn patch(pattern: impl Into<String>, controller: impl Into<String>) -> RouteBuilder {
        Self::builder(Method::PATCH, pattern, controller)
    }

    pub fn delete(pattern: impl Into<String>, controller: impl Into<String>) -> RouteBuilder {
        Self::builder(Method::DELETE, pattern, controller)
    }

    pub fn head(pattern: impl Into<String>, controller: impl Into<String>) -> RouteBuilder {
        Self::builder(Method::HEAD, pattern, controller)
    }

    pub fn options(pattern: impl Into<String>, controller: impl Into<String>) -> RouteBuilder {
        Self::builder(Method::OPTIONS, pattern, controller)
    }

    /// Route pattern with any query suffix removed
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Segments in declaration order. Every call starts a fresh traversal.
    pub fn segments(&self) -> Segments<'_> {
        self.segments.iter()
    }

    /// Declared parameter names in declaration order
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameter_positions.iter().map(|(_, name)| name.as_ref())
    }

    #[must_use]
    pub fn controller_name(&self) -> &str {
        &self.controller
    }

    #[must_use]
    pub fn dependencies(&self) -> &[Value] {
        &self.dependencies
    }

    /// Build a new controller instance through the route's factory.
    ///
    /// Factory errors are returned untouched.
    pub fn controller(&self) -> anyhow::Result<Controller> {
        self.factory.create(&self.controller, &self.dependencies)
    }

    /// Extract parameter values from a path that matched this route.
    ///
    /// Each declared parameter is passed through its transform, or kept as a
    /// string when it has none. An error returned by a transform is handed
    /// back as-is. A path whose segment count differs from the route's yields
    /// [`RouteError::PathMismatch`].
    pub fn extract_parameters(&self, path: &str) -> anyhow::Result<Parameters> {
        let mut params = Parameters::new();
        if self.parameter_positions.is_empty() {
            return Ok(params);
        }

        let parts: Vec<&str> = split_path(strip_query(path)).collect();
        if parts.len() != self.segments.len() {
            return Err(RouteError::PathMismatch {
                pattern: self.pattern.clone(),
                path: path.to_string(),
                expected: self.segments.len(),
                actual: parts.len(),
            }
            .into());
        }

        for (index, name) in &self.parameter_positions {
            let raw = parts[*index];
            let value = match self.transforms.get(name.as_ref()) {
                Some(transform) => transform(raw)?,
                None => identity(raw),
            };
            params.insert(Arc::clone(name), value);
        }
        Ok(params)
    }
}

impl fmt::Display for RouteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut transforms: Vec<&String> = self.transforms.keys().collect();
        transforms.sort();
        f.debug_struct("RouteDefinition")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("segments", &self.segments)
            .field("controller", &self.controller)
            .field("dependencies", &self.dependencies)
            .field("transforms", &transforms)
            .finish()
    }
}

/// Builder for [`RouteDefinition`]; validation happens in [`RouteBuilder::build`]
pub struct RouteBuilder {
    method: Method,
    pattern: String,
    controller: String,
    dependencies: Vec<Value>,
    transforms: HashMap<String, Transform>,
}

impl RouteBuilder {
    /// Values forwarded to the controller factory
    #[must_use]
    pub fn dependencies(mut self, dependencies: Vec<Value>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Conversion applied to the named parameter during extraction
    #[must_use]
    pub fn transform<F>(mut self, name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.transforms.insert(name.into(), Arc::new(transform));
        self
    }

    /// Same as [`RouteBuilder::transform`] for an already shared transform
    #[must_use]
    pub fn shared_transform(mut self, name: impl Into<String>, transform: Transform) -> Self {
        self.transforms.insert(name.into(), transform);
        self
    }

    /// Validate the pattern and controller reference and produce the route.
    ///
    /// # Errors
    ///
    /// - [`RouteError::RouteInvalid`] for an empty pattern, a pattern without a
    ///   leading `/`, one carrying a scheme or host, or a malformed parameter
    /// - [`RouteError::ControllerNotFound`] when `factory` does not know the controller
    pub fn build(self, factory: &Arc<dyn ControllerFactory>) -> Result<RouteDefinition, RouteError> {
        validate_pattern(&self.pattern)?;
        if !factory.contains(&self.controller) {
            return Err(RouteError::ControllerNotFound {
                controller: self.controller,
            });
        }

        let pattern = strip_query(&self.pattern).to_string();
        let segments = split_path(&pattern)
            .map(|raw| Segment::parse(&self.pattern, raw))
            .collect::<Result<Vec<_>, _>>()?;
        let parameter_positions = segments
            .iter()
            .enumerate()
            .filter_map(|(index, segment)| match segment {
                Segment::Param(name) => Some((index, Arc::clone(name))),
                Segment::Literal(_) => None,
            })
            .collect();

        Ok(RouteDefinition {
            method: self.method,
            pattern,
            segments,
            parameter_positions,
            transforms: self.transforms,
            controller: self.controller,
            dependencies: self.dependencies,
            factory: Arc::clone(factory),
        })
    }
}
