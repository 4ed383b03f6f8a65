use once_cell::sync::Lazy;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., /users/{id}/posts/{postId}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Caller-supplied conversion from a raw path segment to a typed value
pub type Transform = Arc<dyn Fn(&str) -> anyhow::Result<Value> + Send + Sync>;

/// Stack-allocated parameter storage.
///
/// Param names use `Arc<str>` because they come from the route (known at
/// startup); values are per-request data.
pub type ParamVec = SmallVec<[(Arc<str>, Value); MAX_INLINE_PARAMS]>;

/// Parameters extracted from a request path, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    params: ParamVec,
}

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. A name that is already present keeps its position and
    /// takes the new value (last write wins).
    pub fn insert(&mut self, name: Arc<str>, value: Value) {
        match self.params.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.params.iter().map(|(k, v)| (k.as_ref(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Convert to an unordered map
    /// Note: This allocates
    #[must_use]
    pub fn into_map(self) -> HashMap<String, Value> {
        self.params
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// Convert to a JSON object, preserving declaration order where the
    /// `serde_json` map does
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Value::Object(map)
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.params.len()))?;
        for (k, v) in &self.params {
            map.serialize_entry(k.as_ref(), v)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a (Arc<str>, Value);
    type IntoIter = std::slice::Iter<'a, (Arc<str>, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

/// Identity transform: the raw segment as a JSON string
pub(crate) fn identity(raw: &str) -> Value {
    Value::String(raw.to_string())
}

fn parse_int(raw: &str) -> anyhow::Result<Value> {
    raw.parse::<i64>()
        .map(Value::from)
        .map_err(|e| anyhow::anyhow!("\"{}\" is not an integer: {}", raw, e))
}

fn parse_float(raw: &str) -> anyhow::Result<Value> {
    raw.parse::<f64>()
        .map(Value::from)
        .map_err(|e| anyhow::anyhow!("\"{}\" is not a number: {}", raw, e))
}

fn parse_bool(raw: &str) -> anyhow::Result<Value> {
    match raw {
        "true" | "1" => Ok(Value::Bool(true)),
        "false" | "0" => Ok(Value::Bool(false)),
        _ => Err(anyhow::anyhow!("\"{}\" is not a boolean", raw)),
    }
}

static BUILTIN_TRANSFORMS: Lazy<HashMap<&'static str, Transform>> = Lazy::new(|| {
    let mut builtins: HashMap<&'static str, Transform> = HashMap::new();
    builtins.insert("string", Arc::new(|raw: &str| Ok::<_, anyhow::Error>(identity(raw))));
    builtins.insert("int", Arc::new(parse_int));
    builtins.insert("float", Arc::new(parse_float));
    builtins.insert("bool", Arc::new(parse_bool));
    builtins
});

/// Named transforms, for routes declared in configuration files
///
/// Starts out with the built-ins `string`, `int`, `float` and `bool`.
#[derive(Clone)]
pub struct TransformRegistry {
    transforms: HashMap<String, Transform>,
}

impl TransformRegistry {
    #[must_use]
    pub fn new() -> Self {
        let transforms = BUILTIN_TRANSFORMS
            .iter()
            .map(|(name, f)| (name.to_string(), Arc::clone(f)))
            .collect();
        Self { transforms }
    }

    /// Register a named transform, replacing a built-in of the same name
    pub fn register<F>(&mut self, name: impl Into<String>, transform: F)
    where
        F: Fn(&str) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.transforms.insert(name.into(), Arc::new(transform));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Transform> {
        self.transforms.get(name).cloned()
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.transforms.keys().collect();
        names.sort();
        f.debug_struct("TransformRegistry")
            .field("transforms", &names)
            .finish()
    }
}
