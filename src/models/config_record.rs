use serde_yaml::{Mapping, Value};

/// Top-level proxy client configuration.
///
/// Always a mapping. Keys keep the order they were read in, and fields the
/// pipeline does not touch are passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigRecord {
    map: Mapping,
}

impl ConfigRecord {
    pub fn new() -> Self {
        ConfigRecord {
            map: Mapping::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// Set a field. An existing key keeps its position, a new one goes last.
    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        self.map.insert(Value::String(key.to_string()), value)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Field names in document order, skipping non-string keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().filter_map(Value::as_str)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.map
    }
}

impl From<Mapping> for ConfigRecord {
    fn from(map: Mapping) -> Self {
        ConfigRecord { map }
    }
}
