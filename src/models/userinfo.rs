use linked_hash_map::LinkedHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

pub const UPLOAD: &str = "upload";
pub const DOWNLOAD: &str = "download";
pub const TOTAL: &str = "total";
pub const EXPIRE: &str = "expire";
pub const EXPIRE_STR: &str = "expire_str";

/// Traffic and expiry info taken from a `Subscription-Userinfo` header.
///
/// Every numeric `key=value` pair of the header is kept, in header order.
/// `expire_str` is derived from `expire` and serialized after the counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserinfoRecord {
    fields: LinkedHashMap<String, i64>,
    pub expire_str: Option<String>,
}

impl UserinfoRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value. A repeated key keeps its first position.
    pub fn set(&mut self, key: &str, value: i64) {
        if let Some(existing) = self.fields.get_mut(key) {
            *existing = value;
        } else {
            self.fields.insert(key.to_string(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.fields.get(key).copied()
    }

    pub fn upload(&self) -> Option<i64> {
        self.get(UPLOAD)
    }

    pub fn download(&self) -> Option<i64> {
        self.get(DOWNLOAD)
    }

    pub fn total(&self) -> Option<i64> {
        self.get(TOTAL)
    }

    pub fn expire(&self) -> Option<i64> {
        self.get(EXPIRE)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// YAML form used for the `subscription-userinfo` field
    pub fn to_yaml(&self) -> Result<serde_yaml::Value, serde_yaml::Error> {
        serde_yaml::to_value(self)
    }
}

impl Serialize for UserinfoRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.expire_str.is_some());
        let mut map = serializer.serialize_map(Some(self.fields.len() + extra))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        if let Some(expire_str) = &self.expire_str {
            map.serialize_entry(EXPIRE_STR, expire_str)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_key_keeps_position() {
        let mut info = UserinfoRecord::new();
        info.set(TOTAL, 1);
        info.set(EXPIRE, 2);
        info.set(TOTAL, 3);

        let pairs: Vec<(&str, i64)> = info.iter().collect();
        assert_eq!(pairs, vec![(TOTAL, 3), (EXPIRE, 2)]);
    }

    #[test]
    fn test_to_yaml_puts_expire_str_last() {
        let mut info = UserinfoRecord::new();
        info.set(EXPIRE, 1_700_000_000);
        info.set(UPLOAD, 10);
        info.expire_str = Some("2023-11-14 22:13:20".to_string());

        let value = info.to_yaml().unwrap();
        let map = value.as_mapping().unwrap();
        let keys: Vec<&str> = map.keys().filter_map(|k| k.as_str()).collect();
        assert_eq!(keys, vec![EXPIRE, UPLOAD, EXPIRE_STR]);
        assert_eq!(map.get(UPLOAD).and_then(|v| v.as_i64()), Some(10));
    }
}
