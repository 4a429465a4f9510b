use serde_yaml::Value;
use thiserror::Error;

use crate::models::ConfigRecord;
use crate::utils::yaml::{load_value, value_kind};

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("YAML syntax error: {0}")]
    Parse(#[source] serde_yaml::Error),

    #[error("expected a mapping at the top level, found {found}")]
    InvalidStructure { found: &'static str },
}

/// Parse document text into a [`ConfigRecord`].
///
/// Syntax errors come back as [`DocumentError::Parse`]. Well-formed YAML
/// whose top level is anything but a mapping (a list, a scalar, an empty
/// document) is rejected with [`DocumentError::InvalidStructure`].
pub fn parse_document(text: &str) -> Result<ConfigRecord, DocumentError> {
    match load_value(text).map_err(DocumentError::Parse)? {
        Value::Mapping(map) => Ok(ConfigRecord::from(map)),
        other => Err(DocumentError::InvalidStructure {
            found: value_kind(&other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::yaml::dump_mapping;

    #[test]
    fn test_parse_mapping() {
        let yaml = r#"
port: 7890
mode: rule
proxies:
  - name: "节点 A"
    type: trojan
    server: a.example.com
    port: 443
rules:
  - DOMAIN-SUFFIX,google.com,Proxy
  - MATCH,DIRECT
"#;
        let record = parse_document(yaml).unwrap();
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["port", "mode", "proxies", "rules"]);
        assert_eq!(record.get("port").and_then(Value::as_u64), Some(7890));
    }

    #[test]
    fn test_list_is_invalid_structure() {
        let err = parse_document("- a\n- b").unwrap_err();
        assert!(matches!(
            err,
            DocumentError::InvalidStructure { found: "sequence" }
        ));
    }

    #[test]
    fn test_scalars_and_empty_are_invalid_structure() {
        for (text, kind) in [
            ("just a string", "string"),
            ("42", "number"),
            ("null", "null"),
            ("", "null"),
            ("true", "bool"),
        ] {
            match parse_document(text) {
                Err(DocumentError::InvalidStructure { found }) => assert_eq!(found, kind),
                other => panic!("unexpected result for {:?}: {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = parse_document("rules: [DOMAIN,a.com\nmode: rule").unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_)));
    }

    #[test]
    fn test_duplicate_keys_are_not_fatal() {
        let record = parse_document("mode: rule\nrules: [a]\nmode: global\n").unwrap();
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["mode", "rules"]);
        assert_eq!(record.get("mode").and_then(|v| v.as_str()), Some("global"));
    }

    #[test]
    fn test_reparse_of_dump_is_equal() {
        let yaml = r#"
mixed-port: 7890
allow-lan: false
proxy-groups:
  - name: Proxy
    type: select
    proxies: [HK, JP]
rules:
  - GEOIP,CN,DIRECT
  - MATCH,Proxy
"#;
        let first = parse_document(yaml).unwrap();
        let dumped = dump_mapping(first.as_mapping()).unwrap();
        let second = parse_document(&dumped).unwrap();
        assert_eq!(first, second);
    }
}
