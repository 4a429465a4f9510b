use serde_yaml::Value;

use crate::error::PartialMetadataWarning;
use crate::models::ConfigRecord;

/// Name of the rule list field in a Clash config
pub const RULES_KEY: &str = "rules";

/// State of a document's `rules` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleField {
    /// A sequence of strings, possibly empty
    Valid(Vec<String>),
    /// No `rules` key, or an explicit null
    Missing,
    /// Present but not a sequence of strings
    Malformed,
}

impl RuleField {
    /// Rules if valid, an empty list otherwise
    pub fn into_rules(self) -> Vec<String> {
        match self {
            RuleField::Valid(rules) => rules,
            RuleField::Missing | RuleField::Malformed => Vec::new(),
        }
    }
}

/// Result of merging custom rules in front of remote ones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRules {
    pub rules: Vec<String>,
    pub custom_count: usize,
    pub remote_count: usize,
    pub warnings: Vec<PartialMetadataWarning>,
}

/// Read the `rules` field of a document
pub fn read_rule_list(record: &ConfigRecord) -> RuleField {
    match record.get(RULES_KEY) {
        None | Some(Value::Null) => RuleField::Missing,
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<String>>>()
            .map_or(RuleField::Malformed, RuleField::Valid),
        Some(_) => RuleField::Malformed,
    }
}

/// Put `custom` rules in front of the remote document's rules.
///
/// Order matters: Clash evaluates rules top to bottom and the first match
/// wins, so custom rules always come first. A malformed remote rule list is
/// treated as empty. An empty `custom` list leaves the remote rules as they
/// are and is reported as a warning.
pub fn merge_rules(custom: &[String], remote: &ConfigRecord) -> MergedRules {
    let mut warnings = Vec::new();

    let remote_rules = match read_rule_list(remote) {
        RuleField::Malformed => {
            warnings.push(PartialMetadataWarning::RemoteRulesMalformed);
            Vec::new()
        }
        field => field.into_rules(),
    };

    if custom.is_empty() {
        warnings.push(PartialMetadataWarning::CustomRulesAbsent);
    }

    let custom_count = custom.len();
    let remote_count = remote_rules.len();

    let mut rules = Vec::with_capacity(custom_count + remote_count);
    rules.extend_from_slice(custom);
    rules.extend(remote_rules);

    MergedRules {
        rules,
        custom_count,
        remote_count,
        warnings,
    }
}
