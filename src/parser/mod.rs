pub mod content;
pub mod document;
pub mod infoparser;
pub mod ruleset;

pub use content::{decode_content, DecodeOutcome, DecodedText};
pub use document::{parse_document, DocumentError};
pub use infoparser::extract_userinfo;
pub use ruleset::{merge_rules, read_rule_list, MergedRules, RuleField};
