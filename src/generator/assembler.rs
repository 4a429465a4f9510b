use log::{debug, info, warn};
use serde_yaml::Value;

use crate::error::{DocumentOrigin, Error, PartialMetadataWarning, Result};
use crate::models::{ConfigRecord, UserinfoRecord};
use crate::parser::content::{decode_content, DecodeOutcome};
use crate::parser::document::parse_document;
use crate::parser::infoparser::extract_userinfo;
use crate::parser::ruleset::{merge_rules, read_rule_list, RuleField, RULES_KEY};
use crate::settings::SubmergeConfig;
use crate::utils::yaml::dump_mapping;

/// Field the parsed traffic info is stored under
pub const USERINFO_KEY: &str = "subscription-userinfo";

/// Final record plus what happened while building it
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// The config that gets written out
    pub record: ConfigRecord,
    pub userinfo: Option<UserinfoRecord>,
    pub decode_outcome: DecodeOutcome,
    pub custom_rule_count: usize,
    pub remote_rule_count: usize,
    pub warnings: Vec<PartialMetadataWarning>,
}

impl MergedConfig {
    pub fn rules(&self) -> Vec<String> {
        read_rule_list(&self.record).into_rules()
    }
}

/// Builds the merged config from already-fetched inputs.
#[derive(Debug, Clone)]
pub struct ConfigAssembler {
    config: SubmergeConfig,
}

impl ConfigAssembler {
    pub fn new(config: SubmergeConfig) -> Self {
        ConfigAssembler { config }
    }

    pub fn config(&self) -> &SubmergeConfig {
        &self.config
    }

    /// Decode and parse the subscription, parse the custom rules, prepend
    /// them, and attach `subscription-userinfo` when the header yields data.
    ///
    /// `custom_rules_doc` is `None` when the custom rules file does not exist,
    /// which only produces a warning. Syntax and structure errors in either
    /// document are returned as-is.
    pub fn assemble(
        &self,
        document_text: &str,
        userinfo_header: Option<&str>,
        custom_rules_doc: Option<&str>,
    ) -> Result<MergedConfig> {
        let mut warnings = Vec::new();

        let decoded = decode_content(document_text);
        match decoded.outcome {
            DecodeOutcome::DecodedFromEncoded => info!("Subscription body is base64, decoded it"),
            DecodeOutcome::UsedAsIs => debug!("Subscription body is not base64, using it as-is"),
        }

        let mut record = parse_document(&decoded.text)
            .map_err(|e| Error::document(DocumentOrigin::Remote, e))?;
        info!("Subscription parsed, {} top-level fields", record.len());

        let custom_rules = match custom_rules_doc {
            Some(text) => {
                let custom = parse_document(text)
                    .map_err(|e| Error::document(DocumentOrigin::CustomRules, e))?;
                match read_rule_list(&custom) {
                    RuleField::Valid(rules) => rules,
                    RuleField::Missing => Vec::new(),
                    RuleField::Malformed => {
                        warnings.push(PartialMetadataWarning::CustomRulesMalformed);
                        Vec::new()
                    }
                }
            }
            None => {
                warnings.push(PartialMetadataWarning::CustomRulesFileMissing(
                    self.config.custom_rules_source.clone(),
                ));
                Vec::new()
            }
        };

        let userinfo = extract_userinfo(userinfo_header);
        if userinfo.is_none() {
            warnings.push(match userinfo_header.map(str::trim) {
                Some(header) if !header.is_empty() => {
                    PartialMetadataWarning::UserinfoUnparseable(header.to_string())
                }
                _ => PartialMetadataWarning::UserinfoAbsent,
            });
        }

        let merged = merge_rules(&custom_rules, &record);
        let custom_already_reported = warnings.iter().any(|w| {
            matches!(
                w,
                PartialMetadataWarning::CustomRulesFileMissing(_)
                    | PartialMetadataWarning::CustomRulesMalformed
            )
        });
        warnings.extend(merged.warnings.into_iter().filter(|w| {
            !(custom_already_reported && *w == PartialMetadataWarning::CustomRulesAbsent)
        }));

        if merged.custom_count > 0 {
            info!(
                "Rules merged, added {} custom rules, total {}",
                merged.custom_count,
                merged.rules.len()
            );
        }

        record.insert(
            RULES_KEY,
            Value::Sequence(merged.rules.into_iter().map(Value::String).collect()),
        );

        if let Some(info) = &userinfo {
            let value = info.to_yaml().map_err(Error::Serialize)?;
            record.insert(USERINFO_KEY, value);
        }

        for warning in &warnings {
            warn!("{}", warning);
        }

        Ok(MergedConfig {
            record,
            userinfo,
            decode_outcome: decoded.outcome,
            custom_rule_count: merged.custom_count,
            remote_rule_count: merged.remote_count,
            warnings,
        })
    }

    /// Render the merged record as YAML text
    pub fn render(&self, merged: &MergedConfig) -> Result<String> {
        dump_mapping(merged.record.as_mapping()).map_err(Error::Serialize)
    }
}
