use std::path::PathBuf;

use log::info;

use crate::error::{PartialMetadataWarning, Result};
use crate::generator::assembler::ConfigAssembler;
use crate::parser::content::DecodeOutcome;
use crate::settings::{Source, SubmergeConfig};
use crate::utils::file::{file_exists, file_get, file_write_atomic};
use crate::utils::http::{web_get, FetchedPayload};

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct SubmergeResult {
    pub output_path: PathBuf,
    pub decode_outcome: DecodeOutcome,
    pub custom_rule_count: usize,
    pub remote_rule_count: usize,
    pub total_rule_count: usize,
    pub userinfo_attached: bool,
    pub warnings: Vec<PartialMetadataWarning>,
}

/// Load the subscription body and userinfo header from the configured source
pub fn load_remote(config: &SubmergeConfig) -> Result<FetchedPayload> {
    match &config.remote_source {
        Source::Url(url) => {
            info!("Downloading subscription from {}", config.remote_source);
            web_get(url, &config.fetch_options())
        }
        Source::File(path) => {
            info!("Reading subscription from {}", path.display());
            Ok(FetchedPayload {
                body: file_get(path)?,
                userinfo: None,
            })
        }
    }
}

/// Read the custom rules file, `None` if it does not exist
pub fn load_custom_rules(config: &SubmergeConfig) -> Result<Option<String>> {
    let path = &config.custom_rules_source;
    if !file_exists(path) {
        return Ok(None);
    }
    info!("Reading custom rules from {}", path.display());
    file_get(path).map(Some)
}

/// Run the whole pipeline: fetch, merge, write.
///
/// The output file is only touched once the merged config has been fully
/// built and rendered.
pub fn submerge(config: &SubmergeConfig) -> Result<SubmergeResult> {
    info!("Processing subscription");

    let payload = load_remote(config)?;
    let custom_rules = load_custom_rules(config)?;

    let assembler = ConfigAssembler::new(config.clone());
    let merged = assembler.assemble(
        &payload.body,
        payload.userinfo.as_deref(),
        custom_rules.as_deref(),
    )?;
    let rendered = assembler.render(&merged)?;

    let output_path = config.output_destination.clone();
    info!("Writing merged config to {}", output_path.display());
    file_write_atomic(&output_path, &rendered)?;

    Ok(SubmergeResult {
        output_path,
        decode_outcome: merged.decode_outcome,
        custom_rule_count: merged.custom_rule_count,
        remote_rule_count: merged.remote_rule_count,
        total_rule_count: merged.custom_rule_count + merged.remote_rule_count,
        userinfo_attached: merged.userinfo.is_some(),
        warnings: merged.warnings,
    })
}
