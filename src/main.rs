use std::time::Duration;

use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};

use submerge::parser::DecodeOutcome;
use submerge::settings::SubmergeConfigBuilder;
use submerge::submerge;

/// Fetch a Clash subscription, put your own rules first and write the result
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Subscription URL or local file (defaults to $SUB_URL)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// YAML file with a top-level `rules` list to prepend
    #[arg(short, long, value_name = "FILE")]
    rules: Option<String>,

    /// Output file path for the merged config
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<String>,

    /// User-Agent for the subscription request
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Proxy for the subscription request, or SYSTEM / NONE
    #[arg(long, value_name = "PROXY")]
    proxy: Option<String>,
}

fn main() {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    let mut builder = SubmergeConfigBuilder::from_env().remote_source_opt(args.url);
    if let Some(rules) = args.rules {
        builder = builder.custom_rules_source(rules);
    }
    if let Some(output) = args.output {
        builder = builder.output_destination(output);
    }
    if let Some(user_agent) = args.user_agent {
        builder = builder.user_agent(&user_agent);
    }
    if let Some(timeout) = args.timeout {
        builder = builder.timeout(Duration::from_secs(timeout));
    }
    if let Some(proxy) = args.proxy {
        builder = builder.proxy(&proxy);
    }

    let result = builder.build().and_then(|config| submerge(&config));

    match result {
        Ok(summary) => {
            if summary.decode_outcome == DecodeOutcome::DecodedFromEncoded {
                info!("Subscription was base64 encoded");
            }
            info!(
                "Done: {} rules ({} custom, {} from subscription), traffic info {}, written to {}",
                summary.total_rule_count,
                summary.custom_rule_count,
                summary.remote_rule_count,
                if summary.userinfo_attached {
                    "attached"
                } else {
                    "not attached"
                },
                summary.output_path.display()
            );
            if !summary.warnings.is_empty() {
                warn!("Finished with {} warning(s)", summary.warnings.len());
            }
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
