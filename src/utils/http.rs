use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::Proxy;

use crate::error::{Error, Result};
use crate::utils::system::get_system_proxy;

/// Response header carrying traffic and expiry info
pub const USERINFO_HEADER: &str = "subscription-userinfo";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Default User-Agent; most providers pick the Clash format based on it.
pub const DEFAULT_USER_AGENT: &str = "clash.meta";

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    pub timeout: Duration,
    pub proxy: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            proxy: None,
        }
    }
}

/// Body and the one header the pipeline cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPayload {
    pub body: String,
    pub userinfo: Option<String>,
}

/// Resolve a proxy setting: `SYSTEM` reads the environment, `NONE` or an
/// empty value disables proxying, anything else is used as the proxy URL.
pub fn parse_proxy(proxy_str: &str) -> Option<String> {
    match proxy_str {
        "" | "NONE" => None,
        "SYSTEM" => {
            let proxy = get_system_proxy();
            if proxy.is_empty() {
                None
            } else {
                Some(proxy)
            }
        }
        other => Some(other.to_string()),
    }
}

/// Download a subscription with a blocking GET.
///
/// Any non-success status is an error. The `Subscription-Userinfo` header is
/// looked up case-insensitively and returned with the body.
pub fn web_get(url: &str, options: &FetchOptions) -> Result<FetchedPayload> {
    let fetch_err = |reason: String| Error::Fetch {
        url: url.to_string(),
        reason,
    };

    let mut client_builder = Client::builder()
        .timeout(options.timeout)
        .user_agent(options.user_agent.as_str());

    if let Some(proxy) = &options.proxy {
        let proxy =
            Proxy::all(proxy).map_err(|e| fetch_err(format!("invalid proxy '{}': {}", proxy, e)))?;
        client_builder = client_builder.proxy(proxy);
    }

    let client = client_builder
        .build()
        .map_err(|e| fetch_err(format!("failed to build HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| fetch_err(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let userinfo = response
        .headers()
        .get(USERINFO_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    debug!("Subscription-Userinfo header: {:?}", userinfo);

    let bytes = response
        .bytes()
        .map_err(|e| fetch_err(format!("failed to read response body: {}", e)))?;
    let body = String::from_utf8_lossy(&bytes).into_owned();

    Ok(FetchedPayload { body, userinfo })
}
