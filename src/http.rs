use crate::APP_USER_AGENT;
use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

pub(crate) fn client() -> Result<Client> {
    Ok(Client::builder().user_agent(APP_USER_AGENT).build()?)
}

/// Validate a service base URL.
/// # Errors
/// Returns an error if `url` cannot be parsed, has no host, or uses an unsupported scheme.
pub fn base_url(url: &str) -> Result<Url> {
    let url = Url::parse(url)?;

    if url.host().is_none() {
        return Err(anyhow!("Error parsing URL: no host specified"));
    }

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(anyhow!("Error parsing URL: unsupported scheme {scheme}")),
    }
}

/// Append `path` to the path of `base`, keeping any prefix the base already has.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Url {
    let mut endpoint = base.clone();

    let joined = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    endpoint.set_path(&joined);
    endpoint.set_query(None);

    debug!("endpoint URL: {}", endpoint.path());

    endpoint
}

/// Read the error text out of a JSON error body, accepting both
/// `{"error": {"message": ".."}}` and `{"error": ".."}`.
pub(crate) fn error_message(json_response: &Value) -> &str {
    let error = &json_response["error"];

    error["message"]
        .as_str()
        .or_else(|| error.as_str())
        .unwrap_or("")
}
